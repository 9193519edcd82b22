use super::error::RenderError;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io;

pub type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;
pub type DrawResult = Result<(), DrawingAreaErrorKind<io::Error>>;

/// A drawn chart held as SVG, ready for export.
#[derive(Debug, Clone)]
pub struct Figure {
    svg: String,
    size: (u32, u32),
}

impl Figure {
    /// Runs `draw` on a fresh, unfilled canvas of `size` points.
    ///
    /// The background is left untouched so exports can stay transparent.
    pub fn draw<F>(chart: &'static str, size: (u32, u32), draw: F) -> Result<Self, RenderError>
    where
        F: FnOnce(&SvgArea<'_>) -> DrawResult,
    {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            draw(&root).map_err(|e| RenderError::drawing(chart, e))?;
            root.present().map_err(|e| RenderError::drawing(chart, e))?;
        }
        Ok(Self { svg, size })
    }

    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}
