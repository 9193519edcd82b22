use super::{format_angle, format_step, label_font, tick_font};
use crate::core::models::series::{ANGLE_DOMAIN_MAX, ANGLE_DOMAIN_MIN, DihedralSeries};
use crate::render::config::{AxisWindow, FigureConfig};
use crate::render::typography::Typography;
use plotters::coord::Shift;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::ops::Range;

/// Y-axis ticks of the full-range chart, in degrees.
pub const ANGLE_TICKS: [f64; 7] = [-180.0, -120.0, -60.0, 0.0, 60.0, 120.0, 180.0];

const X_LABEL_COUNT: usize = 6;

/// Linear angle axis whose ticks are always [`ANGLE_TICKS`].
struct AngleAxis(RangedCoordf64);

impl Ranged for AngleAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.0.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        ANGLE_TICKS.to_vec()
    }

    fn range(&self) -> Range<f64> {
        self.0.range()
    }
}

/// Data window of the full-range chart: `[0, max step]` by the dihedral domain.
pub(crate) fn window(series: &DihedralSeries) -> AxisWindow {
    let x_max = series.steps().max().unwrap_or(1) as f64;
    AxisWindow::new(0.0, x_max, ANGLE_DOMAIN_MIN, ANGLE_DOMAIN_MAX)
}

/// Scatter of every angle against its MC cycle, x in `[0, max step]`,
/// y fixed to the dihedral domain.
pub(crate) fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &DihedralSeries,
    figure: &FigureConfig,
    typography: Typography,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let window = window(series);

    let mut chart = ChartBuilder::on(root)
        .margin(figure.margin_px)
        .x_label_area_size(figure.font_size.saturating_mul(3))
        .y_label_area_size(figure.font_size.saturating_mul(4))
        .build_cartesian_2d(
            window.x_min..window.x_max,
            AngleAxis(RangedCoordf64::from(window.y_min..window.y_max)),
        )?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(X_LABEL_COUNT)
        .x_label_formatter(&format_step)
        .y_label_formatter(&format_angle)
        .x_desc(typography.step_label())
        .y_desc(typography.angle_label())
        .label_style(tick_font(figure))
        .axis_desc_style(label_font(figure))
        .draw()?;

    let color = RGBColor::from(figure.point_color);
    chart.draw_series(
        series
            .points()
            .filter(|p| window.contains(*p))
            .map(|p| Circle::new(p, figure.marker_size, color.filled())),
    )?;

    Ok(())
}
