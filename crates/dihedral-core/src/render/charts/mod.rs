pub(crate) mod full;
pub(crate) mod short_twist;

use crate::render::config::FigureConfig;
use plotters::prelude::*;

/// Tick labels are drawn at this fraction of the axis-label font size.
const TICK_FONT_SCALE: f64 = 0.8;

pub(crate) fn label_font(figure: &FigureConfig) -> FontDesc<'_> {
    FontDesc::new(
        FontFamily::from(figure.font_family.as_str()),
        figure.font_size as f64,
        FontStyle::Normal,
    )
}

pub(crate) fn tick_font(figure: &FigureConfig) -> FontDesc<'_> {
    label_font(figure).resize(figure.font_size as f64 * TICK_FONT_SCALE)
}

pub(crate) fn format_step(x: &f64) -> String {
    format!("{x:.0}")
}

pub(crate) fn format_angle(y: &f64) -> String {
    format!("{y:.0}")
}
