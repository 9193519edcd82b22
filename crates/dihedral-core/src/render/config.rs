use super::style::Rgb;
use super::typography::Typography;
use thiserror::Error;

/// Canvas resolution: one figure inch is this many SVG user units (points).
pub const POINTS_PER_INCH: f64 = 72.0;

/// Largest accepted font size in points; label areas are sized as multiples of it.
pub const MAX_FONT_SIZE: u32 = 288;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl ConfigError {
    fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FigureConfig {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub transparent: bool,
    pub marker_size: u32,
    pub point_color: Rgb,
    pub font_size: u32,
    pub font_family: String,
    pub margin_px: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: 7.0,
            height_in: 5.0,
            dpi: 300,
            transparent: true,
            marker_size: 2,
            point_color: Rgb::TAB_BLUE,
            font_size: 18,
            font_family: "serif".to_string(),
            margin_px: 12,
        }
    }
}

impl FigureConfig {
    /// Canvas size in points.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            (self.width_in * POINTS_PER_INCH).round() as u32,
            (self.height_in * POINTS_PER_INCH).round() as u32,
        )
    }

    /// Raster scale factor from points to pixels at the configured DPI.
    pub fn raster_scale(&self) -> f32 {
        (self.dpi as f64 / POINTS_PER_INCH) as f32
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width_in.is_finite() && self.width_in > 0.0) {
            return Err(ConfigError::invalid("figure.width-in", "must be positive"));
        }
        if !(self.height_in.is_finite() && self.height_in > 0.0) {
            return Err(ConfigError::invalid("figure.height-in", "must be positive"));
        }
        if self.dpi == 0 {
            return Err(ConfigError::invalid("figure.dpi", "must be positive"));
        }
        if self.marker_size == 0 {
            return Err(ConfigError::invalid("figure.marker-size", "must be positive"));
        }
        if self.font_size == 0 || self.font_size > MAX_FONT_SIZE {
            return Err(ConfigError::invalid(
                "figure.font-size",
                format!("must be between 1 and {MAX_FONT_SIZE}"),
            ));
        }
        Ok(())
    }
}

/// Data-space rectangle shown by one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisWindow {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !(self.x_min < self.x_max) {
            return Err(ConfigError::invalid(
                format!("{name}.x-min"),
                format!("{} must be below x-max {}", self.x_min, self.x_max),
            ));
        }
        if !(self.y_min < self.y_max) {
            return Err(ConfigError::invalid(
                format!("{name}.y-min"),
                format!("{} must be below y-max {}", self.y_min, self.y_max),
            ));
        }
        Ok(())
    }
}

/// Highlighted step interval on the overview panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: f64,
    pub end: f64,
}

impl Band {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// A zoomed panel together with the band that locates it on the overview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPanel {
    pub window: AxisWindow,
    pub band: Band,
    pub color: Rgb,
}

impl ZoomPanel {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        self.window.validate(name)?;
        if !(self.band.start < self.band.end) {
            return Err(ConfigError::invalid(
                format!("{name}.band-start"),
                format!(
                    "{} must be below band-end {}",
                    self.band.start, self.band.end
                ),
            ));
        }
        Ok(())
    }
}

/// Layout of the short-twist composite: two zooms above one overview.
///
/// The defaults match the step range of a 500k-cycle production run.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortTwistLayout {
    pub left: ZoomPanel,
    pub right: ZoomPanel,
    pub overview: AxisWindow,
    pub connector_color: Rgb,
    pub margin_px: u32,
}

impl Default for ShortTwistLayout {
    fn default() -> Self {
        Self {
            left: ZoomPanel {
                window: AxisWindow::new(100_000.0, 250_000.0, 75.0, 95.0),
                band: Band::new(100_000.0, 210_000.0),
                color: Rgb::TAB_ORANGE,
            },
            right: ZoomPanel {
                window: AxisWindow::new(350_000.0, 500_000.0, 75.0, 95.0),
                band: Band::new(350_000.0, 460_000.0),
                color: Rgb::TAB_GREEN,
            },
            overview: AxisWindow::new(0.0, 500_000.0, -125.0, 125.0),
            connector_color: Rgb::GRAY,
            margin_px: 4,
        }
    }
}

impl ShortTwistLayout {
    fn validate(&self) -> Result<(), ConfigError> {
        self.left.validate("short-twist.left")?;
        self.right.validate("short-twist.right")?;
        self.overview.validate("short-twist.overview")
    }
}

/// The closed set of charts this crate draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartVariant {
    Full,
    ShortTwist(ShortTwistLayout),
}

impl ChartVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::ShortTwist(_) => "short-twist",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub figure: FigureConfig,
    pub typography: Typography,
    pub variant: ChartVariant,
}

#[derive(Default)]
pub struct RenderConfigBuilder {
    figure: Option<FigureConfig>,
    typography: Option<Typography>,
    variant: Option<ChartVariant>,
}

impl RenderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figure(mut self, figure: FigureConfig) -> Self {
        self.figure = Some(figure);
        self
    }
    pub fn typography(mut self, typography: Typography) -> Self {
        self.typography = Some(typography);
        self
    }
    pub fn variant(mut self, variant: ChartVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        let figure = self.figure.unwrap_or_default();
        figure.validate()?;
        let variant = self
            .variant
            .ok_or(ConfigError::MissingParameter("variant"))?;
        if let ChartVariant::ShortTwist(layout) = &variant {
            layout.validate()?;
        }
        Ok(RenderConfig {
            figure,
            typography: self.typography.unwrap_or_default(),
            variant,
        })
    }
}
