use super::charts::{full, short_twist};
use super::config::{
    ChartVariant, FigureConfig, RenderConfig, RenderConfigBuilder, ShortTwistLayout,
};
use super::error::RenderError;
use super::export::{OutputFiles, export};
use super::figure::Figure;
use super::fonts::FontBook;
use super::progress::ProgressReporter;
use super::typography::Typography;
use crate::core::models::series::DihedralSeries;
use std::path::Path;
use tracing::{debug, info};

/// Draws and exports one chart variant according to a [`RenderConfig`].
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draws the configured chart without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyInput`] for an empty series, or a drawing
    /// error from the plotting backend.
    pub fn draw(&self, series: &DihedralSeries) -> Result<Figure, RenderError> {
        self.draw_with(series, &self.config.figure)
    }

    fn draw_with(
        &self,
        series: &DihedralSeries,
        figure: &FigureConfig,
    ) -> Result<Figure, RenderError> {
        if series.is_empty() {
            return Err(RenderError::EmptyInput);
        }

        let RenderConfig {
            typography,
            variant,
            ..
        } = &self.config;
        let chart = variant.name();
        debug!("Drawing '{}' chart for {} point(s)", chart, series.len());

        Figure::draw(chart, figure.canvas_size(), |root| match variant {
            ChartVariant::Full => full::draw(root, series, figure, *typography),
            ChartVariant::ShortTwist(layout) => {
                short_twist::draw(root, series, figure, *typography, layout)
            }
        })
    }

    /// Draws the configured chart and writes `<output_base>.pdf` and
    /// `<output_base>.png`.
    ///
    /// The configured font family is first resolved against the system fonts,
    /// so the labels are drawn with a family the exporter can shape.
    pub fn render(
        &self,
        series: &DihedralSeries,
        output_base: &Path,
        reporter: &ProgressReporter,
    ) -> Result<OutputFiles, RenderError> {
        let fonts = FontBook::load(&self.config.figure.font_family);
        let figure_config = FigureConfig {
            font_family: fonts.family().to_string(),
            ..self.config.figure.clone()
        };
        let figure = self.draw_with(series, &figure_config)?;
        info!(
            "Exporting '{}' chart to {}.{{pdf,png}}",
            self.config.variant.name(),
            output_base.display()
        );
        export(&figure, output_base, &figure_config, &fonts, reporter)
    }
}

/// Full-range scatter of `series`, written as `<output_base>.pdf` and `.png`.
pub fn render_full(
    series: &DihedralSeries,
    output_base: &Path,
    figure: &FigureConfig,
    typography: Typography,
) -> Result<OutputFiles, RenderError> {
    render_variant(series, output_base, figure, typography, ChartVariant::Full)
}

/// Short-twist composite of `series`, written as `<output_base>.pdf` and `.png`.
pub fn render_short_twist(
    series: &DihedralSeries,
    output_base: &Path,
    figure: &FigureConfig,
    typography: Typography,
    layout: &ShortTwistLayout,
) -> Result<OutputFiles, RenderError> {
    render_variant(
        series,
        output_base,
        figure,
        typography,
        ChartVariant::ShortTwist(layout.clone()),
    )
}

fn render_variant(
    series: &DihedralSeries,
    output_base: &Path,
    figure: &FigureConfig,
    typography: Typography,
    variant: ChartVariant,
) -> Result<OutputFiles, RenderError> {
    let config = RenderConfigBuilder::new()
        .figure(figure.clone())
        .typography(typography)
        .variant(variant)
        .build()?;
    Renderer::new(config).render(series, output_base, &ProgressReporter::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::charts::test_support::series;
    use crate::render::config::Band;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_render_writes_both_formats() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("dihedral");
        let series = series(vec![0.0, 90.0, -90.0], 2);

        let outputs =
            render_full(&series, &base, &FigureConfig::default(), Typography::Plain).unwrap();

        assert!(fs::read(&outputs.pdf).unwrap().starts_with(b"%PDF"));
        assert!(fs::read(&outputs.png).unwrap().starts_with(b"\x89PNG"));
    }

    #[test]
    fn short_twist_render_writes_both_formats() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("twist");
        let angles = (0..500).map(|i| 85.0 + (i % 7) as f64).collect();
        let series = series(angles, 1000);

        let outputs = render_short_twist(
            &series,
            &base,
            &FigureConfig::default(),
            Typography::Plain,
            &ShortTwistLayout::default(),
        )
        .unwrap();

        assert!(outputs.pdf.exists());
        assert!(outputs.png.exists());
    }

    #[test]
    fn empty_series_is_rejected_before_any_file_is_written() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("empty");
        let series = series(Vec::new(), 1);

        let err =
            render_full(&series, &base, &FigureConfig::default(), Typography::Plain).unwrap_err();

        assert!(matches!(err, RenderError::EmptyInput));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn invalid_layout_is_a_config_error() {
        let dir = tempdir().unwrap();
        let mut layout = ShortTwistLayout::default();
        layout.right.band = Band::new(1.0, 0.0);

        let err = render_short_twist(
            &series(vec![1.0], 1),
            &dir.path().join("bad"),
            &FigureConfig::default(),
            Typography::Plain,
            &layout,
        )
        .unwrap_err();

        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn renderer_dispatches_on_variant() {
        let series = series(vec![85.0; 4], 100_000);
        let full = Renderer::new(
            RenderConfigBuilder::new()
                .variant(ChartVariant::Full)
                .build()
                .unwrap(),
        );
        let twist = Renderer::new(
            RenderConfigBuilder::new()
                .variant(ChartVariant::ShortTwist(ShortTwistLayout::default()))
                .build()
                .unwrap(),
        );

        let full_svg = full.draw(&series).unwrap();
        let twist_svg = twist.draw(&series).unwrap();
        assert_eq!(full_svg.svg().matches("<circle").count(), 4);
        assert!(twist_svg.svg().matches("<circle").count() > 4);
    }
}
