use super::{format_angle, format_step, label_font, tick_font};
use crate::core::models::series::DihedralSeries;
use crate::render::config::{AxisWindow, FigureConfig, ShortTwistLayout, ZoomPanel};
use crate::render::typography::Typography;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

type PanelChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const PANEL_GAP_PX: u32 = 6;
const ZOOM_TINT: f64 = 0.15;
const BAND_TINT: f64 = 0.3;

/// Two zoomed panels over one overview panel, with shared axis labels and
/// connectors from each zoom to its highlighted band.
pub(crate) fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &DihedralSeries,
    figure: &FigureConfig,
    typography: Typography,
    layout: &ShortTwistLayout,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let margin = layout.margin_px as i32;
    let label_space = figure.font_size.saturating_mul(2) as i32;

    draw_shared_labels(root, figure, typography, margin)?;

    let grid = root.margin(margin, margin + label_space, margin + label_space, margin);
    let (grid_width, grid_height) = grid.dim_in_pixel();
    let (top, bottom) = grid.split_vertically(grid_height as i32 / 2);
    let (top_left, top_right) = top.split_horizontally(grid_width as i32 / 2);

    let left = draw_zoom_panel(&top_left, series, figure, &layout.left)?;
    let right = draw_zoom_panel(&top_right, series, figure, &layout.right)?;
    let overview = draw_overview_panel(&bottom, series, figure, layout)?;

    let connector = RGBColor::from(layout.connector_color).stroke_width(1);
    let ov = layout.overview;
    for (zoom, panel) in [(&left, &layout.left), (&right, &layout.right)] {
        let w = panel.window;
        let links = [
            (
                zoom.backend_coord(&(w.x_min, w.y_min)),
                overview.backend_coord(&(panel.band.start, ov.y_max)),
            ),
            (
                zoom.backend_coord(&(w.x_max, w.y_min)),
                overview.backend_coord(&(panel.band.end, ov.y_max)),
            ),
        ];
        for (from, to) in links {
            root.draw(&PathElement::new(vec![from, to], connector))?;
        }
    }

    Ok(())
}

fn draw_shared_labels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &FigureConfig,
    typography: Typography,
    margin: i32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (width, height) = root.dim_in_pixel();

    let x_style = label_font(figure)
        .into_text_style(root)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    root.draw_text(
        typography.step_label(),
        &x_style,
        (width as i32 / 2, height as i32 - margin),
    )?;

    let y_style = label_font(figure)
        .into_text_style(root)
        .transform(FontTransform::Rotate270)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw_text(
        typography.angle_label(),
        &y_style,
        (margin + figure.font_size as i32 / 2, height as i32 / 2),
    )?;

    Ok(())
}

fn draw_zoom_panel<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    series: &DihedralSeries,
    figure: &FigureConfig,
    panel: &ZoomPanel,
) -> Result<PanelChart<'a, DB>, DrawingAreaErrorKind<DB::ErrorType>> {
    let mut chart = panel_chart(area, figure, &panel.window)?;
    chart
        .plotting_area()
        .fill(&RGBColor::from(panel.color).mix(ZOOM_TINT))?;
    configure_axes(&mut chart, figure, 3, 3)?;
    scatter(&mut chart, series, figure, &panel.window)?;
    Ok(chart)
}

fn draw_overview_panel<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    series: &DihedralSeries,
    figure: &FigureConfig,
    layout: &ShortTwistLayout,
) -> Result<PanelChart<'a, DB>, DrawingAreaErrorKind<DB::ErrorType>> {
    let ov = layout.overview;
    let mut chart = panel_chart(area, figure, &ov)?;
    configure_axes(&mut chart, figure, 6, 5)?;

    for panel in [&layout.left, &layout.right] {
        let band = panel.band;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(band.start, ov.y_min), (band.end, ov.y_max)],
            RGBColor::from(panel.color).mix(BAND_TINT).filled(),
        )))?;
    }

    scatter(&mut chart, series, figure, &ov)?;
    Ok(chart)
}

fn panel_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    figure: &FigureConfig,
    window: &AxisWindow,
) -> Result<PanelChart<'a, DB>, DrawingAreaErrorKind<DB::ErrorType>> {
    ChartBuilder::on(area)
        .margin(PANEL_GAP_PX)
        .x_label_area_size(figure.font_size.saturating_mul(3) / 2)
        .y_label_area_size(figure.font_size.saturating_mul(3))
        .build_cartesian_2d(window.x_min..window.x_max, window.y_min..window.y_max)
}

fn configure_axes<DB: DrawingBackend>(
    chart: &mut PanelChart<'_, DB>,
    figure: &FigureConfig,
    x_labels: usize,
    y_labels: usize,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(x_labels)
        .y_labels(y_labels)
        .x_label_formatter(&format_step)
        .y_label_formatter(&format_angle)
        .label_style(tick_font(figure))
        .draw()
}

fn scatter<DB: DrawingBackend>(
    chart: &mut PanelChart<'_, DB>,
    series: &DihedralSeries,
    figure: &FigureConfig,
    window: &AxisWindow,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let color = RGBColor::from(figure.point_color);
    chart.draw_series(
        series
            .points()
            .filter(|p| window.contains(*p))
            .map(|p| Circle::new(p, figure.marker_size, color.filled())),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::charts::test_support::{attr, circle_count, elements, points, series};
    use crate::render::figure::Figure;

    fn draw_svg(series: &DihedralSeries, layout: &ShortTwistLayout) -> String {
        let figure = FigureConfig::default();
        Figure::draw("short-twist", figure.canvas_size(), |root| {
            draw(root, series, &figure, Typography::Plain, layout)
        })
        .unwrap()
        .svg()
        .to_string()
    }

    #[test]
    fn markers_are_drawn_once_per_panel_containing_the_point() {
        // Steps 100k..=500k in 100k increments.
        let series = series(vec![80.0, 90.0, 0.0, 85.0, 85.0], 100_000);
        let layout = ShortTwistLayout::default();
        let svg = draw_svg(&series, &layout);

        // left zoom: 100k, 200k; right zoom: 400k, 500k; overview: all five.
        assert_eq!(circle_count(&svg), 2 + 2 + 5);
    }

    #[test]
    fn points_outside_every_window_are_not_drawn() {
        let series = series(vec![170.0, -170.0], 600_000);
        let svg = draw_svg(&series, &ShortTwistLayout::default());
        assert_eq!(circle_count(&svg), 0);
    }

    #[test]
    fn axis_labels_are_drawn_once() {
        let series = series(vec![85.0; 3], 100_000);
        let svg = draw_svg(&series, &ShortTwistLayout::default());
        assert_eq!(svg.matches("MC Cycle").count(), 1);
        assert_eq!(svg.matches("phi (deg)").count(), 1);
    }

    #[test]
    fn overview_highlights_one_band_per_zoom() {
        let series = series(vec![85.0; 5], 100_000);
        let svg = draw_svg(&series, &ShortTwistLayout::default());
        let bands = |fill: &str| {
            elements(&svg, "rect")
                .into_iter()
                .filter(|rect| attr(rect, "fill") == Some(fill))
                .filter(|rect| attr(rect, "opacity") == Some("0.3"))
                .count()
        };

        assert_eq!(bands("#FF7F0E"), 1);
        assert_eq!(bands("#2CA02C"), 1);
    }

    #[test]
    fn connectors_run_from_zoom_corners_to_band_edges() {
        let series = series(vec![85.0; 5], 100_000);
        let svg = draw_svg(&series, &ShortTwistLayout::default());
        let links: Vec<_> = elements(&svg, "polyline")
            .into_iter()
            .filter(|line| attr(line, "stroke") == Some("#808080"))
            .map(points)
            .collect();

        assert_eq!(links.len(), 4);
        assert!(links.iter().all(|link| link.len() == 2));

        let (from, to): (Vec<_>, Vec<_>) = links.iter().map(|l| (l[0], l[1])).unzip();
        // Zoom panels sit above the overview, so every connector runs down.
        let band_top = to[0].1;
        assert!(to.iter().all(|p| p.1 == band_top));
        assert!(from.iter().all(|p| p.1 < band_top));
        // Left band start and end, then right band start and end.
        assert!(to.windows(2).all(|pair| pair[0].0 < pair[1].0));
        // Each zoom contributes its lower-left then lower-right corner.
        assert_eq!(from[0].1, from[1].1);
        assert!(from[0].0 < from[1].0);
        assert!(from[1].0 < from[2].0);
        assert!(from[2].0 < from[3].0);
    }

    #[test]
    fn custom_windows_are_honoured() {
        let mut layout = ShortTwistLayout::default();
        layout.left.window = AxisWindow::new(0.0, 20.0, -10.0, 10.0);
        layout.left.band.start = 0.0;
        layout.left.band.end = 20.0;
        layout.right.window = AxisWindow::new(20.0, 40.0, -10.0, 10.0);
        layout.right.band.start = 20.0;
        layout.right.band.end = 40.0;
        layout.overview = AxisWindow::new(0.0, 40.0, -90.0, 90.0);

        let series = series(vec![0.0, 5.0, 50.0, -5.0], 10);
        let svg = draw_svg(&series, &layout);

        // steps 10, 20, 30, 40: left holds 10 and 20, right holds 20 and 40
        // (30 is at 50 degrees), overview holds all four.
        assert_eq!(circle_count(&svg), 2 + 2 + 4);
    }
}
