use super::defaults::DefaultsConfig;
use super::file::{
    FileConfig, FileFigureConfig, FileShortTwistConfig, FileWindowConfig, FileZoomPanelConfig,
};
use super::models::AppConfig;
use crate::cli::Cli;
use crate::error::{CliError, Result};
use dihedral_plot::render::config::{
    AxisWindow, ChartVariant, FigureConfig, RenderConfigBuilder, ShortTwistLayout, ZoomPanel,
};
use dihedral_plot::render::typography::Typography;
use dihedral_plot::workflows::plot::PlotRequest;
use std::str::FromStr;
use tracing::debug;

pub fn build_config(args: &Cli) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let file_config = apply_set_values(file_config, &args.set_values)?;

    let figure = merge_figure(defaults.figure, file_config.figure);

    let variant = if args.short_twist {
        ChartVariant::ShortTwist(merge_short_twist(
            defaults.short_twist,
            file_config.short_twist,
        ))
    } else {
        if file_config.short_twist.is_some() {
            debug!("Ignoring [short-twist] settings for the full-range chart.");
        }
        ChartVariant::Full
    };

    let typography = if args.plain_text {
        debug!("--plain-text given, skipping typesetting detection.");
        Typography::Plain
    } else {
        Typography::detect()
    };

    let render = RenderConfigBuilder::new()
        .figure(figure)
        .typography(typography)
        .variant(variant)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let mut request = PlotRequest::new(&args.input, args.step_multiplier);
    if let Some(dir) = &args.output_dir {
        request = request.output_dir(dir);
    }

    Ok(AppConfig { request, render })
}

fn merge_figure(base: FigureConfig, file_val: Option<FileFigureConfig>) -> FigureConfig {
    let Some(f) = file_val else {
        return base;
    };
    FigureConfig {
        width_in: f.width_in.unwrap_or(base.width_in),
        height_in: f.height_in.unwrap_or(base.height_in),
        dpi: f.dpi.unwrap_or(base.dpi),
        transparent: f.transparent.unwrap_or(base.transparent),
        marker_size: f.marker_size.unwrap_or(base.marker_size),
        point_color: f.point_color.unwrap_or(base.point_color),
        font_size: f.font_size.unwrap_or(base.font_size),
        font_family: f.font_family.unwrap_or(base.font_family),
        margin_px: base.margin_px,
    }
}

fn merge_short_twist(
    base: ShortTwistLayout,
    file_val: Option<FileShortTwistConfig>,
) -> ShortTwistLayout {
    let Some(f) = file_val else {
        return base;
    };
    ShortTwistLayout {
        left: merge_panel(base.left, f.left),
        right: merge_panel(base.right, f.right),
        overview: merge_window(base.overview, f.overview),
        connector_color: f.connector_color.unwrap_or(base.connector_color),
        margin_px: base.margin_px,
    }
}

fn merge_panel(mut base: ZoomPanel, file_val: Option<FileZoomPanelConfig>) -> ZoomPanel {
    let Some(f) = file_val else {
        return base;
    };
    base.window = merge_window(
        base.window,
        Some(FileWindowConfig {
            x_min: f.x_min,
            x_max: f.x_max,
            y_min: f.y_min,
            y_max: f.y_max,
        }),
    );
    base.band.start = f.band_start.unwrap_or(base.band.start);
    base.band.end = f.band_end.unwrap_or(base.band.end);
    base.color = f.color.unwrap_or(base.color);
    base
}

fn merge_window(base: AxisWindow, file_val: Option<FileWindowConfig>) -> AxisWindow {
    let Some(f) = file_val else {
        return base;
    };
    AxisWindow::new(
        f.x_min.unwrap_or(base.x_min),
        f.x_max.unwrap_or(base.x_max),
        f.y_min.unwrap_or(base.y_min),
        f.y_max.unwrap_or(base.y_max),
    )
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<Option<T>> {
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| CliError::Config(format!("Invalid value for {}: '{}'", key, value)))
}

fn unsupported_key(key: &str) -> CliError {
    CliError::Config(format!("Unsupported configuration key for --set: '{}'", key))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) = kv_pair.split_once('=').ok_or_else(|| {
            CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            ))
        })?;
        let key = key.trim();

        match key.split('.').collect::<Vec<_>>().as_slice() {
            ["figure", field] => {
                let figure = config.figure.get_or_insert_with(Default::default);
                set_figure_field(figure, field, key, value)?;
            }
            ["short-twist", side @ ("left" | "right"), field] => {
                let twist = config.short_twist.get_or_insert_with(Default::default);
                let panel = if *side == "left" {
                    &mut twist.left
                } else {
                    &mut twist.right
                };
                set_panel_field(panel.get_or_insert_with(Default::default), field, key, value)?;
            }
            ["short-twist", "overview", field] => {
                let window = config
                    .short_twist
                    .get_or_insert_with(Default::default)
                    .overview
                    .get_or_insert_with(Default::default);
                set_window_field(window, field, key, value)?;
            }
            ["short-twist", "connector-color"] => {
                config
                    .short_twist
                    .get_or_insert_with(Default::default)
                    .connector_color = parse_value(key, value)?;
            }
            _ => return Err(unsupported_key(key)),
        }
    }
    Ok(config)
}

fn set_figure_field(
    figure: &mut FileFigureConfig,
    field: &str,
    key: &str,
    value: &str,
) -> Result<()> {
    match field {
        "width-in" => figure.width_in = parse_value(key, value)?,
        "height-in" => figure.height_in = parse_value(key, value)?,
        "dpi" => figure.dpi = parse_value(key, value)?,
        "transparent" => figure.transparent = parse_value(key, value)?,
        "marker-size" => figure.marker_size = parse_value(key, value)?,
        "point-color" => figure.point_color = parse_value(key, value)?,
        "font-size" => figure.font_size = parse_value(key, value)?,
        _ => return Err(unsupported_key(key)),
    }
    Ok(())
}

fn set_panel_field(
    panel: &mut FileZoomPanelConfig,
    field: &str,
    key: &str,
    value: &str,
) -> Result<()> {
    match field {
        "x-min" => panel.x_min = parse_value(key, value)?,
        "x-max" => panel.x_max = parse_value(key, value)?,
        "y-min" => panel.y_min = parse_value(key, value)?,
        "y-max" => panel.y_max = parse_value(key, value)?,
        "band-start" => panel.band_start = parse_value(key, value)?,
        "band-end" => panel.band_end = parse_value(key, value)?,
        "color" => panel.color = parse_value(key, value)?,
        _ => return Err(unsupported_key(key)),
    }
    Ok(())
}

fn set_window_field(
    window: &mut FileWindowConfig,
    field: &str,
    key: &str,
    value: &str,
) -> Result<()> {
    match field {
        "x-min" => window.x_min = parse_value(key, value)?,
        "x-max" => window.x_max = parse_value(key, value)?,
        "y-min" => window.y_min = parse_value(key, value)?,
        "y-max" => window.y_max = parse_value(key, value)?,
        _ => return Err(unsupported_key(key)),
    }
    Ok(())
}
