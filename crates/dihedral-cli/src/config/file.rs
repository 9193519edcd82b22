use crate::error::{CliError, Result};
use dihedral_plot::render::style::Rgb;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileFigureConfig {
    pub width_in: Option<f64>,
    pub height_in: Option<f64>,
    pub dpi: Option<u32>,
    pub transparent: Option<bool>,
    pub marker_size: Option<u32>,
    pub point_color: Option<Rgb>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileWindowConfig {
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileZoomPanelConfig {
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub band_start: Option<f64>,
    pub band_end: Option<f64>,
    pub color: Option<Rgb>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileShortTwistConfig {
    pub left: Option<FileZoomPanelConfig>,
    pub right: Option<FileZoomPanelConfig>,
    pub overview: Option<FileWindowConfig>,
    pub connector_color: Option<Rgb>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub figure: Option<FileFigureConfig>,
    #[serde(rename = "short-twist")]
    pub short_twist: Option<FileShortTwistConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_full_document() {
        let toml = r##"
            [figure]
            width-in = 8.0
            dpi = 150
            transparent = false
            point-color = "#000000"
            font-family = "sans-serif"

            [short-twist]
            connector-color = "#333333"

            [short-twist.left]
            x-min = 0.0
            x-max = 10.0
            band-end = 8.0
            color = "#ff0000"

            [short-twist.overview]
            y-min = -180.0
            y-max = 180.0
        "##;
        let config: FileConfig = toml::from_str(toml).unwrap();

        let figure = config.figure.unwrap();
        assert_eq!(figure.width_in, Some(8.0));
        assert_eq!(figure.dpi, Some(150));
        assert_eq!(figure.transparent, Some(false));
        assert_eq!(figure.point_color, Some(Rgb::BLACK));
        assert_eq!(figure.font_family.as_deref(), Some("sans-serif"));
        assert_eq!(figure.height_in, None);

        let twist = config.short_twist.unwrap();
        assert_eq!(twist.connector_color, Some(Rgb::new(0x33, 0x33, 0x33)));
        let left = twist.left.unwrap();
        assert_eq!(left.x_max, Some(10.0));
        assert_eq!(left.band_end, Some(8.0));
        assert_eq!(left.color, Some(Rgb::new(0xff, 0, 0)));
        assert!(twist.right.is_none());
        assert_eq!(twist.overview.unwrap().y_min, Some(-180.0));
    }

    #[test]
    fn empty_document_is_all_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("[figure]\ndpy = 300\n").is_err());
        assert!(toml::from_str::<FileConfig>("[short-twist.middle]\nx-min = 0.0\n").is_err());
        assert!(toml::from_str::<FileConfig>("[axes]\n").is_err());
    }

    #[test]
    fn malformed_color_is_rejected() {
        let result = toml::from_str::<FileConfig>("[figure]\npoint-color = \"blue\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn from_file_reports_path_on_parse_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.toml");
        fs::write(&path, "[figure\n").unwrap();

        let err = FileConfig::from_file(&path).unwrap_err();
        match err {
            CliError::FileParsing { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let dir = tempdir().unwrap();
        let err = FileConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
