use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Nothing to plot: the dihedral series is empty")]
    EmptyInput,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Drawing the '{chart}' chart failed: {message}")]
    Drawing {
        chart: &'static str,
        message: String,
    },

    #[error("Exporting {format} output failed: {message}")]
    Export {
        format: &'static str,
        message: String,
    },

    #[error("Cannot write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    pub(crate) fn drawing(chart: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Drawing {
            chart,
            message: err.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
