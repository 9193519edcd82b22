use crate::core::io::traits::SeriesFile;
use crate::core::models::series::{DihedralSeries, SeriesError};
use std::io::{self, BufRead};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DatError {
    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: DatParseErrorKind },
    #[error(transparent)]
    Series(#[from] SeriesError),
}

#[derive(Debug, Error, PartialEq)]
pub enum DatParseErrorKind {
    #[error("'{value}' is not a valid number")]
    InvalidFloat { value: String },
    #[error("'{value}' is not a finite angle")]
    NonFinite { value: String },
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// Plain `.dat` dihedral dumps: one angle in degrees per line, no header.
///
/// Blank lines are skipped and do not advance the step counter; line numbers
/// in errors always refer to the physical file line.
pub struct DatFile;

impl SeriesFile for DatFile {
    type Error = DatError;

    fn read_from(
        reader: &mut impl BufRead,
        step_multiplier: NonZeroU64,
    ) -> Result<DihedralSeries, Self::Error> {
        let mut angles = Vec::new();
        let mut buf = Vec::new();
        let mut line_num = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_num += 1;

            let line = std::str::from_utf8(&buf).map_err(|_| DatError::Parse {
                line: line_num,
                kind: DatParseErrorKind::InvalidUtf8,
            })?;
            let value = line.trim();
            if value.is_empty() {
                continue;
            }

            let angle: f64 = value.parse().map_err(|_| DatError::Parse {
                line: line_num,
                kind: DatParseErrorKind::InvalidFloat {
                    value: value.to_string(),
                },
            })?;
            if !angle.is_finite() {
                return Err(DatError::Parse {
                    line: line_num,
                    kind: DatParseErrorKind::NonFinite {
                        value: value.to_string(),
                    },
                });
            }
            angles.push(angle);
        }

        debug!(
            "Parsed {} angle(s) with step multiplier {}",
            angles.len(),
            step_multiplier
        );
        Ok(DihedralSeries::from_angles(angles, step_multiplier)?)
    }

    fn open_error(path: &Path, error: io::Error) -> Self::Error {
        if error.kind() == io::ErrorKind::NotFound {
            DatError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DatError::Io(error)
        }
    }
}

/// Loads a `.dat` angle file, pairing value `i` with step `(i + 1) * step_multiplier`.
pub fn load<P: AsRef<Path>>(
    path: P,
    step_multiplier: NonZeroU64,
) -> Result<DihedralSeries, DatError> {
    DatFile::read_from_path(path, step_multiplier)
}
