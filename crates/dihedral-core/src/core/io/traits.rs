use crate::core::models::series::DihedralSeries;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::NonZeroU64;
use std::path::Path;

/// Defines the interface for reading trajectory series formats.
///
/// Implementors parse format-specific text into a [`DihedralSeries`], pairing
/// each value with its Monte Carlo step through the supplied multiplier.
pub trait SeriesFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a series from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `step_multiplier` - Number of MC cycles between two saved values.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the reader reports an I/O failure.
    fn read_from(
        reader: &mut impl BufRead,
        step_multiplier: NonZeroU64,
    ) -> Result<DihedralSeries, Self::Error>;

    /// Maps a failure to open `path` into the format's error type.
    fn open_error(_path: &Path, error: io::Error) -> Self::Error {
        error.into()
    }

    /// Reads a series from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        step_multiplier: NonZeroU64,
    ) -> Result<DihedralSeries, Self::Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Self::open_error(path, e))?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, step_multiplier)
    }
}
