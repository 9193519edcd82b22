//! Data model and file input for dihedral angle time series.

pub mod io;
pub mod models;
