//! End-to-end procedures built on [`crate::core`] and [`crate::render`].
//!
//! - [`plot`] loads a `.dat` dihedral dump and writes one chart variant as
//!   PDF and PNG.

pub mod plot;
