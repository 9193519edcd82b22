//! Readers for dihedral angle dumps.

pub mod dat;
pub mod traits;
