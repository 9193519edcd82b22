//! # dihedral-plot
//!
//! Scatter plots of dihedral angle time series sampled along a Monte Carlo run.
//!
//! The library is split into three layers:
//!
//! - **[`core`]**: the step/angle series model and the `.dat` reader.
//! - **[`render`]**: chart configuration, the full-range and short-twist
//!   charts, and PDF/PNG export.
//! - **[`workflows`]**: the load-then-render pipeline used by the command-line tool.

pub mod core;
pub mod render;
pub mod workflows;
