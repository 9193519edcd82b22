//! # Render Module
//!
//! Turns a [`DihedralSeries`](crate::core::models::series::DihedralSeries) into
//! publication figures.
//!
//! Charts are drawn once with `plotters` into an in-memory SVG canvas
//! ([`figure`]), then exported from that single vector source to PDF
//! (`svg2pdf`) and to a high-DPI, optionally transparent PNG (`resvg`)
//! ([`export`]).
//!
//! - **Configuration** ([`config`]) - figure geometry, the closed set of chart
//!   variants, and the short-twist window layout
//! - **Typography** ([`typography`]) - startup detection of the TeX toolchain
//! - **Fonts** ([`fonts`]) - resolves the label font against installed faces
//! - **Rendering** ([`renderer`]) - variant dispatch and the `render_*` entry points
//! - **Progress** ([`progress`]) - callback-based progress events

pub(crate) mod charts;
pub mod config;
pub mod error;
pub mod export;
pub mod figure;
pub mod fonts;
pub mod progress;
pub mod renderer;
pub mod style;
pub mod typography;

pub use renderer::{Renderer, render_full, render_short_twist};
