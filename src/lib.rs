//! qreye - stylized vector QR codes
//!
//! This library turns a payload into a QR code drawn as a custom vector
//! graphic: rounded finder "eyes", data modules merged into round-capped
//! vertical bars where they touch (or lone dots where they don't), and an
//! empty center zone reserved for a logo.
//!
//! # Features
//!
//! - **Pluggable encoding**: any [`MatrixSource`] can supply the module
//!   matrix; [`QrcodeSource`] wraps the `qrcode` crate
//! - **Pure rendering**: one call produces an ordered list of [`Shape`]s with
//!   no shared state, so renders may run in parallel
//! - **Output backends**: SVG documents, PNG rasters (`raster` feature) and
//!   JSON shape dumps
//!
//! # Example
//!
//! ```no_run
//! use qreye::output::svg::{SvgOptions, to_svg};
//! use qreye::{Renderer, RenderStyle};
//!
//! fn main() -> anyhow::Result<()> {
//!     let renderer = Renderer::with_style(RenderStyle::default());
//!     let graphic = renderer.render_graphic("https://example.com", 500.0, 100.0)?;
//!
//!     println!("{}", to_svg(&graphic, &SvgOptions::default()));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod qr;
pub mod render;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{LogRotation, LoggingOptions, OutputOptions, QreyeConfig, StyleOptions};
pub use output::OutputFormat;
pub use qr::{EcLevel, Matrix, MatrixSource, QrcodeSource};
pub use render::{Geometry, QrGraphic, RenderStyle, Renderer, Shape};

/// Render `payload` with the default encoder and style.
///
/// Returns finder rings, then dots, then line segments.
pub fn render(payload: &str, output_size: f64, logo_size: f64) -> Result<Vec<Shape>> {
    Renderer::new().render(payload, output_size, logo_size)
}
