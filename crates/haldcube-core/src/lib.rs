//! haldcube core - foundation types shared by every haldcube crate
//!
//! This crate provides:
//! - `PixelBuffer`, a flat row-major RGBA8 raster
//! - `HaldLevel`, the Hald CLUT level and its derived dimensions
//! - `HaldError`, the error type used by the library crates

pub mod buffer;
pub mod error;
pub mod level;

pub use buffer::{PixelBuffer, BYTES_PER_PIXEL};
pub use error::{HaldError, Result};
pub use level::HaldLevel;
