//! Hald CLUT levels.
//!
//! A level `L` Hald image is an `L³ × L³` raster holding every sample of
//! an `L² × L² × L²` lattice. Level 8 gives the 64-point cube stored in a
//! 512×512 image.

use std::fmt;

use crate::error::{HaldError, Result};

/// Hald CLUT level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HaldLevel(u32);

impl HaldLevel {
    /// Smallest supported level (4-point cube, 8×8 image).
    pub const MIN: u32 = 2;
    /// Largest supported level (256-point cube, 4096×4096 image).
    pub const MAX: u32 = 16;

    /// Level 8: `LUT_3D_SIZE 64`, 512×512 image.
    pub const DEFAULT: Self = Self(8);

    /// Create a level, rejecting values outside `MIN..=MAX`.
    pub fn new(level: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(HaldError::InvalidLevel(level))
        }
    }

    /// The raw level number.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Lattice points per axis (`LUT_3D_SIZE`).
    pub fn cube_size(self) -> u32 {
        self.0 * self.0
    }

    /// Width and height of the Hald image in pixels.
    pub fn image_side(self) -> u32 {
        self.0 * self.0 * self.0
    }

    /// Total lattice samples, equal to the image pixel count.
    pub fn sample_count(self) -> usize {
        let side = self.image_side() as usize;
        side * side
    }

    /// Quantize lattice index `k` to an 8-bit channel value.
    ///
    /// `k` must be below `cube_size()`.
    pub fn channel_byte(self, k: u32) -> u8 {
        let max_index = f64::from(self.cube_size() - 1);
        (f64::from(k) * 255.0 / max_index).round() as u8
    }
}

impl Default for HaldLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for HaldLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {} ({}³)", self.0, self.cube_size())
    }
}
