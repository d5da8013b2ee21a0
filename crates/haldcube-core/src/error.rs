//! Error types for haldcube.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for haldcube operations.
#[derive(Error, Debug)]
pub enum HaldError {
    #[error("could not read {}: {reason}", path.display())]
    FileRead { path: PathBuf, reason: String },

    #[error("invalid image dimensions: expected {expected_w}x{expected_h}, got {got_w}x{got_h}")]
    InvalidDimensions {
        expected_w: u32,
        expected_h: u32,
        got_w: u32,
        got_h: u32,
    },

    #[error("could not write {}: {reason}", path.display())]
    FileWrite { path: PathBuf, reason: String },

    #[error("pixel buffer size mismatch: expected {expected} bytes, got {got}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("invalid title: {0}")]
    InvalidTitle(String),

    #[error("invalid Hald level {0}: supported levels are 2 to 16")]
    InvalidLevel(u32),

    #[error("encoder error: {0}")]
    Encode(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid LUT: {0}")]
    InvalidLut(String),

    #[error("no Hald image loaded")]
    NoHaldLoaded,
}

impl HaldError {
    pub fn file_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FileRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn file_write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FileWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for haldcube operations.
pub type Result<T> = std::result::Result<T, HaldError>;
