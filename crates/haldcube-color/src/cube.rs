//! `.cube` 3D LUT files (Adobe/Iridas convention).
//!
//! Only 3D tables are modeled. Data rows are written red-fastest, one
//! `R G B` triple per line with six decimals.

use std::io::{self, Write};

use haldcube_core::{HaldError, Result};
use rayon::prelude::*;

/// Number of lines written before the first data row.
pub const HEADER_LINES: usize = 9;

/// Width in bytes of a data row whose values are within `[0, 1]`.
const ROW_WIDTH: usize = 27;

/// Largest accepted `LUT_3D_SIZE` (a level 16 Hald).
pub const MAX_SIZE: u32 = 256;

/// Rows formatted per parallel work item.
const ROWS_PER_CHUNK: usize = 4096;

/// One LUT output triple, normalized so that `1.0` is full scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LutSample {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LutSample {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Normalize 8-bit channels (`value / 255`).
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            r: f64::from(rgb[0]) / 255.0,
            g: f64::from(rgb[1]) / 255.0,
            b: f64::from(rgb[2]) / 255.0,
        }
    }

    /// Back to 8-bit channels, rounding and clamping to `0..=255`.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    fn write_row(&self, out: &mut String) {
        out.push_str(&format!("{:.6} {:.6} {:.6}\n", self.r, self.g, self.b));
    }
}

/// Check that `title` can sit inside `TITLE "..."` unchanged.
///
/// The format has no escape syntax, so double quotes, line breaks and
/// other control characters are rejected.
pub fn validate_title(title: &str) -> Result<()> {
    if let Some(c) = title.chars().find(|&c| c == '"' || c.is_control()) {
        return Err(HaldError::InvalidTitle(format!(
            "{:?} may not contain {:?}",
            title, c
        )));
    }
    Ok(())
}

/// An in-memory 3D LUT plus its header metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeFile {
    pub title: String,
    /// Lattice points per axis (`LUT_3D_SIZE`).
    pub size: u32,
    pub domain_min: [f64; 3],
    pub domain_max: [f64; 3],
    /// `size³` samples, red fastest.
    pub samples: Vec<LutSample>,
}

impl CubeFile {
    /// Build a LUT with the default `[0, 1]` domain.
    pub fn new(title: impl Into<String>, size: u32, samples: Vec<LutSample>) -> Result<Self> {
        let title = title.into();
        validate_title(&title)?;
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(HaldError::InvalidLut(format!(
                "LUT_3D_SIZE must be between 2 and {}, got {}",
                MAX_SIZE, size
            )));
        }
        let expected = (size as usize).checked_pow(3).ok_or_else(|| {
            HaldError::InvalidLut(format!("LUT_3D_SIZE {} is too large", size))
        })?;
        if samples.len() != expected {
            return Err(HaldError::SizeMismatch {
                expected,
                got: samples.len(),
            });
        }
        Ok(Self {
            title,
            size,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            samples,
        })
    }

    /// Header block, including its trailing newline.
    pub fn header(&self) -> String {
        let mut out = String::with_capacity(256);
        out.push_str("# Created by: haldcube\n");
        out.push_str("# Copyright: (C) haldcube contributors\n");
        out.push_str("# Website: https://github.com/haldcube/haldcube\n");
        out.push_str(&format!("TITLE \"{}\"\n", self.title));
        out.push_str(&format!("LUT_3D_SIZE {}\n", self.size));
        out.push_str(&format!("DOMAIN_MIN {}\n", fmt_triple(self.domain_min)));
        out.push_str(&format!("DOMAIN_MAX {}\n", fmt_triple(self.domain_max)));
        out.push('\n');
        out.push_str("# LUT data points\n");
        out
    }

    /// Serialize the whole file.
    ///
    /// Rows are formatted in parallel chunks and joined in order, so the
    /// text is identical to a sequential scan.
    pub fn to_cube_string(&self) -> String {
        let chunks: Vec<String> = self
            .samples
            .par_chunks(ROWS_PER_CHUNK)
            .map(|chunk| {
                let mut s = String::with_capacity(chunk.len() * ROW_WIDTH);
                for sample in chunk {
                    sample.write_row(&mut s);
                }
                s
            })
            .collect();

        let header = self.header();
        let mut out = String::with_capacity(header.len() + self.samples.len() * ROW_WIDTH);
        out.push_str(&header);
        for chunk in &chunks {
            out.push_str(chunk);
        }
        out
    }

    /// Serialize into `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.to_cube_string().as_bytes())?;
        writer.flush()
    }

    /// Parse `.cube` text holding a 3D LUT.
    pub fn parse(content: &str) -> Result<Self> {
        let mut title = String::new();
        let mut size: Option<u32> = None;
        let mut domain_min = [0.0f64; 3];
        let mut domain_max = [1.0f64; 3];
        let mut samples = Vec::new();

        for (n, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(rest) = line.strip_prefix("TITLE") {
                title = rest.trim().trim_matches('"').to_string();
                continue;
            }
            if let Some(rest) = line.strip_prefix("LUT_3D_SIZE") {
                size = Some(
                    rest.trim()
                        .parse()
                        .map_err(|e| HaldError::Parse(format!("bad LUT_3D_SIZE: {}", e)))?,
                );
                continue;
            }
            if let Some(rest) = line.strip_prefix("DOMAIN_MIN") {
                domain_min = parse_triple(rest, n)?;
                continue;
            }
            if let Some(rest) = line.strip_prefix("DOMAIN_MAX") {
                domain_max = parse_triple(rest, n)?;
                continue;
            }
            if line.starts_with("LUT_1D_SIZE") {
                return Err(HaldError::InvalidLut("expected 3D LUT, got 1D".into()));
            }
            if line.starts_with(|c: char| c.is_ascii_alphabetic()) {
                // Unknown keyword (e.g. LUT_3D_INPUT_RANGE); not a data row.
                continue;
            }

            let [r, g, b] = parse_triple(line, n)?;
            samples.push(LutSample::new(r, g, b));
        }

        let size = size.ok_or_else(|| HaldError::InvalidLut("missing LUT_3D_SIZE".into()))?;
        let mut cube = Self::new(title, size, samples)?;
        cube.domain_min = domain_min;
        cube.domain_max = domain_max;
        Ok(cube)
    }

    /// Samples quantized back to 8-bit triples, in file order.
    pub fn to_bytes_rgb(&self) -> Vec<[u8; 3]> {
        self.samples.iter().map(|s| s.to_rgb8()).collect()
    }

    /// Whether every sample is within half an 8-bit step of its own
    /// lattice coordinate.
    pub fn is_identity(&self) -> bool {
        let size = self.size as usize;
        let max = (size - 1) as f64;
        let tolerance = 0.5 / 255.0;
        self.samples.iter().enumerate().all(|(i, s)| {
            let r = (i % size) as f64 / max;
            let g = ((i / size) % size) as f64 / max;
            let b = (i / (size * size)) as f64 / max;
            (s.r - r).abs() <= tolerance
                && (s.g - g).abs() <= tolerance
                && (s.b - b).abs() <= tolerance
        })
    }
}

fn fmt_triple(v: [f64; 3]) -> String {
    format!("{:?} {:?} {:?}", v[0], v[1], v[2])
}

fn parse_triple(text: &str, line_index: usize) -> Result<[f64; 3]> {
    let vals = text
        .split_whitespace()
        .map(|s| s.parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| HaldError::Parse(format!("line {}: {}", line_index + 1, e)))?;
    match vals.as_slice() {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(HaldError::Parse(format!(
            "line {}: expected 3 values, got {}",
            line_index + 1,
            vals.len()
        ))),
    }
}
