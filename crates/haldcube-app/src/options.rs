//! Typed options for the two core operations.

use std::path::{Path, PathBuf};

use haldcube_core::HaldLevel;
use haldcube_media::HaldImageFormat;

/// Options for writing a neutral Hald image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub path: PathBuf,
    pub format: HaldImageFormat,
    pub level: HaldLevel,
}

impl GenerateOptions {
    /// Default file name, e.g. `NeutralHald_64.png`.
    pub fn default_file_name(level: HaldLevel, format: HaldImageFormat) -> String {
        format!("NeutralHald_{}.{}", level.cube_size(), format.extension())
    }

    /// Fill in defaults. Without an explicit format it is inferred from
    /// `path`, and PNG is used when there is no path either.
    pub fn resolve(
        path: Option<PathBuf>,
        format: Option<HaldImageFormat>,
        level: HaldLevel,
    ) -> Self {
        let format = format
            .or_else(|| path.as_deref().map(HaldImageFormat::from_path))
            .unwrap_or_default();
        let path = path.unwrap_or_else(|| PathBuf::from(Self::default_file_name(level, format)));
        Self {
            path,
            format,
            level,
        }
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::resolve(None, None, HaldLevel::DEFAULT)
    }
}

/// Options for converting a Hald image to a `.cube` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub level: HaldLevel,
}

impl ConvertOptions {
    /// Fill in defaults: output next to the input with a `.cube`
    /// extension, title from the input file stem.
    pub fn resolve(
        input: PathBuf,
        output: Option<PathBuf>,
        title: Option<String>,
        level: HaldLevel,
    ) -> Self {
        let output = output.unwrap_or_else(|| input.with_extension("cube"));
        let title = title.unwrap_or_else(|| file_stem(&input));
        Self {
            input,
            output,
            title,
            level,
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
