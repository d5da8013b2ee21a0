//! The `generate`, `convert` and `inspect` flows behind the CLI.

use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};
use haldcube_color::CubeFile;
use tracing::info;

use crate::options::{ConvertOptions, GenerateOptions};
use crate::session::Session;
use crate::state::{Event, TaskOutcome};

/// Write a neutral Hald image as described by `opts`.
pub fn generate(opts: &GenerateOptions) -> Result<()> {
    info!("Generating neutral Hald, {}", opts.level);
    let mut session = Session::new(opts.level);
    session
        .dispatch(Event::GenerateRequested {
            path: opts.path.clone(),
            format: opts.format,
        })
        .with_context(|| format!("failed to generate {}", opts.path.display()))?;
    Ok(())
}

/// Open `opts.input` and write it out as a `.cube` file.
pub fn convert(opts: &ConvertOptions) -> Result<()> {
    let mut session = Session::new(opts.level);
    session
        .dispatch(Event::TitleChanged(opts.title.clone()))
        .context("failed to set title")?;

    match session
        .dispatch(Event::OpenRequested {
            path: opts.input.clone(),
        })
        .with_context(|| format!("failed to open {}", opts.input.display()))?
    {
        Some(TaskOutcome::Opened { .. }) => {}
        other => bail!("unexpected result while opening: {:?}", other),
    }

    session
        .dispatch(Event::ConvertRequested {
            path: opts.output.clone(),
        })
        .with_context(|| format!("failed to convert to {}", opts.output.display()))?;
    Ok(())
}

/// Header facts and identity check for a `.cube` file.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeSummary {
    pub title: String,
    pub size: u32,
    pub domain_min: [f64; 3],
    pub domain_max: [f64; 3],
    pub samples: usize,
    pub identity: bool,
}

impl fmt::Display for CubeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "title:      {:?}", self.title)?;
        writeln!(f, "size:       {}", self.size)?;
        writeln!(f, "domain min: {:?}", self.domain_min)?;
        writeln!(f, "domain max: {:?}", self.domain_max)?;
        writeln!(f, "samples:    {}", self.samples)?;
        write!(f, "identity:   {}", self.identity)
    }
}

/// Read and summarize the `.cube` file at `path`.
pub fn inspect(path: &Path) -> Result<CubeSummary> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let cube =
        CubeFile::parse(&text).with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(CubeSummary {
        identity: cube.is_identity(),
        samples: cube.samples.len(),
        title: cube.title,
        size: cube.size,
        domain_min: cube.domain_min,
        domain_max: cube.domain_max,
    })
}
