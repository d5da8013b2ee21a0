//! haldcube - neutral Hald CLUT generator and Hald-to-.cube converter
//!
//! # Usage
//!
//! ```bash
//! # Write a neutral 64³ Hald image (NeutralHald_64.png)
//! haldcube generate
//!
//! # Grade NeutralHald_64.png in any editor, then turn it into a LUT
//! haldcube convert -i graded.png -o graded.cube --title "My Look"
//!
//! # Summarize an existing .cube file
//! haldcube inspect graded.cube
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use haldcube_app::{commands, ConvertOptions, GenerateOptions};
use haldcube_core::HaldLevel;
use haldcube_media::HaldImageFormat;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "haldcube")]
#[command(about = "Generate neutral Hald CLUT images and convert graded ones to .cube LUTs")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a neutral (identity) Hald image
    Generate(GenerateArgs),
    /// Convert a Hald image to a .cube 3D LUT
    Convert(ConvertArgs),
    /// Print a summary of a .cube file
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Output image path [default: NeutralHald_<size>.<ext>]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image format; inferred from the output extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Hald level (cube size is level², image side is level³)
    #[arg(short, long, default_value_t = 8)]
    level: u32,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Hald image to convert (PNG or JPEG)
    #[arg(short, long)]
    input: PathBuf,

    /// Output .cube path [default: input with .cube extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// LUT title [default: input file stem]
    #[arg(short, long)]
    title: Option<String>,

    /// Hald level the input is expected to have
    #[arg(short, long, default_value_t = 8)]
    level: u32,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// .cube file to read
    path: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Png,
    Jpeg,
}

impl From<FormatArg> for HaldImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => HaldImageFormat::Png,
            FormatArg::Jpeg => HaldImageFormat::Jpeg,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let max_level = match (cli.quiet, cli.verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Generate(args) => {
            let level = HaldLevel::new(args.level)?;
            commands::generate(&GenerateOptions::resolve(
                args.output,
                args.format.map(Into::into),
                level,
            ))
        }
        Command::Convert(args) => {
            let level = HaldLevel::new(args.level)?;
            commands::convert(&ConvertOptions::resolve(
                args.input,
                args.output,
                args.title,
                level,
            ))
        }
        Command::Inspect(args) => {
            println!("{}", commands::inspect(&args.path)?);
            Ok(())
        }
    }
}
