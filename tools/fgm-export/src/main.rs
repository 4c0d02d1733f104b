//! fgm-export - flatten GLB meshes into an .fgm buffer
//!
//! Usage: `fgm-export <INPUT> <OUTPUT>`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;

use fgm_export::{BufferViewLookup, DecodeOptions, FGM_EXT, convert_glb, load_options};

#[derive(Parser)]
#[command(name = "fgm-export")]
#[command(about = "Flatten GLB meshes into a load-ready .fgm buffer")]
#[command(version)]
struct Cli {
    /// Input .glb file
    input: PathBuf,

    /// Output .fgm file
    output: PathBuf,

    /// Decode options (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How accessors find their bufferView (overrides config)
    #[arg(long, value_enum)]
    lookup: Option<BufferViewLookup>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            let _ = err.print();
            return code;
        }
    };

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut options = match &cli.config {
        Some(path) => load_options(path)?,
        None => DecodeOptions::default(),
    };
    if let Some(lookup) = cli.lookup {
        options.buffer_view_lookup = lookup;
    }

    if cli.output.extension().and_then(|e| e.to_str()) != Some(FGM_EXT) {
        tracing::warn!("Output {:?} does not have the .{} extension", cli.output, FGM_EXT);
    }

    tracing::info!("Converting {:?} -> {:?}", cli.input, cli.output);
    convert_glb(&cli.input, &cli.output, &options)?;
    tracing::info!("Done!");
    Ok(())
}
