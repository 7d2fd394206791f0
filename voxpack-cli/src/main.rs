//! Voxpack CLI - recover compressed audio payloads from agent responses.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use voxpack::output::AudioWriter;
use voxpack::pipeline::recover;

/// Recover a gzip-compressed audio payload from an agent response document
/// (or a raw base64 payload file) and write it to disk as a playable file.
#[derive(Parser)]
#[command(name = "voxpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File containing an agent response document or raw base64 compressed
    /// audio data
    input: PathBuf,

    /// Directory to save the decompressed audio into
    #[arg(default_value = "decompressed_audio")]
    output_dir: PathBuf,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("voxpack={level},voxpack_cli={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> voxpack::Result<()> {
    let writer = AudioWriter::new();
    let path = recover(&cli.input, &cli.output_dir, &writer).await?;
    println!("Audio decompressed and saved to: {}", path.display());
    Ok(())
}
