//! Displays the contents of a `.torrent` file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rbenc::Manifest;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "benshow", about = "Display the file manifest of a .torrent file")]
struct Args {
    /// Path to the .torrent file.
    torrent: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Load error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(&args.torrent)?;
    let manifest = Manifest::from_bytes(&data)?;

    for file in &manifest.files {
        println!("{} ({} kB)", file.path.display(), file.length / 1024);
    }

    Ok(())
}
