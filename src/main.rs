use anyhow::{Context, Result};
use clap::Parser;

use nerf_capture::cli::Cli;
use nerf_capture::config::CaptureConfig;
use nerf_capture::dataset::DatasetAssembler;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.command.capture_args().config {
        Some(path) => CaptureConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config file: {:?}", path))?,
        None => CaptureConfig::default(),
    };

    let request = cli.command.to_request();
    let summary = DatasetAssembler::new(config).run(&request)?;

    println!(
        "Captured {} views -> {}",
        summary.manifest.frames.len(),
        summary.manifest_path.display()
    );

    Ok(())
}
