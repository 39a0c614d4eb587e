// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::dataset::{CaptureRequest, Variant};
use crate::render::{OutputFormat, ViewTransform};
use crate::trajectory::TrajectoryMode;

#[derive(Parser, Debug, Clone)]
#[command(name = "nerf-capture")]
#[command(about = "Render posed NeRF training datasets from a 3D object", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Object alone on a transparent background
    Object {
        #[command(flatten)]
        capture: CaptureArgs,
    },
    /// Object on a ground plane in front of an environment map
    Composite {
        /// Equirectangular environment map (HDR, EXR, PNG...)
        #[arg(long)]
        hdri: PathBuf,

        #[command(flatten)]
        capture: CaptureArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CaptureArgs {
    /// Mesh to capture (glTF or GLB)
    #[arg(long)]
    pub object: PathBuf,

    /// Directory receiving the images and the manifest
    #[arg(long, default_value = "./")]
    pub output: PathBuf,

    /// Number of views to render
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub views: u32,

    #[arg(long, value_enum, default_value_t = TrajectoryMode::default())]
    pub mode: TrajectoryMode,

    #[arg(long, value_enum, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    /// View transform applied to display-referred images
    #[arg(long = "color", value_enum, default_value_t = ViewTransform::default())]
    pub color: ViewTransform,

    /// JSON file overriding capture and camera settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the random trajectory modes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Compute poses and write the manifest without rendering
    #[arg(long, default_value = "false")]
    pub dry_run: bool,
}

impl Command {
    pub fn capture_args(&self) -> &CaptureArgs {
        match self {
            Command::Object { capture } | Command::Composite { capture, .. } => capture,
        }
    }

    pub fn to_request(&self) -> CaptureRequest {
        let (args, variant) = match self {
            Command::Object { capture } => (capture, Variant::Foreground),
            Command::Composite { hdri, capture } => (
                capture,
                Variant::Composite {
                    environment: hdri.clone(),
                },
            ),
        };

        CaptureRequest {
            object: args.object.clone(),
            output: args.output.clone(),
            views: args.views as usize,
            mode: args.mode,
            format: args.format,
            view_transform: args.color,
            variant,
            seed: args.seed,
            dry_run: args.dry_run,
        }
    }
}
