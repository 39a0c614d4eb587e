pub mod cli;
pub mod config;
pub mod core;
pub mod dataset;
pub mod error;
pub mod intrinsics;
pub mod loaders;
pub mod manifest;
pub mod math;
pub mod normalize;
pub mod render;
pub mod scene;
pub mod trajectory;

pub use config::CaptureConfig;
pub use dataset::{CaptureRequest, CaptureSummary, DatasetAssembler, Variant};
pub use error::{CaptureError, Result};
pub use manifest::{DatasetManifest, FrameRecord};
