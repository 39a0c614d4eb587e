//! Error types for dataset capture.

use std::path::PathBuf;

use thiserror::Error;

use crate::render::OutputFormat;

/// Which kind of input asset a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Object,
    Environment,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Object => f.write_str("object"),
            AssetKind::Environment => f.write_str("environment"),
        }
    }
}

/// Everything that can abort a capture run.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// A required asset path does not resolve.
    #[error("{kind} file {} does not exist. Check path.", path.display())]
    AssetNotFound { kind: AssetKind, path: PathBuf },

    /// The asset exists but could not be decoded.
    #[error("failed to load {kind} {}: {reason}", path.display())]
    AssetLoad {
        kind: AssetKind,
        path: PathBuf,
        reason: String,
    },

    /// The object's bounding box has no extent, so it cannot be scaled to fit.
    #[error("object bounding box is degenerate (max extent {extent}), cannot fit it to a box")]
    DegenerateBounds { extent: f32 },

    #[error("view count must be at least 1, got {0}")]
    InvalidViewCount(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The render backend cannot write the requested output format.
    #[error("output format {format} is not supported by the {backend} backend")]
    UnsupportedFormat {
        format: OutputFormat,
        backend: &'static str,
    },

    #[error("failed to write image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CaptureError>;
