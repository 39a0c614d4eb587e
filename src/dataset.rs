//! Orchestrates a full capture: fit, sample, render, write the manifest.

use std::path::{Path, PathBuf};

use crate::config::CaptureConfig;
use crate::error::{AssetKind, CaptureError, Result};
use crate::intrinsics::IntrinsicsModel;
use crate::loaders::{load_environment, load_object};
use crate::manifest::{DatasetManifest, FrameRecord};
use crate::math::AABB;
use crate::normalize::fit_to_origin_box;
use crate::render::{OutputFormat, PoseRecorder, RayCaster, RenderBackend, Stage, ViewTransform};
use crate::trajectory::{Trajectory, TrajectoryMode};

/// Which kind of dataset to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant {
    /// Object alone on a transparent film under white light
    Foreground,
    /// Object on a ground plane in front of an environment map
    Composite { environment: PathBuf },
}

/// One capture run's inputs
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub object: PathBuf,
    pub output: PathBuf,
    pub views: usize,
    pub mode: TrajectoryMode,
    pub format: OutputFormat,
    pub view_transform: ViewTransform,
    pub variant: Variant,
    /// Seed for the random trajectory modes
    pub seed: Option<u64>,
    /// Compute poses and manifest without writing images
    pub dry_run: bool,
}

impl CaptureRequest {
    pub fn new(object: impl Into<PathBuf>, variant: Variant) -> Self {
        Self {
            object: object.into(),
            output: PathBuf::from("./"),
            views: 30,
            mode: TrajectoryMode::default(),
            format: OutputFormat::default(),
            view_transform: ViewTransform::default(),
            variant,
            seed: None,
            dry_run: false,
        }
    }
}

/// Result of a finished run
#[derive(Debug, Clone)]
pub struct CaptureSummary {
    pub manifest_path: PathBuf,
    pub manifest: DatasetManifest,
    /// Object bounds after fitting, Z-up
    pub object_bounds: AABB,
}

pub struct DatasetAssembler {
    config: CaptureConfig,
}

impl DatasetAssembler {
    pub fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    /// Everything that can be checked before touching the filesystem.
    pub fn validate(&self, request: &CaptureRequest) -> Result<()> {
        self.config.validate()?;

        if request.views == 0 {
            return Err(CaptureError::InvalidViewCount(request.views));
        }
        if !request.dry_run && !RayCaster::supports(request.format) {
            return Err(CaptureError::UnsupportedFormat {
                format: request.format,
                backend: RayCaster::NAME,
            });
        }

        if let Variant::Composite { environment } = &request.variant {
            require_asset(AssetKind::Environment, environment)?;
        }
        require_asset(AssetKind::Object, &request.object)
    }

    /// Intrinsics for the configured camera; compositing adds the scene-scale hint.
    pub fn intrinsics(&self, variant: &Variant) -> IntrinsicsModel {
        let intrinsics = IntrinsicsModel::from_camera(&self.config.camera);
        match variant {
            Variant::Foreground => intrinsics,
            Variant::Composite { .. } => intrinsics.with_aabb_scale(self.config.aabb_scale),
        }
    }

    pub fn run(&self, request: &CaptureRequest) -> Result<CaptureSummary> {
        self.validate(request)?;

        let environment = match &request.variant {
            Variant::Composite { environment } => Some(
                load_environment(environment)
                    .map_err(|err| asset_load(AssetKind::Environment, environment, err))?,
            ),
            Variant::Foreground => None,
        };

        let mut object = load_object(&request.object)
            .map_err(|err| asset_load(AssetKind::Object, &request.object, err))?;
        let corners = fit_to_origin_box(&mut object, self.config.box_size)?;
        let object_bounds = AABB::from_points(&corners);

        let intrinsics = self.intrinsics(&request.variant);
        let trajectory = Trajectory::new(request.mode, request.views, &self.config, request.seed)?;

        let mut backend: Box<dyn RenderBackend> = if request.dry_run {
            Box::new(PoseRecorder::new())
        } else {
            let stage = match environment {
                Some(environment) => {
                    let mut stage = Stage::composite(&object, environment);
                    stage.add_ground_plane(self.config.box_size, object_bounds.min.z);
                    stage
                }
                None => Stage::foreground(&object),
            };
            Box::new(RayCaster::new(stage, &intrinsics, request.format, request.view_transform)?)
        };

        let image_dir = request.output.join(&self.config.image_folder);
        std::fs::create_dir_all(&image_dir)?;

        log::info!(
            "Capturing {} views of '{}' along {} with the {} backend",
            request.views,
            object.name,
            trajectory.mode(),
            backend.name()
        );
        let frames = self.capture(backend.as_mut(), trajectory, &image_dir)?;

        let manifest = DatasetManifest::new(intrinsics, frames);
        let manifest_path = request.output.join(&self.config.manifest_name);
        manifest.write(&manifest_path)?;

        Ok(CaptureSummary {
            manifest_path,
            manifest,
            object_bounds,
        })
    }

    /// Runs the trajectory through `backend`, one pose at a time.
    ///
    /// Each pose is committed, rendered and read back before the next one is
    /// placed; the first failure aborts the whole capture.
    pub fn capture<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        trajectory: Trajectory,
        image_dir: &Path,
    ) -> Result<Vec<FrameRecord>> {
        let total = trajectory.views();
        let mut frames = Vec::with_capacity(total);

        for pose in trajectory {
            backend.set_camera(pose.camera_to_world);
            let written = backend.render(&image_dir.join(pose.index.to_string()))?;
            let camera_to_world = backend.camera_to_world();

            log::debug!(
                "View {}/{} at {:?} -> {:?}",
                pose.index + 1,
                total,
                camera_to_world.w_axis.truncate(),
                written
            );
            frames.push(FrameRecord::new(&self.config.image_folder, pose.index, &camera_to_world));
        }

        Ok(frames)
    }
}

fn require_asset(kind: AssetKind, path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CaptureError::AssetNotFound {
            kind,
            path: path.to_path_buf(),
        })
    }
}

fn asset_load(kind: AssetKind, path: &Path, err: anyhow::Error) -> CaptureError {
    CaptureError::AssetLoad {
        kind,
        path: path.to_path_buf(),
        reason: format!("{err:#}"),
    }
}
