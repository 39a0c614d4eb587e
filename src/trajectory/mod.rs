//! Camera trajectories around the fitted object.
//!
//! Each [`TrajectoryMode`] selects one independent sampler. A [`Trajectory`]
//! yields exactly `views` poses in capture order.

mod circular;
mod figure_eight;
mod rig;
mod sphere;

use std::fmt;

use clap::ValueEnum;
use glam::Mat4;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::CaptureConfig;
use crate::error::{CaptureError, Result};

pub use circular::CircularSampler;
pub use figure_eight::{lemniscate, FigureEightSampler};
pub use rig::PivotRig;
pub use sphere::{sample_angles, SphereSampler};

/// Family of camera paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryMode {
    /// Uniform random views on the upper hemisphere
    #[default]
    RandomHemisphere,
    /// Uniform random views on the full sphere
    RandomSphere,
    /// Evenly spaced views on a horizontal circle
    Circular,
    /// Lemniscate track at fixed height
    FigureEight,
}

impl TrajectoryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrajectoryMode::RandomHemisphere => "random_hemisphere",
            TrajectoryMode::RandomSphere => "random_sphere",
            TrajectoryMode::Circular => "circular",
            TrajectoryMode::FigureEight => "figure_eight",
        }
    }
}

impl fmt::Display for TrajectoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One camera placement along a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Capture order, also the image file index
    pub index: usize,
    /// Azimuth of the pivot, or the curve parameter for figure-eight
    pub theta: f32,
    /// Pivot pitch; zero for tracks without one
    pub phi: f32,
    pub camera_to_world: Mat4,
}

#[derive(Debug, Clone)]
enum Sampler {
    Sphere(SphereSampler),
    Circular(CircularSampler),
    FigureEight(FigureEightSampler),
}

impl Sampler {
    fn pose(&self, index: usize) -> CameraPose {
        match self {
            Sampler::Sphere(s) => s.pose(index),
            Sampler::Circular(s) => s.pose(index),
            Sampler::FigureEight(s) => s.pose(index),
        }
    }
}

/// Ordered camera poses for one capture run.
#[derive(Debug, Clone)]
pub struct Trajectory {
    mode: TrajectoryMode,
    sampler: Sampler,
    views: usize,
    next: usize,
}

impl Trajectory {
    /// Builds the sampler for `mode`. Random modes draw from `seed` when
    /// given, otherwise from OS entropy.
    pub fn new(
        mode: TrajectoryMode,
        views: usize,
        config: &CaptureConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        if views == 0 {
            return Err(CaptureError::InvalidViewCount(views));
        }

        let sampler = match mode {
            TrajectoryMode::RandomHemisphere | TrajectoryMode::RandomSphere => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                Sampler::Sphere(SphereSampler::new(
                    views,
                    config.sphere_radius,
                    mode == TrajectoryMode::RandomHemisphere,
                    &mut rng,
                ))
            }
            TrajectoryMode::Circular => Sampler::Circular(CircularSampler::new(
                views,
                config.sphere_radius,
                config.track_height,
            )),
            TrajectoryMode::FigureEight => Sampler::FigureEight(FigureEightSampler::new(
                views,
                config.figure_eight_scale,
                config.figure_eight_offset,
                config.track_height,
            )),
        };

        Ok(Self {
            mode,
            sampler,
            views,
            next: 0,
        })
    }

    pub fn mode(&self) -> TrajectoryMode {
        self.mode
    }

    pub fn views(&self) -> usize {
        self.views
    }
}

impl Iterator for Trajectory {
    type Item = CameraPose;

    fn next(&mut self) -> Option<CameraPose> {
        if self.next >= self.views {
            return None;
        }
        let pose = self.sampler.pose(self.next);
        self.next += 1;
        Some(pose)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.views - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Trajectory {}
