use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use nerf_capture::config::CaptureConfig;
use nerf_capture::trajectory::{lemniscate, Trajectory, TrajectoryMode};

fn eye(pose: &nerf_capture::trajectory::CameraPose) -> Vec3 {
    pose.camera_to_world.w_axis.truncate()
}

#[cfg(test)]
mod circular_tests {
    use super::*;

    #[test]
    fn test_circular_angles_are_evenly_spaced() {
        let config = CaptureConfig::default();
        let poses: Vec<_> = Trajectory::new(TrajectoryMode::Circular, 10, &config, None)
            .unwrap()
            .collect();

        assert_eq!(poses.len(), 10);
        for (i, pose) in poses.iter().enumerate() {
            assert_eq!(pose.index, i);
            assert!((pose.theta - TAU * i as f32 / 10.0).abs() < 1e-5);
        }
        assert!(poses.windows(2).all(|w| w[1].theta > w[0].theta));
    }

    #[test]
    fn test_circular_is_deterministic() {
        let config = CaptureConfig::default();
        let a: Vec<_> = Trajectory::new(TrajectoryMode::Circular, 7, &config, None)
            .unwrap()
            .collect();
        let b: Vec<_> = Trajectory::new(TrajectoryMode::Circular, 7, &config, None)
            .unwrap()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_circular_cameras_face_the_origin() {
        let config = CaptureConfig::default();
        for pose in Trajectory::new(TrajectoryMode::Circular, 6, &config, None).unwrap() {
            let forward = -pose.camera_to_world.z_axis.truncate();
            let to_origin = (-eye(&pose)).normalize();
            assert!(forward.dot(to_origin) > 0.9999, "pose {} looks away", pose.index);
        }
    }
}

#[cfg(test)]
mod sphere_tests {
    use super::*;

    #[test]
    fn test_hemisphere_stays_above_horizon() {
        let config = CaptureConfig::default();
        let trajectory =
            Trajectory::new(TrajectoryMode::RandomHemisphere, 500, &config, Some(3)).unwrap();

        for pose in trajectory {
            assert!(pose.phi <= 1e-6 && pose.phi >= -FRAC_PI_2 - 1e-6);
            assert!(eye(&pose).z >= -1e-4);
            assert!((eye(&pose).length() - config.sphere_radius).abs() < 1e-3);
        }
    }

    #[test]
    fn test_full_sphere_is_uniform_in_height() {
        let config = CaptureConfig::default();
        let radius = config.sphere_radius;
        let poses: Vec<_> = Trajectory::new(TrajectoryMode::RandomSphere, 4000, &config, Some(11))
            .unwrap()
            .collect();

        for pose in &poses {
            assert!(pose.phi >= -FRAC_PI_2 - 1e-6 && pose.phi <= FRAC_PI_2 + 1e-6);
        }

        // Uniform over area means height is uniform over [-r, r]
        let band = poses
            .iter()
            .filter(|p| eye(p).z.abs() < radius * 0.5)
            .count() as f32
            / poses.len() as f32;
        assert!((band - 0.5).abs() < 0.05, "band fraction {band}");

        let below = poses.iter().filter(|p| eye(p).z < 0.0).count() as f32 / poses.len() as f32;
        assert!((below - 0.5).abs() < 0.05, "below fraction {below}");
    }

    #[test]
    fn test_seed_reproduces_sequence() {
        let config = CaptureConfig::default();
        let run = |seed| -> Vec<_> {
            Trajectory::new(TrajectoryMode::RandomSphere, 20, &config, Some(seed))
                .unwrap()
                .collect()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }
}

#[cfg(test)]
mod figure_eight_tests {
    use super::*;

    #[test]
    fn test_lemniscate_landmarks() {
        let p = lemniscate(0.0, 5.0, 0.01, 2.0);
        assert!((p - Vec3::new(5.01, 0.0, 2.0)).length() < 1e-5);

        let p = lemniscate(FRAC_PI_2, 5.0, 0.01, 2.0);
        assert!((p - Vec3::new(0.01, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_figure_eight_track() {
        let config = CaptureConfig::default();
        let poses: Vec<_> = Trajectory::new(TrajectoryMode::FigureEight, 8, &config, None)
            .unwrap()
            .collect();

        for pose in &poses {
            let p = eye(pose);
            let expected = lemniscate(
                pose.theta,
                config.figure_eight_scale,
                config.figure_eight_offset,
                config.track_height,
            );
            assert!((p - expected).length() < 1e-4);

            let forward = -pose.camera_to_world.z_axis.truncate();
            assert!(forward.dot((-p).normalize()) > 0.9999);
        }
    }
}

#[cfg(test)]
mod view_count_tests {
    use super::*;
    use nerf_capture::CaptureError;

    #[test]
    fn test_single_view_for_every_mode() {
        let config = CaptureConfig::default();
        for mode in [
            TrajectoryMode::RandomHemisphere,
            TrajectoryMode::RandomSphere,
            TrajectoryMode::Circular,
            TrajectoryMode::FigureEight,
        ] {
            let trajectory = Trajectory::new(mode, 1, &config, Some(0)).unwrap();
            assert_eq!(trajectory.len(), 1);
            assert_eq!(trajectory.count(), 1);
        }
    }

    #[test]
    fn test_zero_views_is_an_error() {
        let config = CaptureConfig::default();
        assert!(matches!(
            Trajectory::new(TrajectoryMode::Circular, 0, &config, None),
            Err(CaptureError::InvalidViewCount(0))
        ));
    }
}
