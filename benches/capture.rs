use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Mat4, Vec3};
use nerf_capture::config::CaptureConfig;
use nerf_capture::core::BVHNode;
use nerf_capture::intrinsics::{CameraSettings, IntrinsicsModel};
use nerf_capture::render::{OutputFormat, RayCaster, RenderBackend, Stage, ViewTransform};
use nerf_capture::scene::{SceneObject, Triangle, UpAxis};
use nerf_capture::trajectory::{Trajectory, TrajectoryMode};
use std::f32::consts::TAU;

/// Triangulated UV sphere with `rings * segments * 2` faces
fn uv_sphere(rings: usize, segments: usize) -> Vec<Triangle> {
    let point = |ring: usize, seg: usize| {
        let polar = std::f32::consts::PI * ring as f32 / rings as f32;
        let azimuth = TAU * seg as f32 / segments as f32;
        Vec3::new(
            polar.sin() * azimuth.cos(),
            polar.sin() * azimuth.sin(),
            polar.cos(),
        )
    };

    let mut triangles = Vec::with_capacity(rings * segments * 2);
    for ring in 0..rings {
        for seg in 0..segments {
            let a = point(ring, seg);
            let b = point(ring + 1, seg);
            let c = point(ring + 1, seg + 1);
            let d = point(ring, seg + 1);
            triangles.push(Triangle::new(a, b, c, [0.8, 0.8, 0.8]));
            triangles.push(Triangle::new(a, c, d, [0.8, 0.8, 0.8]));
        }
    }
    triangles
}

/// Benchmark: SAH BVH construction over growing meshes
fn bench_bvh_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("bvh_build");

    for &rings in &[16usize, 64, 128] {
        let triangles = uv_sphere(rings, rings * 2);
        group.bench_with_input(
            BenchmarkId::new("triangles", triangles.len()),
            &triangles,
            |b, triangles| b.iter(|| black_box(BVHNode::build(black_box(triangles.as_slice())))),
        );
    }

    group.finish();
}

/// Benchmark: pose generation for each trajectory mode
fn bench_trajectory(c: &mut Criterion) {
    let config = CaptureConfig::default();
    let mut group = c.benchmark_group("trajectory");

    for mode in [
        TrajectoryMode::RandomHemisphere,
        TrajectoryMode::RandomSphere,
        TrajectoryMode::Circular,
        TrajectoryMode::FigureEight,
    ] {
        group.bench_function(mode.as_str(), |b| {
            b.iter(|| {
                let trajectory = Trajectory::new(mode, 200, &config, Some(1)).unwrap();
                black_box(trajectory.map(|pose| pose.camera_to_world).collect::<Vec<Mat4>>())
            })
        });
    }

    group.finish();
}

/// Benchmark: shading one primary ray per pixel of a small frame
fn bench_trace_frame(c: &mut Criterion) {
    let object = SceneObject::new("sphere", uv_sphere(64, 128), UpAxis::Z);
    let camera = CameraSettings {
        resolution_x: 64,
        resolution_y: 64,
        ..CameraSettings::default()
    };
    let intrinsics = IntrinsicsModel::from_camera(&camera);
    let mut caster = RayCaster::new(
        Stage::foreground(&object),
        &intrinsics,
        OutputFormat::Png,
        ViewTransform::Standard,
    )
    .unwrap();

    let pose = Trajectory::new(TrajectoryMode::Circular, 1, &CaptureConfig::default(), None)
        .unwrap()
        .next()
        .unwrap();
    caster.set_camera(pose.camera_to_world);

    c.bench_function("trace_64x64", |b| {
        b.iter(|| {
            let mut covered = 0u32;
            for y in 0..64 {
                for x in 0..64 {
                    if caster.trace(x, y)[3] > 0.0 {
                        covered += 1;
                    }
                }
            }
            black_box(covered)
        })
    });
}

criterion_group!(benches, bench_bvh_build, bench_trajectory, bench_trace_frame);
criterion_main!(benches);
