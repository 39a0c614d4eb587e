use glam::Vec3;

/// Slab test against an axis-aligned box.
///
/// Returns the distance at which the ray enters the box, or `0.0` when the
/// origin already sits inside it. `None` means a miss.
pub fn intersect_aabb(
    ray_origin: Vec3,
    ray_dir: Vec3,
    box_min: Vec3,
    box_max: Vec3,
) -> Option<f32> {
    const EPSILON: f32 = 1e-8;

    // Near-zero components clamp to a huge inverse instead of dividing by zero
    let inv = |d: f32| {
        if d.abs() < EPSILON {
            1.0 / EPSILON.copysign(d)
        } else {
            1.0 / d
        }
    };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t_min = (box_min - ray_origin) * inv_dir;
    let t_max = (box_max - ray_origin) * inv_dir;

    let t_near = t_min.min(t_max).max_element();
    let t_far = t_min.max(t_max).min_element();

    if t_near > t_far || t_far < 0.0 {
        return None;
    }

    Some(t_near.max(0.0))
}
