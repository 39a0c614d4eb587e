use glam::{Mat4, Vec3};

/// World up axis. Scenes are Z-up once imported.
pub const WORLD_UP: Vec3 = Vec3::Z;

/// Camera-to-world matrix for a camera at `eye` aimed at `target`.
///
/// The camera looks down its local -Z axis with +Y up, the convention
/// NeRF-style consumers expect. The up vector is stabilized against
/// [`WORLD_UP`], falling back to +Y when the view direction is vertical.
pub fn look_at(eye: Vec3, target: Vec3) -> Mat4 {
    let forward = (target - eye).normalize_or_zero();
    if forward == Vec3::ZERO {
        return Mat4::from_translation(eye);
    }

    let up_hint = if forward.cross(WORLD_UP).length_squared() < 1e-8 {
        Vec3::Y
    } else {
        WORLD_UP
    };

    let right = forward.cross(up_hint).normalize();
    let up = right.cross(forward);

    Mat4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        (-forward).extend(0.0),
        eye.extend(1.0),
    )
}

/// Row-major nested array, the layout the manifest stores.
pub fn to_rows(m: &Mat4) -> [[f32; 4]; 4] {
    m.transpose().to_cols_array_2d()
}
