//! Fits an imported object into the canonical capture volume.

use glam::Vec3;

use crate::error::{CaptureError, Result};
use crate::math::AABB;
use crate::scene::SceneObject;

/// Extents below this are treated as a zero-size object
const MIN_EXTENT: f32 = 1e-8;

/// Centers `object` at the origin and scales it so its longest side equals `box_size`.
///
/// Translation and scale are baked into the mesh, so later stages can treat
/// the object as already in its final place. Returns the new bounding box
/// corners in the Z-up world.
pub fn fit_to_origin_box(object: &mut SceneObject, box_size: f32) -> Result<[Vec3; 8]> {
    if !(box_size.is_finite() && box_size > 0.0) {
        return Err(CaptureError::InvalidConfig(format!(
            "box size must be positive, got {box_size}"
        )));
    }

    let bounds = AABB::from_points(&object.world_bound_box());
    let max_extent = bounds.max_extent();
    if !(max_extent.is_finite() && max_extent > MIN_EXTENT) {
        return Err(CaptureError::DegenerateBounds { extent: max_extent });
    }

    let center = bounds.center();
    let scale_factor = box_size / max_extent;
    log::info!(
        "Fitting '{}' into a {} box: center {:?}, extent {:?}, scale {}",
        object.name,
        box_size,
        center,
        bounds.extent(),
        scale_factor
    );

    object.translate(-center);
    object.resize(scale_factor);
    object.apply_location_scale();

    Ok(object.world_bound_box())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Triangle, UpAxis};

    fn slab(min: Vec3, max: Vec3) -> SceneObject {
        SceneObject::new(
            "slab",
            vec![
                Triangle::new(min, Vec3::new(max.x, min.y, min.z), max, [1.0; 3]),
                Triangle::new(min, Vec3::new(min.x, max.y, max.z), max, [1.0; 3]),
            ],
            UpAxis::Y,
        )
    }

    #[test]
    fn test_centers_and_scales() {
        let mut object = slab(Vec3::new(2.0, 10.0, -4.0), Vec3::new(6.0, 11.0, 0.0));
        let corners = fit_to_origin_box(&mut object, 3.0).unwrap();
        let bounds = AABB::from_points(&corners);
        assert!((bounds.max_extent() - 3.0).abs() < 1e-5);
        assert!(bounds.center().length() < 1e-5);
    }

    #[test]
    fn test_height_axis_is_z_after_fit() {
        // tall along glTF +Y
        let mut object = slab(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 4.0, 0.5));
        let bounds = AABB::from_points(&fit_to_origin_box(&mut object, 3.0).unwrap());
        assert!((bounds.extent().z - 3.0).abs() < 1e-5);
        assert!((bounds.extent().x - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_object() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        let mut object = slab(p, p);
        assert!(matches!(
            fit_to_origin_box(&mut object, 3.0),
            Err(CaptureError::DegenerateBounds { .. })
        ));
    }

    #[test]
    fn test_empty_object_is_degenerate() {
        let mut object = SceneObject::new("empty", Vec::new(), UpAxis::Y);
        assert!(matches!(
            fit_to_origin_box(&mut object, 3.0),
            Err(CaptureError::DegenerateBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_box() {
        let mut object = slab(Vec3::ZERO, Vec3::ONE);
        assert!(matches!(
            fit_to_origin_box(&mut object, -1.0),
            Err(CaptureError::InvalidConfig(_))
        ));
    }
}
