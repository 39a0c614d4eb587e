use glam::Vec3;
use nerf_capture::math::AABB;
use nerf_capture::normalize::fit_to_origin_box;
use nerf_capture::scene::{SceneObject, Triangle, UpAxis};

fn object_spanning(min: Vec3, max: Vec3, up_axis: UpAxis) -> SceneObject {
    SceneObject::new(
        "span",
        vec![Triangle::new(min, Vec3::new(max.x, min.y, max.z), max, [1.0; 3])],
        up_axis,
    )
}

#[cfg(test)]
mod aabb_tests {
    use super::*;

    #[test]
    fn test_aabb_union_creates_bounding_box() {
        let a = AABB::new(Vec3::ZERO, Vec3::splat(10.0));
        let b = AABB::new(Vec3::splat(5.0), Vec3::splat(15.0));

        let union = a.union(&b);

        assert_eq!(union.min, Vec3::ZERO);
        assert_eq!(union.max, Vec3::splat(15.0));
    }

    #[test]
    fn test_aabb_union_with_contained_box() {
        let outer = AABB::new(Vec3::ZERO, Vec3::splat(10.0));
        let inner = AABB::new(Vec3::splat(2.0), Vec3::splat(8.0));

        assert_eq!(outer.union(&inner), outer, "Union should equal larger box");
    }

    #[test]
    fn test_aabb_center_offset_box() {
        let aabb = AABB::new(Vec3::new(5.0, 10.0, 15.0), Vec3::new(15.0, 20.0, 25.0));
        assert_eq!(aabb.center(), Vec3::new(10.0, 15.0, 20.0));
    }

    #[test]
    fn test_aabb_degenerate_flat_box() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::new(10.0, 10.0, 0.0));
        // 2 * (10*10 + 10*0 + 0*10)
        assert_eq!(aabb.surface_area(), 200.0);
        assert_eq!(aabb.max_extent(), 10.0);
    }
}

#[cfg(test)]
mod fit_tests {
    use super::*;
    use nerf_capture::CaptureError;

    #[test]
    fn test_fit_centers_and_scales_longest_side() {
        let mut object = object_spanning(
            Vec3::new(10.0, -2.0, 4.0),
            Vec3::new(12.0, 6.0, 5.0),
            UpAxis::Z,
        );

        let corners = fit_to_origin_box(&mut object, 3.0).unwrap();
        let bounds = AABB::from_points(&corners);

        assert!(bounds.center().length() < 1e-5);
        assert!((bounds.extent() - Vec3::new(0.75, 3.0, 0.375)).length() < 1e-5);
    }

    #[test]
    fn test_fit_is_baked_into_mesh() {
        let mut object = object_spanning(Vec3::ZERO, Vec3::new(4.0, 2.0, 1.0), UpAxis::Y);

        fit_to_origin_box(&mut object, 2.0).unwrap();

        assert_eq!(object.location, Vec3::ZERO);
        assert_eq!(object.scale, 1.0);
        let points: Vec<Vec3> = object
            .world_triangles()
            .iter()
            .flat_map(|t| [t.v0, t.v1, t.v2])
            .collect();
        assert!((AABB::from_points(&points).max_extent() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_fit_is_idempotent() {
        let mut object = object_spanning(Vec3::splat(-7.0), Vec3::new(1.0, 3.0, 2.0), UpAxis::Y);

        let first = fit_to_origin_box(&mut object, 3.0).unwrap();
        let second = fit_to_origin_box(&mut object, 3.0).unwrap();

        for (a, b) in first.iter().zip(second.iter()) {
            assert!((*a - *b).length() < 1e-4);
        }
    }

    #[test]
    fn test_single_point_object_is_degenerate() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let mut object = SceneObject::new("dot", vec![Triangle::new(p, p, p, [1.0; 3])], UpAxis::Z);

        assert!(matches!(
            fit_to_origin_box(&mut object, 3.0),
            Err(CaptureError::DegenerateBounds { .. })
        ));
    }
}
