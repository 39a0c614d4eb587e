use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use crate::scene::{SceneObject, Triangle, UpAxis};

/// Albedo for primitives without a material
const DEFAULT_COLOR: [f32; 3] = [0.7, 0.7, 0.7];

/// Loads every mesh of a glTF/GLB file and joins them into one scene object.
///
/// Node transforms are baked into the vertices. Geometry stays in glTF's
/// Y-up convention; the returned object carries the rotation into Z-up.
pub fn load_object(path: impl AsRef<Path>) -> Result<SceneObject> {
    let path = path.as_ref();
    log::info!("Loading glTF file: {:?}", path);

    let (gltf, buffers, _images) =
        gltf::import(path).context(format!("Failed to load glTF file: {:?}", path))?;

    log::debug!(
        "glTF loaded: {} scenes, {} nodes, {} meshes, {} materials",
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count(),
        gltf.materials().count()
    );

    let mut triangles = Vec::new();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut triangles)?;
        }
    }

    if triangles.is_empty() {
        log::warn!("No geometry found in glTF file {:?}", path);
    } else {
        log::info!("Extracted {} triangles from {:?}", triangles.len(), path);
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "object".to_string());

    Ok(SceneObject::new(name, triangles, UpAxis::Y))
}

/// Recursively processes glTF nodes
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    triangles: &mut Vec<Triangle>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, triangles)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, triangles)?;
    }

    Ok(())
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    triangles: &mut Vec<Triangle>,
) -> Result<()> {
    log::debug!("  Processing mesh: {:?}", mesh.name());

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "  Skipping primitive with unsupported mode {:?}",
                primitive.mode()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions = reader
            .read_positions()
            .context("Mesh primitive has no positions")?;

        let vertices: Vec<Vec3> = positions
            .map(|pos| transform.transform_point3(Vec3::from_array(pos)))
            .collect();

        let color = match primitive.material().index() {
            Some(_) => {
                let c = primitive.material().pbr_metallic_roughness().base_color_factor();
                [c[0], c[1], c[2]]
            }
            None => DEFAULT_COLOR,
        };

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            // No indices - treat as triangle list
            None => (0..vertices.len() as u32).collect(),
        };

        for tri in indices.chunks_exact(3) {
            let corner = |i: u32| {
                vertices
                    .get(i as usize)
                    .copied()
                    .with_context(|| format!("Index {} out of range in mesh {:?}", i, mesh.name()))
            };
            triangles.push(Triangle::new(
                corner(tri[0])?,
                corner(tri[1])?,
                corner(tri[2])?,
                color,
            ));
        }
    }

    Ok(())
}
