use crate::scene::mesh::Mesh;
use nalgebra::{Point3, Vector3};

/// Analyzes the combined bounding box of `meshes` and rewrites every local
/// vertex position so the geometry is centered on the origin and its largest
/// dimension spans 1.8 units.
///
/// Normals are left untouched since the transform is a uniform scale plus a
/// translation. Returns the original center and the scaling factor used.
pub fn normalize_and_center(meshes: &mut [Mesh]) -> (Point3<f32>, f32) {
    let mut min_bound = Vector3::repeat(f32::MAX);
    let mut max_bound = Vector3::repeat(f32::MIN);
    let mut has_verts = false;

    for vertex in meshes.iter().flat_map(|m| m.vertices.iter()) {
        min_bound = min_bound.inf(&vertex.position);
        max_bound = max_bound.sup(&vertex.position);
        has_verts = true;
    }

    if !has_verts {
        return (Point3::origin(), 1.0);
    }

    let center = (min_bound + max_bound) / 2.0;
    let extent = max_bound - min_bound;
    let max_dimension = extent.max();

    let scale_factor = if max_dimension > 1e-6 {
        1.8 / max_dimension
    } else {
        1.0
    };

    for vertex in meshes.iter_mut().flat_map(|m| m.vertices.iter_mut()) {
        vertex.position = (vertex.position - center) * scale_factor;
    }

    (Point3::from(center), scale_factor)
}
