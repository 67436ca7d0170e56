use crate::core::geometry::Vertex;
use crate::core::math::vector::normalize_or_zero;
use crate::scene::mesh::Mesh;
use anyhow::{Context, Result, bail};
use log::{info, warn};
use nalgebra::{Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file, producing one mesh per object in the file.
///
/// Objects without normals get smooth normals accumulated from their
/// triangles; objects without texture coordinates leave them unset.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("file not found: {:?}", path);
    }

    info!("Loading OBJ file: {:?}", path);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    // Materials (MTL) are ignored: textures come from the scene config.
    let (models, _materials) = tobj::load_obj(path, &load_options)
        .with_context(|| format!("failed to load OBJ {:?}", path))?;

    let meshes: Vec<Mesh> = models.iter().map(mesh_from_model).collect();

    info!(
        "OBJ loaded: {} meshes, {} vertices, {} faces",
        meshes.len(),
        meshes.iter().map(|m| m.vertices.len()).sum::<usize>(),
        meshes.iter().map(|m| m.faces.len()).sum::<usize>()
    );

    Ok(meshes)
}

fn mesh_from_model(model: &tobj::Model) -> Mesh {
    let source = &model.mesh;
    let num_vertices = source.positions.len() / 3;
    let has_normals = source.normals.len() == source.positions.len();
    let has_texcoords = source.texcoords.len() / 2 == num_vertices;

    let mut mesh = Mesh::new(model.name.clone());

    for i in 0..num_vertices {
        let position = Vector3::new(
            source.positions[i * 3],
            source.positions[i * 3 + 1],
            source.positions[i * 3 + 2],
        );
        let normal = if has_normals {
            Vector3::new(
                source.normals[i * 3],
                source.normals[i * 3 + 1],
                source.normals[i * 3 + 2],
            )
        } else {
            Vector3::zeros()
        };

        let mut vertex = Vertex::new(position, normal);
        if has_texcoords {
            vertex = vertex.with_texcoord(Vector2::new(
                source.texcoords[i * 2],
                source.texcoords[i * 2 + 1],
            ));
        }
        mesh.add_vertex(vertex);
    }

    for tri in source.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if a.max(b).max(c) >= num_vertices {
            warn!("Mesh '{}': skipping face with out-of-range index", model.name);
            continue;
        }
        mesh.add_face(a, b, c);
    }

    if !has_normals {
        warn!(
            "Mesh '{}' is missing normals. Computing smooth normals.",
            model.name
        );
        compute_smooth_normals(&mut mesh);
    }

    mesh.calculate_face_normals();
    mesh
}

/// Sums each triangle's (area-weighted) geometric normal into its vertices,
/// then normalizes. Counter-clockwise triangles face outward.
fn compute_smooth_normals(mesh: &mut Mesh) {
    let mut accumulated = vec![Vector3::zeros(); mesh.vertices.len()];

    for face in &mesh.faces {
        let a = mesh.vertices[face.a].position;
        let b = mesh.vertices[face.b].position;
        let c = mesh.vertices[face.c].position;
        let normal = (b - a).cross(&(c - a));

        accumulated[face.a] += normal;
        accumulated[face.b] += normal;
        accumulated[face.c] += normal;
    }

    for (vertex, normal) in mesh.vertices.iter_mut().zip(&accumulated) {
        vertex.normal = normalize_or_zero(normal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("softengine_{}_{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_positions_normals_and_uvs() {
        let path = write_temp(
            "quad.obj",
            "o quad\n\
             v -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0\n\
             vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
             vn 0 0 1\n\
             f 1/1/1 2/2/1 3/3/1 4/4/1\n",
        );

        let meshes = load_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(meshes.len(), 1);
        let quad = &meshes[0];
        assert_eq!(quad.name, "quad");
        assert_eq!(quad.faces.len(), 2);
        assert_eq!(quad.vertices.len(), 4);
        assert!(quad.vertices.iter().all(|v| v.texcoord.is_some()));
        for face in &quad.faces {
            assert!((face.normal - Vector3::z()).norm() < 1e-6);
        }
    }

    #[test]
    fn missing_normals_are_computed_from_winding() {
        let path = write_temp(
            "tri.obj",
            "o tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );

        let meshes = load_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        let tri = &meshes[0];
        assert!(tri.vertices.iter().all(|v| v.texcoord.is_none()));
        assert!(tri.vertices.iter().all(|v| (v.normal - Vector3::z()).norm() < 1e-6));
        assert!((tri.faces[0].normal - Vector3::z()).norm() < 1e-6);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_obj("/definitely/not/here.obj").is_err());
    }
}
