use crate::core::geometry::Vertex;
use crate::core::math::transform::TransformFactory;
use crate::scene::mesh::Mesh;
use crate::scene::texture::Texture;
use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use nalgebra::{Vector2, Vector3};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct BabylonScene {
    #[serde(default)]
    materials: Vec<BabylonMaterial>,
    #[serde(default)]
    meshes: Vec<BabylonMesh>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BabylonMaterial {
    id: String,
    #[serde(default)]
    name: String,
    diffuse_texture: Option<BabylonTexture>,
}

#[derive(Debug, Deserialize)]
struct BabylonTexture {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BabylonMesh {
    name: String,
    vertices: Vec<f32>,
    indices: Vec<usize>,
    #[serde(default)]
    uv_count: u32,
    #[serde(default)]
    position: [f32; 3],
    material_id: Option<String>,
}

/// Loads a Babylon-style JSON scene. Diffuse textures resolve relative to
/// the scene file's directory.
pub fn load_babylon<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>> {
    let path = path.as_ref();
    info!("Loading Babylon scene: {:?}", path);

    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read scene {:?}", path))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    parse_babylon(&content, base_dir).with_context(|| format!("failed to parse scene {:?}", path))
}

/// Parses a Babylon-style JSON document into meshes with computed face normals.
pub fn parse_babylon(json: &str, base_dir: &Path) -> Result<Vec<Mesh>> {
    let scene: BabylonScene = serde_json::from_str(json)?;

    // Material id -> diffuse texture, each image decoded once.
    let mut by_file: HashMap<&str, Option<Arc<Texture>>> = HashMap::new();
    let mut by_material: HashMap<&str, Option<Arc<Texture>>> = HashMap::new();
    for material in &scene.materials {
        let texture = material.diffuse_texture.as_ref().and_then(|tex| {
            by_file
                .entry(tex.name.as_str())
                .or_insert_with(|| match Texture::load(base_dir.join(&tex.name)) {
                    Ok(texture) => Some(Arc::new(texture)),
                    Err(e) => {
                        warn!("Material '{}': {:#}", material.name, e);
                        None
                    }
                })
                .clone()
        });
        by_material.insert(material.id.as_str(), texture);
    }

    let mut meshes = Vec::with_capacity(scene.meshes.len());
    for source in &scene.meshes {
        let mut mesh = build_mesh(source)?;
        if let Some(id) = source.material_id.as_deref()
            && source.uv_count > 0
        {
            mesh.texture = by_material.get(id).cloned().flatten();
        }

        debug!(
            "Mesh '{}': {} vertices, {} faces, textured: {}",
            mesh.name,
            mesh.vertices.len(),
            mesh.faces.len(),
            mesh.texture.is_some()
        );
        meshes.push(mesh);
    }

    info!("Babylon scene loaded: {} meshes", meshes.len());
    Ok(meshes)
}

fn build_mesh(source: &BabylonMesh) -> Result<Mesh> {
    // Each vertex is position (3) + normal (3) + 2 floats per UV set.
    let stride = match source.uv_count {
        0 => 6,
        1 => 8,
        2 => 10,
        n => bail!("mesh '{}': unsupported uvCount {}", source.name, n),
    };

    let vertex_count = source.vertices.len() / stride;
    let mut mesh = Mesh::new(source.name.clone());

    for chunk in source.vertices.chunks_exact(stride) {
        let position = Vector3::new(chunk[0], chunk[1], chunk[2]);
        let normal = Vector3::new(chunk[3], chunk[4], chunk[5]);

        let mut vertex = Vertex::new(position, normal);
        if source.uv_count > 0 {
            vertex = vertex.with_texcoord(Vector2::new(chunk[6], chunk[7]));
        }
        mesh.add_vertex(vertex);
    }

    for tri in source.indices.chunks_exact(3) {
        if let Some(&bad) = tri.iter().find(|&&i| i >= vertex_count) {
            bail!(
                "mesh '{}': index {} out of range for {} vertices",
                source.name,
                bad,
                vertex_count
            );
        }
        mesh.add_face(tri[0], tri[1], tri[2]);
    }

    mesh.world_matrix = TransformFactory::translation(&Vector3::from(source.position));
    mesh.calculate_face_normals();
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::transform_coordinates;

    const SCENE: &str = r#"{
        "producer": { "name": "test" },
        "materials": [
            { "name": "plain", "id": "m0" },
            { "name": "missing", "id": "m1", "diffuseTexture": { "name": "nope.png" } }
        ],
        "meshes": [
            {
                "name": "tri",
                "position": [1.0, 2.0, 3.0],
                "uvCount": 0,
                "materialId": "m0",
                "vertices": [
                    0.0, 0.5, 0.0,   0.0, 0.0, 1.0,
                   -0.5,-0.5, 0.0,   0.0, 0.0, 1.0,
                    0.5,-0.5, 0.0,   0.0, 0.0, 1.0
                ],
                "indices": [0, 1, 2]
            },
            {
                "name": "uv",
                "uvCount": 1,
                "materialId": "m1",
                "vertices": [
                    0.0, 0.0, 0.0,   1.0, 0.0, 0.0,   0.25, 0.75,
                    1.0, 0.0, 0.0,   1.0, 0.0, 0.0,   0.5, 0.5,
                    0.0, 1.0, 0.0,   1.0, 0.0, 0.0,   1.0, 1.0
                ],
                "indices": [0, 1, 2]
            }
        ]
    }"#;

    #[test]
    fn parses_meshes_with_stride_and_position() {
        let meshes = parse_babylon(SCENE, Path::new(".")).unwrap();
        assert_eq!(meshes.len(), 2);

        let tri = &meshes[0];
        assert_eq!(tri.name, "tri");
        assert_eq!(tri.vertices.len(), 3);
        assert_eq!(tri.faces.len(), 1);
        assert!(tri.vertices[0].texcoord.is_none());
        assert!((tri.faces[0].normal - Vector3::z()).norm() < 1e-6);

        let moved = transform_coordinates(&Vector3::zeros(), &tri.world_matrix);
        assert!((moved - Vector3::new(1.0, 2.0, 3.0)).norm() < 1e-6);
    }

    #[test]
    fn reads_uvs_and_tolerates_missing_texture_files() {
        let meshes = parse_babylon(SCENE, Path::new("/nonexistent")).unwrap();
        let uv = &meshes[1];

        assert_eq!(uv.vertices.len(), 3);
        assert_eq!(uv.vertices[0].texcoord, Some(Vector2::new(0.25, 0.75)));
        assert!(uv.texture.is_none());
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let json = r#"{ "meshes": [ {
            "name": "bad", "uvCount": 0,
            "vertices": [0,0,0, 0,0,1],
            "indices": [0, 1, 2]
        } ] }"#;
        let err = parse_babylon(json, Path::new(".")).unwrap_err();
        assert!(format!("{:#}", err).contains("out of range"));
    }

    #[test]
    fn rejects_unknown_uv_layout() {
        let json = r#"{ "meshes": [ {
            "name": "odd", "uvCount": 3, "vertices": [], "indices": []
        } ] }"#;
        assert!(parse_babylon(json, Path::new(".")).is_err());
    }
}
