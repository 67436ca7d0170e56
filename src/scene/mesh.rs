use crate::core::geometry::{Face, Vertex};
use crate::core::math::vector::normalize_or_zero;
use crate::scene::texture::Texture;
use nalgebra::{Matrix4, Vector2, Vector3};
use std::sync::Arc;

/// A named triangle mesh: a flat vertex array, faces indexing into it,
/// a world transform owned by the host and an optional texture.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub world_matrix: Matrix4<f32>,
    pub texture: Option<Arc<Texture>>,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            faces: Vec::new(),
            world_matrix: Matrix4::identity(),
            texture: None,
        }
    }

    pub fn add_vertex(&mut self, vertex: Vertex) -> &mut Self {
        self.vertices.push(vertex);
        self
    }

    pub fn add_face(&mut self, a: usize, b: usize, c: usize) -> &mut Self {
        self.faces.push(Face::new(a, b, c));
        self
    }

    /// Sets every face normal to the normalized average of its vertex normals.
    ///
    /// Must run after the vertex and face lists are complete.
    pub fn calculate_face_normals(&mut self) {
        let vertices = &self.vertices;
        for face in &mut self.faces {
            let sum = vertices[face.a].normal + vertices[face.b].normal + vertices[face.c].normal;
            face.normal = normalize_or_zero(&(sum / 3.0));
        }
    }

    /// Axis-aligned cube centered on the origin: 8 shared vertices with
    /// corner normals and 12 triangles, face normals precomputed.
    pub fn cube(name: impl Into<String>, size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::new(name);

        let corners = [
            (-h, h, h),
            (h, h, h),
            (-h, -h, h),
            (h, -h, h),
            (-h, h, -h),
            (h, h, -h),
            (h, -h, -h),
            (-h, -h, -h),
        ];
        for (i, &(x, y, z)) in corners.iter().enumerate() {
            let position = Vector3::new(x, y, z);
            // Corner UVs tile the texture once across each face.
            let uv = Vector2::new((i % 2) as f32, ((i / 2) % 2) as f32);
            mesh.add_vertex(Vertex::new(position, normalize_or_zero(&position)).with_texcoord(uv));
        }

        let faces = [
            (0, 1, 2),
            (1, 2, 3),
            (1, 3, 6),
            (1, 5, 6),
            (0, 1, 4),
            (1, 4, 5),
            (2, 3, 7),
            (3, 6, 7),
            (0, 2, 7),
            (0, 4, 7),
            (4, 5, 6),
            (4, 6, 7),
        ];
        for &(a, b, c) in &faces {
            mesh.add_face(a, b, c);
        }

        mesh.calculate_face_normals();
        mesh
    }

    /// A single triangle in the z = 0 plane, facing +Z.
    pub fn triangle(name: impl Into<String>) -> Self {
        let mut mesh = Self::new(name);
        let normal = Vector3::z();

        mesh.add_vertex(Vertex::new(Vector3::new(0.0, 0.5, 0.0), normal).with_texcoord(Vector2::new(0.5, 1.0)))
            .add_vertex(Vertex::new(Vector3::new(-0.5, -0.5, 0.0), normal).with_texcoord(Vector2::new(0.0, 0.0)))
            .add_vertex(Vertex::new(Vector3::new(0.5, -0.5, 0.0), normal).with_texcoord(Vector2::new(1.0, 0.0)))
            .add_face(0, 1, 2);

        mesh.calculate_face_normals();
        mesh
    }
}
