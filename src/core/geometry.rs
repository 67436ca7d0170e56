use nalgebra::{Point3, Vector2, Vector3};

/// Represents a single vertex of a mesh in local (object) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Vector3<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Texture coordinates (UV), when the source provides them.
    pub texcoord: Option<Vector2<f32>>,
}

impl Vertex {
    pub fn new(position: Vector3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            position,
            normal,
            texcoord: None,
        }
    }

    pub fn with_texcoord(mut self, texcoord: Vector2<f32>) -> Self {
        self.texcoord = Some(texcoord);
        self
    }
}

/// A triangle referencing three vertices of its owning mesh by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    /// Normalized average of the three vertex normals.
    /// Filled in by `Mesh::calculate_face_normals`.
    pub normal: Vector3<f32>,
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self {
            a,
            b,
            c,
            normal: Vector3::zeros(),
        }
    }
}

/// Output of the vertex stage: the screen-space position plus the
/// world-space attributes needed for lighting and texturing.
///
/// Produced fresh every frame and never stored on the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedVertex {
    /// Pixel x, pixel y (top-left origin) and depth.
    pub screen: Point3<f32>,
    pub world_position: Vector3<f32>,
    pub world_normal: Vector3<f32>,
    pub texcoord: Option<Vector2<f32>>,
}

impl ProjectedVertex {
    /// Texture coordinate used for interpolation; `(0, 0)` when absent.
    #[inline]
    pub fn uv(&self) -> Vector2<f32> {
        self.texcoord.unwrap_or_else(Vector2::zeros)
    }
}
