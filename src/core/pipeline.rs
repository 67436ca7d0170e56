use crate::core::geometry::{ProjectedVertex, Vertex};
use crate::core::math::transform::{device_to_screen, transform_coordinates, transform_normal};
use nalgebra::{Matrix4, Vector3};

/// Per-frame matrices shared by every mesh.
#[derive(Debug, Clone, Copy)]
pub struct FrameTransforms {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
}

/// Per-mesh matrices derived from the mesh's world transform and the frame.
#[derive(Debug, Clone, Copy)]
pub struct MeshTransforms {
    pub world: Matrix4<f32>,
    /// `world · view`, used for culling.
    pub world_view: Matrix4<f32>,
    /// `world · view · projection`, used for projection.
    pub transform: Matrix4<f32>,
}

impl MeshTransforms {
    pub fn new(world: &Matrix4<f32>, frame: &FrameTransforms) -> Self {
        let world_view = world * frame.view;
        let transform = world_view * frame.projection;
        Self {
            world: *world,
            world_view,
            transform,
        }
    }

    /// A face whose normal, taken into view space, does not point towards
    /// the camera (z >= 0) is back-facing.
    #[inline]
    pub fn is_back_facing(&self, face_normal: &Vector3<f32>) -> bool {
        transform_normal(face_normal, &self.world_view).z >= 0.0
    }

    /// Vertex stage: projects to pixel space and carries world-space
    /// position and normal for lighting.
    ///
    /// The normal goes through the full positional world transform rather
    /// than a normal matrix, so translated meshes shade accordingly.
    pub fn project(&self, vertex: &Vertex, width: f32, height: f32) -> ProjectedVertex {
        let device = transform_coordinates(&vertex.position, &self.transform);
        let world_position = transform_coordinates(&vertex.position, &self.world);
        let world_normal = transform_coordinates(&vertex.normal, &self.world);

        ProjectedVertex {
            screen: device_to_screen(&device, width, height),
            world_position,
            world_normal,
            texcoord: vertex.texcoord,
        }
    }
}
