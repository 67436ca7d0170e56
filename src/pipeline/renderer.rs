use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::ProjectedVertex;
use crate::core::math::transform::TransformFactory;
use crate::core::pipeline::{FrameTransforms, MeshTransforms};
use crate::core::rasterizer::Rasterizer;
use crate::scene::camera::Camera;
use crate::scene::light::PointLight;
use crate::scene::mesh::Mesh;
use log::trace;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Fixed parameters of the projection and shading stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub light: PointLight,
    /// Flat color multiplied into every fragment.
    pub tint: Vector3<f32>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fov: 0.78,
            near: 0.01,
            far: 1.0,
            light: PointLight::default(),
            tint: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Counters for one `render` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub meshes: usize,
    pub faces_drawn: usize,
    pub faces_culled: usize,
}

/// The high-level renderer that owns the buffers and drives the pipeline
/// stages for a frame. The light lives only in `settings`; each `render`
/// call hands it to a fresh rasterizer.
///
/// Host contract per frame: mutate mesh transforms, `clear()`, `render()`,
/// then read `pixels()`.
pub struct Renderer {
    pub settings: RenderSettings,
    framebuffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_settings(width, height, RenderSettings::default())
    }

    pub fn with_settings(width: usize, height: usize, settings: RenderSettings) -> Self {
        Self {
            settings,
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.framebuffer.width
    }

    pub fn height(&self) -> usize {
        self.framebuffer.height
    }

    /// Packed ARGB pixels, row-major, top-left origin.
    pub fn pixels(&self) -> &[u32] {
        self.framebuffer.pixels()
    }

    pub fn depths(&self) -> &[f32] {
        self.framebuffer.depths()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        self.framebuffer.get_pixel(x, y)
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Resets color to opaque black and depth to +infinity.
    /// Skipping this between frames leaves stale depth behind.
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Renders every mesh as seen from `camera` into the owned buffers.
    pub fn render(&mut self, camera: &Camera, meshes: &[Mesh]) -> FrameStats {
        let frame = FrameTransforms {
            view: camera.view_matrix(),
            projection: TransformFactory::perspective_fov(
                self.settings.fov,
                self.width() as f32 / self.height() as f32,
                self.settings.near,
                self.settings.far,
            ),
        };
        let rasterizer = Rasterizer::new(self.settings.light);

        let mut stats = FrameStats {
            meshes: meshes.len(),
            ..Default::default()
        };

        for mesh in meshes {
            let (drawn, culled) = self.draw_mesh(&rasterizer, mesh, &frame);
            trace!("Mesh '{}': {} faces drawn, {} culled", mesh.name, drawn, culled);
            stats.faces_drawn += drawn;
            stats.faces_culled += culled;
        }

        stats
    }

    /// Draws a mesh, returning `(drawn, culled)` face counts.
    fn draw_mesh(
        &mut self,
        rasterizer: &Rasterizer,
        mesh: &Mesh,
        frame: &FrameTransforms,
    ) -> (usize, usize) {
        let transforms = MeshTransforms::new(&mesh.world_matrix, frame);
        let width = self.width() as f32;
        let height = self.height() as f32;

        // 1. Vertex stage. Pure per-vertex work, so it runs in parallel.
        let projected: Vec<ProjectedVertex> = mesh
            .vertices
            .par_iter()
            .map(|vertex| transforms.project(vertex, width, height))
            .collect();

        // 2. Cull + rasterize, sequentially in face order so equal-depth
        // overwrites stay deterministic.
        let tint = self.settings.tint;
        let texture = mesh.texture.as_deref();
        let mut drawn = 0;
        let mut culled = 0;

        for face in &mesh.faces {
            if transforms.is_back_facing(&face.normal) {
                culled += 1;
                continue;
            }

            rasterizer.draw_triangle(
                &mut self.framebuffer,
                [&projected[face.a], &projected[face.b], &projected[face.c]],
                &tint,
                texture,
            );
            drawn += 1;
        }

        (drawn, culled)
    }
}
