use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::ProjectedVertex;
use crate::core::math::interpolation::{gradient, interpolate};
use crate::scene::light::PointLight;
use crate::scene::texture::Texture;
use nalgebra::Vector3;

/// A projected vertex together with its diffuse intensity.
#[derive(Debug, Clone, Copy)]
struct ShadedVertex {
    vertex: ProjectedVertex,
    ndotl: f32,
}

/// Two vertices bounding one side of a scanline span, top to bottom.
type Edge<'a> = (&'a ShadedVertex, &'a ShadedVertex);

/// Scanline rasterizer with Gouraud shading and a single point light.
///
/// Attributes (depth, intensity, UV) are interpolated linearly in screen
/// space, first along the two edges bounding each scanline, then across
/// the span between them.
#[derive(Debug, Clone, Default)]
pub struct Rasterizer {
    pub light: PointLight,
}

impl Rasterizer {
    pub fn new(light: PointLight) -> Self {
        Self { light }
    }

    /// Scan-converts one screen-space triangle into the framebuffer.
    ///
    /// Degenerate triangles (zero height or zero width) emit nothing.
    pub fn draw_triangle(
        &self,
        framebuffer: &mut FrameBuffer,
        vertices: [&ProjectedVertex; 3],
        tint: &Vector3<f32>,
        texture: Option<&Texture>,
    ) {
        let [mut v1, mut v2, mut v3] = vertices;

        if vertices
            .iter()
            .any(|v| !(v.screen.x.is_finite() && v.screen.y.is_finite()))
        {
            return;
        }

        // Sort by ascending screen y.
        if v1.screen.y > v2.screen.y {
            std::mem::swap(&mut v1, &mut v2);
        }
        if v2.screen.y > v3.screen.y {
            std::mem::swap(&mut v2, &mut v3);
        }
        if v1.screen.y > v2.screen.y {
            std::mem::swap(&mut v1, &mut v2);
        }

        let s1 = self.shade(v1);
        let s2 = self.shade(v2);
        let s3 = self.shade(v3);

        let p1 = v1.screen;
        let p2 = v2.screen;
        let p3 = v3.screen;

        // Inverse slopes decide on which side of the long edge P1-P3 the
        // middle vertex lies. A flat top has no P1-P2 slope; there the x
        // order of P1 and P2 decides.
        let d_p1_p2 = if p2.y - p1.y > 0.0 {
            (p2.x - p1.x) / (p2.y - p1.y)
        } else {
            0.0
        };
        let d_p1_p3 = if p3.y - p1.y > 0.0 {
            (p3.x - p1.x) / (p3.y - p1.y)
        } else {
            0.0
        };
        let middle_on_right = if p2.y > p1.y {
            d_p1_p2 > d_p1_p3
        } else {
            p2.x > p1.x
        };

        // Rows outside the framebuffer would be discarded pixel by pixel anyway.
        let start_y = (p1.y.floor() as i32).max(0);
        let end_y = (p3.y.floor() as i32).min(framebuffer.height as i32 - 1);

        for y in start_y..=end_y {
            let upper_half = (y as f32) < p2.y;

            let (left, right): (Edge, Edge) = match (middle_on_right, upper_half) {
                (true, true) => ((&s1, &s3), (&s1, &s2)),
                (true, false) => ((&s1, &s3), (&s2, &s3)),
                (false, true) => ((&s1, &s2), (&s1, &s3)),
                (false, false) => ((&s2, &s3), (&s1, &s3)),
            };

            self.process_scan_line(framebuffer, y, left, right, tint, texture);
        }
    }

    fn shade(&self, vertex: &ProjectedVertex) -> ShadedVertex {
        ShadedVertex {
            vertex: *vertex,
            ndotl: self.light.ndotl(&vertex.world_position, &vertex.world_normal),
        }
    }

    /// Fills the pixels `[start_x, end_x)` of row `y` between two edges.
    fn process_scan_line(
        &self,
        framebuffer: &mut FrameBuffer,
        y: i32,
        (a, b): Edge,
        (c, d): Edge,
        tint: &Vector3<f32>,
        texture: Option<&Texture>,
    ) {
        let (pa, pb) = (a.vertex.screen, b.vertex.screen);
        let (pc, pd) = (c.vertex.screen, d.vertex.screen);

        let gradient1 = gradient(y as f32, pa.y, pb.y);
        let gradient2 = gradient(y as f32, pc.y, pd.y);

        // Span ends stay in f32: near the eye plane they can exceed i32.
        let start_x = interpolate(pa.x, pb.x, gradient1).floor();
        let end_x = interpolate(pc.x, pd.x, gradient2).floor();

        if end_x <= start_x {
            return;
        }

        let z1 = interpolate(pa.z, pb.z, gradient1);
        let z2 = interpolate(pc.z, pd.z, gradient2);

        let start_ndotl = interpolate(a.ndotl, b.ndotl, gradient1);
        let end_ndotl = interpolate(c.ndotl, d.ndotl, gradient2);

        let (uv_a, uv_b) = (a.vertex.uv(), b.vertex.uv());
        let (uv_c, uv_d) = (c.vertex.uv(), d.vertex.uv());
        let start_u = interpolate(uv_a.x, uv_b.x, gradient1);
        let end_u = interpolate(uv_c.x, uv_d.x, gradient2);
        let start_v = interpolate(uv_a.y, uv_b.y, gradient1);
        let end_v = interpolate(uv_c.y, uv_d.y, gradient2);

        let span = end_x - start_x;
        let first_x = start_x.max(0.0) as i32;
        let last_x = end_x.min(framebuffer.width as f32) as i32;

        for x in first_x..last_x {
            let t = (x as f32 - start_x) / span;

            let z = interpolate(z1, z2, t);
            let ndotl = interpolate(start_ndotl, end_ndotl, t);

            let texel = match texture {
                Some(texture) => texture.map(
                    interpolate(start_u, end_u, t),
                    interpolate(start_v, end_v, t),
                ),
                None => Vector3::new(1.0, 1.0, 1.0),
            };

            let color = tint.component_mul(&texel) * ndotl;
            framebuffer.draw_point(x, y, z, &color);
        }
    }
}
