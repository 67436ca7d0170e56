use crate::core::color::{CLEAR_COLOR, pack_argb};
use nalgebra::Vector3;
use rayon::prelude::*;

/// Packed ARGB color buffer plus a matching per-pixel depth buffer.
///
/// Both buffers are row-major with a top-left origin. Smaller depth values
/// are nearer to the viewer.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![CLEAR_COLOR; size],
            depth_buffer: vec![f32::INFINITY; size],
        }
    }

    /// Resets every pixel to opaque black and every depth to +infinity.
    pub fn clear(&mut self) {
        self.color_buffer
            .par_iter_mut()
            .for_each(|pixel| *pixel = CLEAR_COLOR);
        self.depth_buffer
            .par_iter_mut()
            .for_each(|depth| *depth = f32::INFINITY);
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Writes a fragment if it lands on screen; off-screen fragments are dropped.
    #[inline]
    pub fn draw_point(&mut self, x: i32, y: i32, depth: f32, color: &Vector3<f32>) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.put_pixel(x as usize, y as usize, depth, pack_argb(color, 1.0));
        }
    }

    /// Depth-tested write. A stored depth strictly smaller than `depth` wins;
    /// equal depths are overwritten by the later fragment.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, depth: f32, color: u32) {
        let idx = self.index(x, y);

        if self.depth_buffer[idx] < depth {
            return;
        }

        self.depth_buffer[idx] = depth;
        self.color_buffer[idx] = color;
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depths(&self) -> &[f32] {
        &self.depth_buffer
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)])
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }
}
