use anyhow::{Context, Result, ensure};
use log::info;
use nalgebra::Vector3;
use std::path::Path;

/// A decoded texture: a row-major grid of RGB byte samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    samples: Vec<u8>,
}

impl Texture {
    /// Wraps an already decoded RGB grid (3 bytes per sample, no alpha).
    pub fn from_rgb(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "texture dimensions must be non-zero, got {}x{}",
            width,
            height
        );
        let expected = width as usize * height as usize * 3;
        ensure!(
            samples.len() == expected,
            "texture {}x{} needs {} bytes of RGB samples, got {}",
            width,
            height,
            expected,
            samples.len()
        );

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Decodes an image file into an RGB texture.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)
            .with_context(|| format!("failed to load texture {:?}", path_ref))?
            .to_rgb8();

        let (width, height) = img.dimensions();
        info!("Loaded texture: {:?} ({}x{})", path_ref, width, height);

        Self::from_rgb(width, height, img.into_raw())
    }

    /// Nearest-sample lookup with wrap-around addressing. Returns RGB in `[0, 1]`.
    ///
    /// Each coordinate maps to `|floor(c * size)| mod size`, so negative and
    /// out-of-range coordinates repeat the texture.
    pub fn map(&self, u: f32, v: f32) -> Vector3<f32> {
        let x = wrap(u, self.width);
        let y = wrap(v, self.height);

        let pos = (x + y * self.width as usize) * 3;
        let texel = &self.samples[pos..pos + 3];

        Vector3::new(
            texel[0] as f32 / 255.0,
            texel[1] as f32 / 255.0,
            texel[2] as f32 / 255.0,
        )
    }
}

#[inline]
fn wrap(coord: f32, size: u32) -> usize {
    let scaled = (coord * size as f32).floor();
    if !scaled.is_finite() {
        return 0;
    }
    (scaled.abs() as u64 % size as u64) as usize
}
