use crate::core::color::unpack_rgb;
use anyhow::{Context, Result, ensure};
use image::{ImageBuffer, Rgb};
use rayon::prelude::*;
use std::path::Path;

/// Converts a packed ARGB buffer into an RGB image, dropping alpha.
pub fn argb_to_image(
    pixels: &[u32],
    width: usize,
    height: usize,
) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>> {
    ensure!(
        pixels.len() == width * height,
        "pixel buffer holds {} pixels, expected {}x{}",
        pixels.len(),
        width,
        height
    );

    let mut raw = vec![0u8; width * height * 3];
    raw.par_chunks_mut(3)
        .zip(pixels.par_iter())
        .for_each(|(out, &pixel)| out.copy_from_slice(&unpack_rgb(pixel)));

    ImageBuffer::from_raw(width as u32, height as u32, raw)
        .context("image buffer size does not match its dimensions")
}

/// Saves a packed ARGB buffer to an image file; the format follows the extension.
pub fn save_argb_image<P: AsRef<Path>>(
    pixels: &[u32],
    width: usize,
    height: usize,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    argb_to_image(pixels, width, height)?
        .save(path)
        .with_context(|| format!("failed to save image to {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_row_major_pixels() {
        let pixels = [0xFFFF_0000, 0xFF00_FF00, 0xFF00_00FF, 0xFF10_2030];
        let img = argb_to_image(&pixels, 2, 2).unwrap();

        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([0, 255, 0]));
        assert_eq!(img.get_pixel(0, 1), &Rgb([0, 0, 255]));
        assert_eq!(img.get_pixel(1, 1), &Rgb([0x10, 0x20, 0x30]));
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        assert!(argb_to_image(&[0; 3], 2, 2).is_err());
    }
}
