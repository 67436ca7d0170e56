use nalgebra::Vector3;

/// Opaque black, the value every pixel is reset to by a clear.
pub const CLEAR_COLOR: u32 = 0xFF00_0000;

/// Converts a `[0, 1]` float channel to a byte, rounding to nearest.
#[inline(always)]
fn channel_to_byte(value: f32) -> u32 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u32
}

/// Packs an RGB color plus alpha into `A << 24 | R << 16 | G << 8 | B`.
#[inline]
pub fn pack_argb(color: &Vector3<f32>, alpha: f32) -> u32 {
    let a = channel_to_byte(alpha);
    let r = channel_to_byte(color.x);
    let g = channel_to_byte(color.y);
    let b = channel_to_byte(color.z);

    (a << 24) | (r << 16) | (g << 8) | b
}

/// Splits a packed pixel into its `[r, g, b]` bytes, dropping alpha.
#[inline]
pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_channels_in_argb_order() {
        let packed = pack_argb(&Vector3::new(1.0, 0.0, 0.5), 1.0);
        assert_eq!(packed, 0xFFFF_0080);
    }

    #[test]
    fn black_opaque_matches_clear_color() {
        assert_eq!(pack_argb(&Vector3::zeros(), 1.0), CLEAR_COLOR);
    }

    #[test]
    fn out_of_range_channels_saturate() {
        let packed = pack_argb(&Vector3::new(2.0, -1.0, 1.0), 1.0);
        assert_eq!(unpack_rgb(packed), [255, 0, 255]);
    }
}
