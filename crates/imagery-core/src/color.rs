//! Packed truecolor values.
//!
//! A packed color stores a pixel's channels in one integer as
//! `(red << 16) | (green << 8) | blue`. Alpha is not part of the value.

use image::{Pixel, Rgb};

/// Pack an RGB pixel into a single integer
#[inline]
pub fn pack_rgb(pixel: Rgb<u8>) -> u32 {
    let [r, g, b] = pixel.0;
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Pack any 8-bit pixel, ignoring alpha
#[inline]
pub fn pack_pixel<P: Pixel<Subpixel = u8>>(pixel: P) -> u32 {
    pack_rgb(pixel.to_rgb())
}

/// Split a packed color into `(red, green, blue)`
#[inline]
pub fn channels_of(packed: u32) -> (u8, u8, u8) {
    (
        ((packed >> 16) & 0xff) as u8,
        ((packed >> 8) & 0xff) as u8,
        (packed & 0xff) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_pack_rgb() {
        assert_eq!(pack_rgb(Rgb([0x12, 0x34, 0x56])), 0x123456);
        assert_eq!(pack_rgb(Rgb([255, 255, 255])), 0xffffff);
        assert_eq!(pack_rgb(Rgb([0, 0, 0])), 0);
    }

    #[test]
    fn test_pack_pixel_ignores_alpha() {
        assert_eq!(pack_pixel(Rgba([0xab, 0xcd, 0xef, 0x00])), 0xabcdef);
    }

    #[test]
    fn test_channels_of() {
        assert_eq!(channels_of(0xff0080), (0xff, 0x00, 0x80));
    }
}
