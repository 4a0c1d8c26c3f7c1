/// Synthetic images shared by the integration tests
use image::{DynamicImage, Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// A horizontal gradient with a distinct value in every channel
#[allow(dead_code)]
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
        ])
    }))
}

/// A checkerboard of `cell`-pixel squares
#[allow(dead_code)]
pub fn checkerboard(width: u32, height: u32, cell: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgb([230, 230, 230])
        } else {
            Rgb([20, 20, 20])
        }
    }))
}

/// A single flat color
#[allow(dead_code)]
pub fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// Save `img` as PNG inside `dir` and return its path
#[allow(dead_code)]
pub fn write_png(dir: &Path, name: &str, img: &DynamicImage) -> PathBuf {
    let path = dir.join(format!("{}.png", name));
    img.save(&path).unwrap();
    path
}
