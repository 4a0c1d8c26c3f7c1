//! A small owned image editor over `image::DynamicImage`.
//!
//! Everything except `phash` and the BMP branch of `save` is delegation to
//! the `image` crate.

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, ImageFormat};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::HashConfig;
use crate::error::{Error, Result};
use crate::processing::bitmap::{encode_bitmap, save_bitmap};
use crate::processing::perceptual::compute_hash_with;
use crate::processing::types::Fingerprint;
use crate::types::{Filter, Flip, Rotation, SaveFormat};

/// JPEG quality used when `save` is called without one
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// An owned image with chainable editing operations
#[derive(Debug, Clone)]
pub struct Imagery {
    image: DynamicImage,
}

impl Imagery {
    /// Decode an image file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        Ok(Self::from_image(image::open(path)?))
    }

    /// Decode an image file, returning `None` on any failure
    pub fn try_open<P: AsRef<Path>>(path: P) -> Option<Self> {
        Self::open(path).ok()
    }

    /// A black truecolor canvas
    pub fn with_size(width: u32, height: u32) -> Self {
        Self::from_image(DynamicImage::new_rgb8(width, height))
    }

    /// Wrap an already decoded image
    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    /// Resample to exactly `width × height`
    pub fn resize(&mut self, width: u32, height: u32) -> &mut Self {
        self.image = self
            .image
            .resize_exact(width, height, imageops::FilterType::Triangle);
        self
    }

    /// Keep the rectangle between `(x, y)` and `(x2, y2)`
    pub fn crop(&mut self, x: u32, y: u32, x2: u32, y2: u32) -> &mut Self {
        let width = x2.saturating_sub(x);
        let height = y2.saturating_sub(y);
        self.image = self.image.crop_imm(x, y, width, height);
        self
    }

    pub fn flip(&mut self, direction: Flip) -> &mut Self {
        self.image = match direction {
            Flip::Horizontal => self.image.fliph(),
            Flip::Vertical => self.image.flipv(),
        };
        self
    }

    pub fn rotate(&mut self, rotation: Rotation) -> &mut Self {
        self.image = match rotation {
            Rotation::Clockwise90 => self.image.rotate90(),
            Rotation::Half => self.image.rotate180(),
            Rotation::CounterClockwise90 => self.image.rotate270(),
        };
        self
    }

    pub fn filter(&mut self, filter: Filter) -> &mut Self {
        match filter {
            // Keep a color layout so later saves and hashes see RGB
            Filter::Grayscale => {
                self.image = DynamicImage::ImageRgba8(self.image.grayscale().to_rgba8())
            }
            Filter::Negate => self.image.invert(),
        }
        self
    }

    /// Perceptual hash of the current image
    pub fn phash(&self, config: &HashConfig) -> Result<Fingerprint> {
        compute_hash_with(&self.image, config)
    }

    /// The current image as a 24-bit BMP
    pub fn to_bitmap(&self) -> Result<Vec<u8>> {
        encode_bitmap(&self.image)
    }

    /// Save to `path` in `format`.
    ///
    /// `quality` only affects JPEG output and is clamped to 1..=100.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
        format: SaveFormat,
        quality: Option<u8>,
    ) -> Result<&Self> {
        let path = path.as_ref();
        debug!("Saving {} as {:?}", path.display(), format);

        match format {
            SaveFormat::Bmp => save_bitmap(&self.image, path)?,
            SaveFormat::Jpeg => {
                let quality = quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(1, 100);
                let mut writer = BufWriter::new(File::create(path)?);
                JpegEncoder::new_with_quality(&mut writer, quality)
                    .encode_image(&self.image.to_rgb8())?;
                writer.flush()?;
            }
            SaveFormat::Png => self.image.save_with_format(path, ImageFormat::Png)?,
            SaveFormat::Gif => self
                .image
                .to_rgba8()
                .save_with_format(path, ImageFormat::Gif)?,
        }

        Ok(self)
    }
}

impl From<DynamicImage> for Imagery {
    fn from(image: DynamicImage) -> Self {
        Self::from_image(image)
    }
}
