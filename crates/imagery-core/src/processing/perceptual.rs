//! # Perceptual Hashing Module
//!
//! Reduces an image of any resolution to a short hexadecimal fingerprint.
//! Visually similar images tend to produce identical or close fingerprints,
//! where closeness is the Hamming distance between the underlying bit strings.
//!
//! ## Algorithm
//!
//! 1. Downscale an owned copy of the image to `width × height` pixels
//! 2. Convert the copy to grayscale
//! 3. Take the ceiling of the per-channel means and join them as un-padded
//!    hex numerals (`<r><g><b>`) to form the "average" value
//! 4. Emit one bit per pixel, row-major: `1` when the packed pixel color is
//!    strictly greater than the average
//! 5. Render the bit string as a base-16 integer
//!
//! Step 3 is not a luminance formula. A mean of 5 contributes the single
//! digit `5`, so channel means below 16 shift the average into a much
//! smaller range than the packed pixel values it is compared against. Dark
//! images therefore hash towards all ones. Existing fingerprints depend on
//! this exact packing.
//!
//! The caller's image is never modified.

use image::{DynamicImage, RgbImage};
use log::{debug, trace};
use std::path::Path;

use crate::color::pack_rgb;
use crate::config::HashConfig;
use crate::error::{Error, Result};
use crate::processing::types::Fingerprint;

/// Calculate a perceptual hash with the given grid size and the default filter
pub fn compute_hash(img: &DynamicImage, hash_width: u32, hash_height: u32) -> Result<Fingerprint> {
    compute_hash_with(img, &HashConfig::new(hash_width, hash_height))
}

/// Calculate a perceptual hash using the dimensions and filter from `config`
pub fn compute_hash_with(img: &DynamicImage, config: &HashConfig) -> Result<Fingerprint> {
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::InvalidInput(format!(
            "cannot hash an image of {}x{} pixels",
            img.width(),
            img.height()
        )));
    }
    if config.width == 0 || config.height == 0 {
        return Err(Error::InvalidInput(format!(
            "hash dimensions must be positive, got {}x{}",
            config.width, config.height
        )));
    }

    let small = img
        .resize_exact(config.width, config.height, config.filter.into())
        .grayscale()
        .to_rgb8();

    let average = channel_average(&small);
    trace!("Perceptual hash average: {:#x}", average);

    let bits: Vec<bool> = small
        .pixels()
        .map(|pixel| pack_rgb(*pixel) as u64 > average)
        .collect();

    let fingerprint = Fingerprint::from_bits(&bits);
    debug!(
        "Hashed {}x{} image on a {}x{} grid: {}",
        img.width(),
        img.height(),
        config.width,
        config.height,
        fingerprint
    );

    Ok(fingerprint)
}

/// Calculate a perceptual hash from an image file
pub fn hash_file<P: AsRef<Path>>(path: P, config: &HashConfig) -> Result<Fingerprint> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let img = image::open(path)?;
    compute_hash_with(&img, config)
}

/// Ceiling of each channel mean, packed by hex-numeral concatenation
fn channel_average(img: &RgbImage) -> u64 {
    let count = img.width() as u64 * img.height() as u64;

    let mut sums = [0u64; 3];
    for pixel in img.pixels() {
        for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += channel as u64;
        }
    }

    hex_concat(sums.map(|sum| sum.div_ceil(count)))
}

/// Numeric value of the hex numerals of `values` written side by side.
///
/// Equivalent to parsing `format!("{:x}{:x}{:x}", ..)` as base 16.
fn hex_concat(values: [u64; 3]) -> u64 {
    values
        .iter()
        .fold(0, |acc, &value| (acc << (4 * hex_len(value))) | value)
}

/// Number of hex digits needed to write `value` (zero takes one)
fn hex_len(value: u64) -> u32 {
    if value == 0 {
        1
    } else {
        (u64::BITS - value.leading_zeros()).div_ceil(4)
    }
}
