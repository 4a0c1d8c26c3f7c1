//! Uncompressed 24-bit BMP encoding.
//!
//! Writes a `BITMAPFILEHEADER` + `BITMAPINFOHEADER` pair followed by
//! bottom-up BGR scanlines. No external codec is involved.
//!
//! Two header details are fixed by existing consumers and must not change:
//! the row padding is `width % 4` bytes, and the file-size field is
//! `54 + (width + padding) * height` rather than the real stream length.

use byteorder::{WriteBytesExt, LE};
use image::{GenericImageView, Pixel};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use crate::color::pack_pixel;
use crate::error::{Error, Result};

/// Bytes before the first scanline
pub const HEADER_SIZE: u32 = 54;

const SIGNATURE: [u8; 2] = *b"BM";
const INFO_HEADER_SIZE: u32 = 40;
const PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 24;
const BYTES_PER_PIXEL: usize = 3;

/// The fixed 54-byte BMP header.
///
/// Only the size fields vary; every other field is a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Value of the file-size field
    pub file_size: u32,

    /// Width of the image in pixels
    pub width: u32,

    /// Height of the image in pixels
    pub height: u32,
}

impl BitmapHeader {
    /// Header for an image of the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let padded_width = width as u64 + row_padding(width) as u64;
        let file_size = HEADER_SIZE as u64 + padded_width * height as u64;

        Self {
            // The field is 32 bits wide; larger values keep their low bits
            file_size: file_size as u32,
            width,
            height,
        }
    }

    /// Write the header, little-endian
    pub fn write_into<W: Write>(&self, output: &mut W) -> std::io::Result<()> {
        output.write_all(&SIGNATURE)?;
        output.write_u32::<LE>(self.file_size)?;
        output.write_u32::<LE>(0)?; // reserved
        output.write_u32::<LE>(HEADER_SIZE)?;

        output.write_u32::<LE>(INFO_HEADER_SIZE)?;
        output.write_u32::<LE>(self.width)?;
        output.write_u32::<LE>(self.height)?;
        output.write_u16::<LE>(PLANES)?;
        output.write_u16::<LE>(BITS_PER_PIXEL)?;
        output.write_u32::<LE>(0)?; // compression: none
        output.write_u32::<LE>(0)?; // image size, may be 0 when uncompressed
        output.write_u32::<LE>(0)?; // horizontal resolution
        output.write_u32::<LE>(0)?; // vertical resolution
        output.write_u32::<LE>(0)?; // palette colors
        output.write_u32::<LE>(0)?; // important colors

        Ok(())
    }

    /// The header as raw bytes
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE as usize] {
        let mut bytes = [0u8; HEADER_SIZE as usize];
        // A 54-byte buffer always holds the 54-byte header
        let _ = self.write_into(&mut Cursor::new(&mut bytes[..]));
        bytes
    }
}

/// Null bytes appended after each scanline
#[inline]
pub fn row_padding(width: u32) -> usize {
    (width % 4) as usize
}

/// Number of bytes `write_bitmap` emits for an image of the given size
pub fn encoded_len(width: u32, height: u32) -> usize {
    let row = width as usize * BYTES_PER_PIXEL + row_padding(width);
    HEADER_SIZE as usize + row * height as usize
}

/// Serialize `img` as a 24-bit BMP into `output` and flush it
pub fn write_bitmap<I, W>(img: &I, mut output: W) -> Result<()>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
    W: Write,
{
    let (width, height) = img.dimensions();
    BitmapHeader::new(width, height).write_into(&mut output)?;

    let padding = row_padding(width);
    let mut row = Vec::with_capacity(width as usize * BYTES_PER_PIXEL + padding);

    for y in (0..height).rev() {
        row.clear();
        for x in 0..width {
            // Low, middle and high byte of the packed color: blue, green, red
            row.write_u24::<LE>(pack_pixel(img.get_pixel(x, y)))?;
        }
        row.resize(row.len() + padding, 0);
        output.write_all(&row)?;
    }

    output.flush()?;
    Ok(())
}

/// Serialize `img` as a 24-bit BMP in memory
pub fn encode_bitmap<I>(img: &I) -> Result<Vec<u8>>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = img.dimensions();
    let mut bytes = Vec::with_capacity(encoded_len(width, height));
    write_bitmap(img, &mut bytes)?;
    Ok(bytes)
}

/// Write `img` as a 24-bit BMP file at `path`.
///
/// A partially written file is removed when encoding fails.
pub fn save_bitmap<I, P>(img: &I, path: P) -> Result<()>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)?;

    if let Err(e) = write_bitmap(img, BufWriter::new(file)) {
        warn!("Failed to write bitmap {}: {}", path.display(), e);
        if let Err(cleanup) = std::fs::remove_file(path) {
            warn!("Could not remove partial file {}: {}", path.display(), cleanup);
        }
        return Err(e);
    }

    debug!(
        "Wrote {}x{} bitmap to {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}

/// Decode `src` and write it to `dst` as a 24-bit BMP
pub fn convert_to_bitmap<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<()> {
    let src = src.as_ref();
    if !src.exists() {
        return Err(Error::FileNotFound(src.to_path_buf()));
    }

    let img = image::open(src)?;
    save_bitmap(&img, dst)
}
