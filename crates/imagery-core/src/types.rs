use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Output formats accepted by `Imagery::save`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaveFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
}

impl SaveFormat {
    /// Determine format from a name or file extension
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            "bmp" => Ok(Self::Bmp),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    /// Determine format from the extension of `path`
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        Self::from_name(ext)
    }
}

/// Pixel filters applied in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Desaturate using the image library's luminance transform
    Grayscale,

    /// Invert every color channel
    Negate,
}

/// Mirror direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    Horizontal,
    Vertical,
}

/// Right-angle rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise90,
    Half,
    CounterClockwise90,
}
