//! Perceptual image hashing and raw bitmap encoding.
//!
//! This library provides two self-contained components on top of the
//! `image` crate:
//! - A perceptual hash that reduces any image to a short hex fingerprint
//! - An uncompressed 24-bit BMP encoder with a byte-exact header layout
//!
//! A thin `Imagery` editor, parallel batch hashing and file logging round
//! out the crate.

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::{Config, HashConfig, LogLevel, ResampleFilter};
pub use error::{Error, Result};
pub use imagery::Imagery;
pub use processing::{
    compute_hash, compute_hash_with, convert_to_bitmap, encode_bitmap, hash_file, hash_files,
    save_bitmap, write_bitmap, Fingerprint, HashResult,
};
pub use types::*;

// -- Public Modules --
pub mod color;
pub mod config;
pub mod imagery;
pub mod logging;
pub mod processing;
pub mod types;
