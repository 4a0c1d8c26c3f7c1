// Core modules
pub mod batch;
pub mod bitmap;
pub mod perceptual;
pub mod types;

// Expose perceptual hash calculations
pub use perceptual::{compute_hash, compute_hash_with, hash_file};

// Expose bitmap encoding
pub use bitmap::{
    convert_to_bitmap, encode_bitmap, encoded_len, save_bitmap, write_bitmap, BitmapHeader,
};

// Reexport batch functionality
pub use batch::{hash_files, hash_files_with_progress, hash_single_file};
pub use types::{Fingerprint, HashResult};
