mod common;

use imagery_core::processing::hash_files;
use imagery_core::{compute_hash, hash_file, Config, Error, HashConfig, Imagery};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_uniform_gray_is_zero() {
    let img = common::solid(8, 8, [128, 128, 128]);
    assert_eq!(compute_hash(&img, 8, 8).unwrap().as_str(), "0");
}

#[test]
fn test_same_image_same_fingerprint() {
    let img = common::gradient(120, 80);
    assert_eq!(
        compute_hash(&img, 8, 8).unwrap(),
        compute_hash(&img, 8, 8).unwrap()
    );
}

#[test]
fn test_rescaled_copy_hashes_alike() {
    let large = common::checkerboard(256, 256, 64);
    let small = common::checkerboard(64, 64, 16);

    assert_eq!(
        compute_hash(&large, 4, 4).unwrap(),
        compute_hash(&small, 4, 4).unwrap()
    );
}

#[test]
fn test_checkerboard_pattern() {
    // 4x4 cells land one per hash pixel: rows 1010 / 0101 alternate
    let img = common::checkerboard(64, 64, 16);
    assert_eq!(compute_hash(&img, 4, 4).unwrap().as_str(), "a5a5");
}

#[test]
fn test_odd_bit_counts() {
    let img = common::checkerboard(30, 30, 10);
    let fingerprint = compute_hash(&img, 3, 3).unwrap();

    // 9 bits: 101 010 101 = 0x155
    assert_eq!(fingerprint.as_str(), "155");
}

#[test]
fn test_invalid_inputs() {
    let img = common::gradient(10, 10);
    assert!(matches!(compute_hash(&img, 0, 0), Err(Error::InvalidInput(_))));

    let empty = common::solid(0, 0, [0, 0, 0]);
    assert!(matches!(
        compute_hash(&empty, 8, 8),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_facade_matches_free_function() {
    let img = common::gradient(33, 17);
    let facade = Imagery::from_image(img.clone());
    assert_eq!(
        facade.phash(&HashConfig::default()).unwrap(),
        compute_hash(&img, 8, 8).unwrap()
    );
}

#[test]
fn test_batch_matches_single_file_hashes() {
    let dir = tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..6)
        .map(|i| {
            let img = common::checkerboard(48, 48, 4 + i * 2);
            common::write_png(dir.path(), &format!("board{}", i), &img)
        })
        .collect();

    let config = Config::default();
    let results = hash_files(&paths, &config);

    assert_eq!(results.len(), paths.len());
    for (result, path) in results.iter().zip(&paths) {
        assert_eq!(&result.path, path);
        assert_eq!(
            result.fingerprint.as_ref().unwrap(),
            &hash_file(path, &config.hash).unwrap()
        );
    }
}
