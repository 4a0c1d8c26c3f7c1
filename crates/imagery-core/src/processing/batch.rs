//! Parallel perceptual hashing of many image files.
//!
//! Each file is decoded and hashed independently on the rayon pool. A file
//! that cannot be read or decoded is reported in its own `HashResult` and
//! does not stop the rest of the batch. Results come back in input order.

use log::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::config::{Config, HashConfig};
use crate::logging::log_hash_error;
use crate::processing::perceptual::hash_file;
use crate::processing::types::HashResult;

/// Hash a single file, capturing any failure in the result
pub fn hash_single_file(path: &Path, config: &HashConfig) -> HashResult {
    match hash_file(path, config) {
        Ok(fingerprint) => HashResult {
            path: path.to_path_buf(),
            fingerprint: Some(fingerprint),
            error: None,
        },
        Err(e) => {
            log_hash_error(path, &e);
            HashResult {
                path: path.to_path_buf(),
                fingerprint: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Hash `paths` in parallel
pub fn hash_files(paths: &[PathBuf], config: &Config) -> Vec<HashResult> {
    hash_files_with_progress(paths, config, None)
}

/// Hash `paths` in parallel, bumping `progress_counter` once per finished file
pub fn hash_files_with_progress(
    paths: &[PathBuf],
    config: &Config,
    progress_counter: Option<&Arc<AtomicUsize>>,
) -> Vec<HashResult> {
    let start = Instant::now();
    info!("Hashing {} images...", paths.len());

    let hash_all = || -> Vec<HashResult> {
        paths
            .par_iter()
            .map(|path| {
                let result = hash_single_file(path, &config.hash);
                if let Some(counter) = progress_counter {
                    counter.fetch_add(1, Ordering::Relaxed);
                }
                result
            })
            .collect()
    };

    let results = if config.threads > 0 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
        {
            Ok(pool) => pool.install(hash_all),
            Err(e) => {
                warn!(
                    "Failed to build a {}-thread pool ({}), using the global pool",
                    config.threads, e
                );
                hash_all()
            }
        }
    } else {
        hash_all()
    };

    let failures = results.iter().filter(|r| !r.is_ok()).count();
    info!(
        "Batch completed: {} successful, {} errors in {:.2?}",
        results.len() - failures,
        failures,
        start.elapsed()
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    #[test]
    fn test_failures_do_not_abort_batch() {
        let dir = tempdir().unwrap();

        let good = dir.path().join("good.png");
        RgbImage::from_pixel(16, 16, Rgb([200, 200, 200]))
            .save(&good)
            .unwrap();

        let corrupt = dir.path().join("corrupt.png");
        std::fs::write(&corrupt, b"NOT AN IMAGE").unwrap();

        let missing = dir.path().join("missing.png");

        let paths = vec![good.clone(), corrupt.clone(), missing.clone()];
        let counter = Arc::new(AtomicUsize::new(0));
        let results = hash_files_with_progress(&paths, &Config::default(), Some(&counter));

        assert_eq!(counter.load(Ordering::Relaxed), 3);
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].path, good);
        assert_eq!(results[0].fingerprint.as_ref().unwrap().as_str(), "0");

        assert_eq!(results[1].path, corrupt);
        assert!(results[1].fingerprint.is_none());
        assert!(results[1].error.is_some());

        assert_eq!(results[2].path, missing);
        assert!(results[2].error.as_ref().unwrap().contains("not found"));
    }

    #[test]
    fn test_dedicated_pool() {
        let dir = tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..4)
            .map(|i| {
                let path = dir.path().join(format!("img{}.png", i));
                RgbImage::from_pixel(8, 8, Rgb([100, 100, 100]))
                    .save(&path)
                    .unwrap();
                path
            })
            .collect();

        let config = Config {
            threads: 2,
            ..Config::default()
        };
        let results = hash_files(&paths, &config);

        assert!(results.iter().all(HashResult::is_ok));
        for (result, path) in results.iter().zip(&paths) {
            assert_eq!(&result.path, path);
        }
    }
}
