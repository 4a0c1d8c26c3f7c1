use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Largest fingerprint, in bits, a configuration may ask for
pub const MAX_HASH_BITS: u64 = 4096;

/// Resampling filter used when downscaling an image for hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResampleFilter {
    /// Nearest neighbour
    Nearest,

    /// Linear (area-averaging at small target sizes)
    #[default]
    Triangle,

    /// Cubic
    CatmullRom,

    /// Gaussian
    Gaussian,

    /// Lanczos with window 3
    Lanczos3,
}

impl ResampleFilter {
    /// Parse a filter from its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "nearest" => Some(Self::Nearest),
            "triangle" => Some(Self::Triangle),
            "catmullrom" | "catmull-rom" => Some(Self::CatmullRom),
            "gaussian" => Some(Self::Gaussian),
            "lanczos3" => Some(Self::Lanczos3),
            _ => None,
        }
    }
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Dimensions and filter for perceptual hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    /// Width of the downscaled grid
    pub width: u32,

    /// Height of the downscaled grid
    pub height: u32,

    /// Filter used for downscaling
    #[serde(default)]
    pub filter: ResampleFilter,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            filter: ResampleFilter::Triangle,
        }
    }
}

impl HashConfig {
    /// Create a hash configuration with the default filter
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Number of bits in a fingerprint produced with this configuration
    pub fn bits(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Configuration for hashing and conversion runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Perceptual hash settings
    #[serde(default)]
    pub hash: HashConfig,

    /// Number of threads to use for batch hashing (0 = auto)
    #[serde(default)]
    pub threads: usize,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hash: HashConfig::default(),
            threads: 0, // Auto
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.hash.width == 0 || self.hash.height == 0 {
            return Err(Error::Configuration(format!(
                "Hash dimensions must be positive, got {}x{}",
                self.hash.width, self.hash.height
            )));
        }

        if self.hash.bits() > MAX_HASH_BITS {
            return Err(Error::Configuration(format!(
                "Hash size of {} bits exceeds the maximum of {}",
                self.hash.bits(),
                MAX_HASH_BITS
            )));
        }

        Ok(())
    }
}
