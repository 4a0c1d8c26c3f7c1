use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, LevelFilter};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use imagery_core::logging::{init_logger, log_encode_error};
use imagery_core::processing::hash_files_with_progress;
use imagery_core::{convert_to_bitmap, Config, HashResult, LogLevel, ResampleFilter};

#[derive(Parser)]
#[command(name = "imagery")]
#[command(about = "Perceptual image hashing and BMP conversion")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to rotating files in this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the perceptual hash of each image
    Hash {
        /// Images to hash
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Width of the hash grid
        #[arg(long)]
        width: Option<u32>,

        /// Height of the hash grid
        #[arg(long)]
        height: Option<u32>,

        /// Downscaling filter (nearest, triangle, catmullrom, gaussian, lanczos3)
        #[arg(long)]
        filter: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert an image to an uncompressed 24-bit BMP
    ToBmp {
        /// Image to convert
        input: PathBuf,

        /// Destination BMP file
        output: PathBuf,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "imagery.json")]
        path: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::default(),
    };

    // Set log level based on verbosity
    config.log_level = match cli.verbose {
        0 => config.log_level,
        1 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };
    init_logging(&cli, config.log_level)?;

    match cli.command {
        Commands::Hash {
            files,
            width,
            height,
            filter,
            json,
        } => {
            if let Some(width) = width {
                config.hash.width = width;
            }
            if let Some(height) = height {
                config.hash.height = height;
            }
            if let Some(name) = filter {
                config.hash.filter = ResampleFilter::from_name(&name)
                    .with_context(|| format!("Unknown filter: {}", name))?;
            }
            config.validate()?;

            let results = hash_with_progress(&files, &config)?;
            print_results(&results, json)?;

            let failures = results.iter().filter(|r| !r.is_ok()).count();
            if failures > 0 {
                anyhow::bail!("{} of {} images could not be hashed", failures, results.len());
            }
            Ok(())
        }

        Commands::ToBmp { input, output } => {
            info!("Converting {} to {}", input.display(), output.display());
            if let Err(e) = convert_to_bitmap(&input, &output) {
                log_encode_error(&output, &e);
                return Err(e).with_context(|| format!("Failed to convert {}", input.display()));
            }
            println!("Wrote {}", output.display());
            Ok(())
        }

        Commands::GenerateConfig { path } => {
            let config = Config::default();
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}

fn init_logging(cli: &Cli, level: LogLevel) -> anyhow::Result<()> {
    let level: LevelFilter = level.into();
    match &cli.log_dir {
        Some(dir) => init_logger(dir, level)?,
        None => env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .init(),
    }
    Ok(())
}

fn hash_with_progress(files: &[PathBuf], config: &Config) -> anyhow::Result<Vec<HashResult>> {
    if files.len() < 2 {
        return Ok(hash_files_with_progress(files, config, None));
    }

    let progress_bar = ProgressBar::new(files.len() as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{eta}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
    {
        progress_bar.set_style(style.progress_chars("##-"));
    }
    progress_bar.set_message("Computing image hashes...");

    let counter = Arc::new(AtomicUsize::new(0));
    let results = std::thread::scope(|scope| {
        let worker = scope.spawn(|| hash_files_with_progress(files, config, Some(&counter)));

        while !worker.is_finished() {
            progress_bar.set_position(counter.load(Ordering::Relaxed) as u64);
            std::thread::sleep(Duration::from_millis(100));
        }
        worker.join()
    });

    progress_bar.set_position(counter.load(Ordering::Relaxed) as u64);
    progress_bar.finish_and_clear();

    results.map_err(|_| {
        error!("Hashing worker panicked");
        anyhow::anyhow!("Hashing worker panicked")
    })
}

fn print_results(results: &[HashResult], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    for result in results {
        match (&result.fingerprint, &result.error) {
            (Some(fingerprint), _) => println!("{}  {}", fingerprint, result.path.display()),
            (None, Some(e)) => eprintln!("error  {}: {}", result.path.display(), e),
            (None, None) => eprintln!("error  {}", result.path.display()),
        }
    }
    Ok(())
}
