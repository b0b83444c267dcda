use clap::Parser;
use std::path::PathBuf;

use apkraster::{CollisionPolicy, DEFAULT_PROGRESS_INTERVAL, DegeneratePolicy, OutputFormat};

#[derive(Parser)]
#[command(name = "apkraster", version, about = "APK to image converter")]
pub struct CliArgs {
    /// Input directory containing APK files, or a single file
    pub input: PathBuf,

    /// Output directory for the converted images
    pub output_dir: PathBuf,

    /// Search subdirectories of the input directory
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Extension of the files to convert (default: apk)
    #[arg(long)]
    pub extension: Option<String>,

    /// Output format (png or tiff)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Handling of constant-valued inputs (fail or zero-fill)
    #[arg(long, value_enum)]
    pub degenerate: Option<DegeneratePolicy>,

    /// Handling of inputs sharing an output name (fail or disambiguate)
    #[arg(long, value_enum)]
    pub collision: Option<CollisionPolicy>,

    /// Worker threads; 0 uses one per core
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// JSON file with conversion parameters; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a JSON batch report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Seconds between progress lines; 0 disables the progress monitor
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL.as_secs())]
    pub progress_interval: u64,

    /// Enable logging (level from RUST_LOG, default debug)
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
