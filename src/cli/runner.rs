use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use apkraster::{BatchReport, CancelToken, ConversionParams, convert, process_directory_to_path};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Config file (if any) first, then explicit flags on top.
fn resolve_params(args: &CliArgs) -> Result<ConversionParams, AppError> {
    let mut params = match &args.config {
        Some(path) => ConversionParams::from_json_file(path)?,
        None => ConversionParams::default(),
    };

    if let Some(extension) = &args.extension {
        let trimmed = extension.trim_start_matches('.');
        if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
            return Err(AppError::InvalidExtension {
                extension: extension.clone(),
            });
        }
        params.extension = trimmed.to_string();
    }
    if args.recursive {
        params.recursive = true;
    }
    if let Some(format) = args.format {
        params.format = format;
    }
    if let Some(degenerate) = args.degenerate {
        params.degenerate = degenerate;
    }
    if let Some(collision) = args.collision {
        params.collision = collision;
    }
    if let Some(jobs) = args.jobs {
        params.jobs = jobs;
    }
    Ok(params)
}

fn write_report(report: &BatchReport, args: &CliArgs) -> Result<(), AppError> {
    if let Some(path) = &args.report {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, report)?;
        info!("Batch report written to {:?}", path);
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    let params = resolve_params(&args)?;

    if !args.input.exists() {
        return Err(AppError::InputNotFound {
            path: args.input.clone(),
        }
        .into());
    }

    if args.input.is_file() {
        let output = convert(&args.input, &args.output_dir, &params).map_err(AppError::from)?;
        info!("Successfully processed: {:?} -> {:?}", args.input, output);
        return Ok(());
    }

    info!("Output directory: {:?}", args.output_dir);
    let progress_interval =
        (args.progress_interval > 0).then(|| Duration::from_secs(args.progress_interval));

    let report = process_directory_to_path(
        &args.input,
        &args.output_dir,
        &params,
        &CancelToken::new(),
        progress_interval,
    )
    .map_err(AppError::from)?;

    for failure in report.failures() {
        warn!(
            "Failed: {:?}: {}",
            failure.input,
            failure.reason.as_deref().unwrap_or("unknown error")
        );
    }
    write_report(&report, &args)?;

    if report.failed > 0 {
        return Err(AppError::BatchFailures {
            failed: report.failed,
            total: report.total,
        }
        .into());
    }
    Ok(())
}
