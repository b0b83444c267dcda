//! Batch conversion: input discovery, collision-free output planning and a
//! parallel driver that isolates per-file failures.
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::progress::ProgressMonitor;
use crate::api::{convert_to_named, output_base_name};
use crate::core::params::ConversionParams;
use crate::core::processing::save::output_file_path;
use crate::error::{Error, Result};
use crate::types::CollisionPolicy;

/// Shared flag for cooperative cancellation. Checked before each file starts;
/// a conversion already in progress runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileStatus {
    Converted,
    Failed,
    Cancelled,
}

/// Outcome of one input file within a batch.
#[derive(Debug, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub status: FileStatus,
    pub reason: Option<String>,
    #[serde(skip)]
    pub error: Option<Error>,
}

impl FileOutcome {
    fn converted(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output: Some(output),
            status: FileStatus::Converted,
            reason: None,
            error: None,
        }
    }

    fn failed(input: PathBuf, error: Error) -> Self {
        let status = if matches!(error, Error::Cancelled) {
            FileStatus::Cancelled
        } else {
            FileStatus::Failed
        };
        Self {
            input,
            output: None,
            status,
            reason: Some(error.to_string()),
            error: Some(error),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub started_at: Option<DateTime<Utc>>,
    pub total: usize,
    pub converted: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub elapsed_secs: f64,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.cancelled == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == FileStatus::Failed)
    }
}

/// Output name assigned to one input before conversion starts.
#[derive(Debug)]
pub struct PlannedOutput {
    pub input: PathBuf,
    pub base_name: Result<String>,
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

fn collect_inputs(
    dir: &Path,
    extension: &str,
    recursive: bool,
    out: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // file_type() does not follow symlinks
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if recursive {
                collect_inputs(&path, extension, recursive, out)?;
            }
        } else if file_type.is_symlink() {
            // Symlinked files count, symlinked directories are never walked.
            if path.is_file() && has_extension(&path, extension) {
                out.push(path);
            } else if path.is_dir() {
                debug!("Skipping symlinked directory: {:?}", path);
            }
        } else if file_type.is_file() && has_extension(&path, extension) {
            out.push(path);
        }
    }
    Ok(())
}

/// List regular files under `input_dir` whose extension matches `extension`
/// (case-insensitive, without the dot). With `recursive`, every subdirectory
/// is walked; otherwise only the top level. Symlinked directories are not
/// followed. Sorted by path.
pub fn discover_inputs(
    input_dir: &Path,
    extension: &str,
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    let extension = extension.trim_start_matches('.');
    let mut inputs = Vec::new();
    collect_inputs(input_dir, extension, recursive, &mut inputs)?;
    inputs.sort();
    Ok(inputs)
}

/// Assign every input an output base name, resolving duplicates with
/// `policy`. Names are compared case-insensitively; the first input in sorted
/// order keeps the plain name.
pub fn plan_outputs(inputs: &[PathBuf], policy: CollisionPolicy) -> Vec<PlannedOutput> {
    let mut sorted: Vec<&PathBuf> = inputs.iter().collect();
    sorted.sort();

    let mut claimed: HashSet<String> = HashSet::new();
    let mut owners: Vec<(String, PathBuf)> = Vec::new();
    let mut plan = Vec::with_capacity(inputs.len());

    for input in sorted {
        let base_name = match output_base_name(input) {
            Ok(name) => name,
            Err(e) => {
                plan.push(PlannedOutput {
                    input: input.clone(),
                    base_name: Err(e),
                });
                continue;
            }
        };

        let key = base_name.to_lowercase();
        let assigned = if claimed.insert(key.clone()) {
            owners.push((key, input.clone()));
            Ok(base_name)
        } else {
            match policy {
                CollisionPolicy::Fail => {
                    let first = owners
                        .iter()
                        .find(|(k, _)| *k == key)
                        .map(|(_, p)| p.clone())
                        .unwrap_or_default();
                    warn!("Output name collision: {:?} and {:?}", first, input);
                    Err(Error::OutputCollision {
                        name: base_name,
                        first,
                        second: input.clone(),
                    })
                }
                CollisionPolicy::Disambiguate => {
                    let mut suffix = 1usize;
                    let name = loop {
                        let candidate = format!("{}-{}", base_name, suffix);
                        if claimed.insert(candidate.to_lowercase()) {
                            break candidate;
                        }
                        suffix += 1;
                    };
                    info!("Output name collision: {:?} renamed to {}", input, name);
                    owners.push((name.to_lowercase(), input.clone()));
                    Ok(name)
                }
            }
        };

        plan.push(PlannedOutput {
            input: input.clone(),
            base_name: assigned,
        });
    }

    plan
}

fn run_planned(
    planned: PlannedOutput,
    output_dir: &Path,
    params: &ConversionParams,
    cancel: &CancelToken,
) -> FileOutcome {
    let PlannedOutput { input, base_name } = planned;

    if cancel.is_cancelled() {
        return FileOutcome::failed(input, Error::Cancelled);
    }

    let base_name = match base_name {
        Ok(name) => name,
        Err(e) => return FileOutcome::failed(input, e),
    };

    info!(
        "Processing: {:?} -> {:?}",
        input,
        output_file_path(output_dir, &base_name, params.format)
    );
    match convert_to_named(&input, output_dir, &base_name, params) {
        Ok(output) => {
            info!("Successfully processed: {:?}", input);
            FileOutcome::converted(input, output)
        }
        Err(e) => {
            warn!("Error processing {:?}: {}", input, e);
            FileOutcome::failed(input, e)
        }
    }
}

/// Convert an explicit list of inputs into `output_dir` on a worker pool of
/// `params.jobs` threads. Per-file failures are recorded in the report and
/// never stop the batch; only failing to create `output_dir` or the pool
/// returns `Err`.
pub fn process_paths(
    inputs: &[PathBuf],
    output_dir: &Path,
    params: &ConversionParams,
    cancel: &CancelToken,
    progress_interval: Option<Duration>,
) -> Result<BatchReport> {
    std::fs::create_dir_all(output_dir)?;

    let started_at = Utc::now();
    let started = Instant::now();
    let total = inputs.len();
    let plan = plan_outputs(inputs, params.collision);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.jobs)
        .thread_name(|i| format!("apkraster-worker-{}", i))
        .build()
        .map_err(Error::external)?;
    info!(
        "Converting {} files with {} workers into {:?}",
        total,
        pool.current_num_threads(),
        output_dir
    );

    let completed = Arc::new(AtomicUsize::new(0));
    let monitor = match progress_interval {
        Some(interval) if total > 0 => {
            Some(ProgressMonitor::start(total, completed.clone(), interval)?)
        }
        _ => None,
    };

    let outcomes: Vec<FileOutcome> = pool.install(|| {
        plan.into_par_iter()
            .map(|planned| {
                let outcome = run_planned(planned, output_dir, params, cancel);
                completed.fetch_add(1, Ordering::Relaxed);
                outcome
            })
            .collect()
    });

    if let Some(monitor) = monitor {
        monitor.stop();
    }

    let mut report = BatchReport {
        started_at: Some(started_at),
        total,
        elapsed_secs: started.elapsed().as_secs_f64(),
        ..BatchReport::default()
    };
    for outcome in &outcomes {
        match outcome.status {
            FileStatus::Converted => report.converted += 1,
            FileStatus::Failed => report.failed += 1,
            FileStatus::Cancelled => report.cancelled += 1,
        }
    }
    report.outcomes = outcomes;

    info!("Batch processing complete!");
    info!("Converted: {}", report.converted);
    info!("Failed: {}", report.failed);
    info!("Cancelled: {}", report.cancelled);

    Ok(report)
}

/// Discover inputs in `input_dir` according to `params` and convert them.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &ConversionParams,
    cancel: &CancelToken,
    progress_interval: Option<Duration>,
) -> Result<BatchReport> {
    info!("Starting batch processing from directory: {:?}", input_dir);
    let inputs = discover_inputs(input_dir, &params.extension, params.recursive)?;
    info!(
        "Found {} .{} files ({})",
        inputs.len(),
        params.extension,
        if params.recursive { "recursive" } else { "flat" }
    );
    process_paths(inputs.as_slice(), output_dir, params, cancel, progress_interval)
}
