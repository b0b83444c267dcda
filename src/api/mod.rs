//! High-level, ergonomic library API: convert a byte buffer or a file to an
//! in-memory `OutputImage`, convert a file straight into an output directory,
//! and run whole batches (`batch`) with an optional progress monitor
//! (`progress`). Prefer these entrypoints over the low-level processing
//! modules when integrating apkraster.
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::params::ConversionParams;
use crate::core::processing::pipeline::{OutputImage, process_bytes_pipeline};
use crate::core::processing::save::save_output_image;
use crate::error::{Error, Result};
use crate::io::read_bytes;

pub mod batch;
pub mod progress;

/// Convert an in-memory byte stream. Pure: no filesystem access.
pub fn convert_bytes(bytes: &[u8], params: &ConversionParams) -> Result<OutputImage> {
    let (image, _) = process_bytes_pipeline(bytes, params.degenerate)?;
    Ok(image)
}

/// Read `input` and convert it. Touches nothing but the input file, so it is
/// safe to call from many threads at once.
pub fn convert_file(input: &Path, params: &ConversionParams) -> Result<OutputImage> {
    let bytes = read_bytes(input)?;
    convert_bytes(&bytes, params)
}

/// Base name used for the output file: the input's file name with its last
/// extension removed.
pub fn output_base_name(input: &Path) -> Result<String> {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidArgument {
            arg: "input",
            value: input.display().to_string(),
        })
}

/// Convert `input` and write `<output_dir>/<base_name>.<ext>`.
pub fn convert_to_named(
    input: &Path,
    output_dir: &Path,
    base_name: &str,
    params: &ConversionParams,
) -> Result<PathBuf> {
    let image = convert_file(input, params)?;
    save_output_image(&image, output_dir, base_name, params.format)
}

/// Convert one file into `output_dir`, named after the input's base name.
/// Returns the written path.
pub fn convert(input: &Path, output_dir: &Path, params: &ConversionParams) -> Result<PathBuf> {
    let base_name = output_base_name(input)?;
    let output = convert_to_named(input, output_dir, &base_name, params)?;
    info!("Converted {:?} -> {:?}", input, output);
    Ok(output)
}
