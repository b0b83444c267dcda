use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::processing::pipeline::OutputImage;
use crate::error::Result;
use crate::io::writers::png::write_rgb_png;
use crate::io::writers::tiff::write_rgb_tiff;
use crate::types::OutputFormat;

/// Path of the file `save_output_image` writes for `base_name`.
pub fn output_file_path(output_dir: &Path, base_name: &str, format: OutputFormat) -> PathBuf {
    output_dir.join(format!("{}.{}", base_name, format.extension()))
}

/// Write `image` as `<output_dir>/<base_name>.<ext>`, creating `output_dir`
/// if needed. An existing file with that name is replaced.
pub fn save_output_image(
    image: &OutputImage,
    output_dir: &Path,
    base_name: &str,
    format: OutputFormat,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let output = output_file_path(output_dir, base_name, format);

    match format {
        OutputFormat::Png => {
            write_rgb_png(&output, image.width(), image.height(), image.as_raw())?;
        }
        OutputFormat::Tiff => {
            write_rgb_tiff(&output, image.width(), image.height(), image.as_raw())?;
        }
    }

    info!("save_output_image: {} saved to {:?}", format, output);
    Ok(output)
}
