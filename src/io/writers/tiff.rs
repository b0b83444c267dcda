use std::path::Path;

use ::tiff::TiffError;
use ::tiff::encoder::{TiffEncoder, colortype};

use super::write_output_file;
use crate::error::{Error, Result};

/// I/O failures stay `Error::Io`; anything else is an encoding error.
fn tiff_error(output: &Path, e: TiffError) -> Error {
    match e {
        TiffError::IoError(io) => Error::Io(io),
        other => Error::encode(output, other),
    }
}

/// Baseline RGB TIFF, 8 bits per sample, uncompressed.
pub fn write_rgb_tiff(output: &Path, cols: usize, rows: usize, rgb_data: &[u8]) -> Result<()> {
    write_output_file(output, |writer| {
        let mut encoder = TiffEncoder::new(writer).map_err(|e| tiff_error(output, e))?;
        encoder
            .write_image::<colortype::RGB8>(cols as u32, rows as u32, rgb_data)
            .map_err(|e| tiff_error(output, e))
    })
}
