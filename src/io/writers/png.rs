use std::path::Path;

use image::{ImageError, ImageFormat, RgbImage};

use super::write_output_file;
use crate::error::{Error, Result};

/// I/O failures stay `Error::Io`; anything else is an encoding error.
fn image_error(output: &Path, e: ImageError) -> Error {
    match e {
        ImageError::IoError(io) => Error::Io(io),
        other => Error::encode(output, other),
    }
}

pub fn write_rgb_png(output: &Path, cols: usize, rows: usize, rgb_data: &[u8]) -> Result<()> {
    let img = RgbImage::from_raw(cols as u32, rows as u32, rgb_data.to_vec())
        .ok_or_else(|| Error::encode(output, "buffer does not match image dimensions"))?;
    write_output_file(output, |writer| {
        img.write_to(writer, ImageFormat::Png)
            .map_err(|e| image_error(output, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_from_the_encoder_stay_io() {
        let err = image_error(
            Path::new("out.png"),
            ImageError::IoError(std::io::Error::other("no space left on device")),
        );
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn short_buffer_is_an_encode_error_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("short.png");
        let err = write_rgb_png(&output, 4, 4, &[0u8; 10]).unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
        assert!(!output.exists());
    }
}
