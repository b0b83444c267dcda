use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};

pub mod png;
pub mod tiff;

/// Create `output`, hand a buffered writer to `encode` and flush it. If either
/// step fails the partially written file is removed before the error returns.
pub(crate) fn write_output_file<F>(output: &Path, encode: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let result = encode(&mut writer).and_then(|()| writer.flush().map_err(Error::from));

    if result.is_err() {
        drop(writer);
        if let Err(e) = std::fs::remove_file(output) {
            warn!("Could not remove partial output {:?}: {}", output, e);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_encode_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("partial.png");

        let err = write_output_file(&output, |w| {
            w.write_all(b"half an image")?;
            Err(Error::Io(std::io::Error::other("no space left on device")))
        })
        .unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(!output.exists());
    }

    #[test]
    fn successful_encode_keeps_flushed_content() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("whole.bin");

        write_output_file(&output, |w| Ok(w.write_all(b"payload")?)).unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"payload");
    }
}
