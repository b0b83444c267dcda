use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Read a file's raw bytes. Byte values pass through unchanged.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)?;
    debug!("Read {} bytes from {:?}", bytes.len(), path);
    Ok(bytes)
}
