use ndarray::Array3;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::OUTPUT_CHANNELS;

/// Side length of the square grid holding `count` bytes: `ceil(sqrt(count))`.
///
/// Computed in integers so that `n * n >= count` holds for every input size,
/// including those where a floating-point square root rounds down.
pub fn grid_side(count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let mut n = (count as f64).sqrt() as usize;
    while n.saturating_mul(n) < count {
        n += 1;
    }
    while n > 1 && (n - 1) * (n - 1) >= count {
        n -= 1;
    }
    n
}

/// Lay bytes out row-major into an `N x N x 3` grid, each byte broadcast to all
/// three channels. Cells past the end of the byte stream stay zero.
pub fn build_grid(bytes: &[u8]) -> Result<Array3<f64>> {
    if bytes.is_empty() {
        return Err(Error::EmptyInput);
    }

    let n = grid_side(bytes.len());
    let cells = n * n;
    debug!(
        "Grid layout: {} bytes -> {}x{} ({} padding cells)",
        bytes.len(),
        n,
        n,
        cells - bytes.len().min(cells)
    );

    let mut data = vec![0.0_f64; cells * OUTPUT_CHANNELS];
    for (cell, &byte) in data.chunks_exact_mut(OUTPUT_CHANNELS).zip(bytes) {
        cell.fill(f64::from(byte));
    }

    Array3::from_shape_vec((n, n, OUTPUT_CHANNELS), data).map_err(Error::external)
}
