use ndarray::{Array3, Zip};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::OUTPUT_CHANNELS;

/// Source taps for one destination coordinate along an axis: the two
/// neighbouring source indices and the weight of the second one.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisTap {
    lo: usize,
    hi: usize,
    frac: f64,
}

/// Half-pixel-centre mapping of `dst` coordinates onto `src`, clamped at the
/// edges. With `src == dst` every tap lands exactly on a source sample.
fn axis_taps(src: usize, dst: usize) -> Vec<AxisTap> {
    let scale = src as f64 / dst as f64;
    let last = (src - 1) as f64;
    (0..dst)
        .map(|d| {
            let pos = ((d as f64 + 0.5) * scale - 0.5).clamp(0.0, last);
            let lo = pos.floor() as usize;
            AxisTap {
                lo,
                hi: (lo + 1).min(src - 1),
                frac: pos - lo as f64,
            }
        })
        .collect()
}

/// Bilinear resample of an `rows x cols x C` grid.
///
/// Each destination sample is the weighted average of the four nearest source
/// samples, computed in f64 and rounded once. Upsampling and downsampling go
/// through the same formula; equal source and target sizes reproduce the
/// source exactly.
pub fn resize_bilinear(
    grid: &Array3<u8>,
    target_rows: usize,
    target_cols: usize,
) -> Result<Array3<u8>> {
    let (rows, cols, channels) = grid.dim();
    if rows == 0 || cols == 0 || target_rows == 0 || target_cols == 0 {
        return Err(Error::Resize(format!(
            "cannot resize {}x{} to {}x{}",
            cols, rows, target_cols, target_rows
        )));
    }

    let row_taps = axis_taps(rows, target_rows);
    let col_taps = axis_taps(cols, target_cols);

    let mut out = Array3::<u8>::zeros((target_rows, target_cols, channels));
    Zip::indexed(&mut out).par_for_each(|(y, x, c), sample| {
        let AxisTap { lo: y0, hi: y1, frac: fy } = row_taps[y];
        let AxisTap { lo: x0, hi: x1, frac: fx } = col_taps[x];

        let top = f64::from(grid[[y0, x0, c]]) * (1.0 - fx) + f64::from(grid[[y0, x1, c]]) * fx;
        let bottom =
            f64::from(grid[[y1, x0, c]]) * (1.0 - fx) + f64::from(grid[[y1, x1, c]]) * fx;
        let value = top * (1.0 - fy) + bottom * fy;

        *sample = value.round().clamp(0.0, 255.0) as u8;
    });

    Ok(out)
}

/// Resize a quantized `N x N x 3` grid to `target x target x 3`.
pub fn resize_grid(grid: Array3<u8>, target: usize) -> Result<Array3<u8>> {
    let (rows, cols, channels) = grid.dim();
    if channels != OUTPUT_CHANNELS {
        return Err(Error::Resize(format!(
            "expected {} channels, got {}",
            OUTPUT_CHANNELS, channels
        )));
    }
    debug!("Resizing {}x{} -> {}x{} (bilinear)", cols, rows, target, target);

    resize_bilinear(&grid, target, target)
}
