use ndarray::Array3;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::DegeneratePolicy;

/// Global statistics over every cell of the grid, zero padding included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    pub mean: f64,
    /// Population standard deviation (divides by the cell count).
    pub std: f64,
}

impl GridStats {
    pub fn is_degenerate(&self) -> bool {
        self.std == 0.0 || !self.std.is_finite()
    }
}

pub fn compute_grid_stats(grid: &Array3<f64>) -> GridStats {
    let count = grid.len() as f64;
    let mean = grid.sum() / count;
    let sq_dev = grid.fold(0.0_f64, |acc, &v| {
        let d = v - mean;
        acc + d * d
    });
    let std = (sq_dev / count).sqrt();
    GridStats { mean, std }
}

/// Z-score normalize the grid in place: `(v - mean) / std` with one global
/// mean and std across all channels.
///
/// A zero std is resolved by `policy`: either `Error::DegenerateInput`, or an
/// all-zero grid.
pub fn normalize_grid(
    mut grid: Array3<f64>,
    policy: DegeneratePolicy,
) -> Result<(Array3<f64>, GridStats)> {
    let stats = compute_grid_stats(&grid);
    debug!("Grid statistics: mean={:.6}, std={:.6}", stats.mean, stats.std);

    if stats.is_degenerate() {
        return match policy {
            DegeneratePolicy::Fail => Err(Error::DegenerateInput { mean: stats.mean }),
            DegeneratePolicy::ZeroFill => {
                warn!(
                    "Standard deviation is zero (mean={}); normalized grid defined as all-zero",
                    stats.mean
                );
                grid.fill(0.0);
                Ok((grid, stats))
            }
        };
    }

    let GridStats { mean, std } = stats;
    grid.par_mapv_inplace(|v| (v - mean) / std);
    Ok((grid, stats))
}
