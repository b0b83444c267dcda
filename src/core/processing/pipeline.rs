use ndarray::Array3;
use tracing::debug;

use crate::core::processing::grid::build_grid;
use crate::core::processing::normalize::{GridStats, normalize_grid};
use crate::core::processing::quantize::quantize_grid;
use crate::core::processing::resize::resize_grid;
use crate::error::{Error, Result};
use crate::types::{DegeneratePolicy, OUTPUT_CHANNELS, OUTPUT_SIZE};

/// A converted image: 128x128 RGB8, row-major, channels interleaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputImage {
    data: Vec<u8>,
}

impl OutputImage {
    pub(crate) fn from_grid(grid: Array3<u8>) -> Result<Self> {
        if grid.dim() != (OUTPUT_SIZE, OUTPUT_SIZE, OUTPUT_CHANNELS) {
            return Err(Error::Resize(format!(
                "unexpected output shape {:?}",
                grid.dim()
            )));
        }
        Ok(Self {
            data: grid.into_raw_vec(),
        })
    }

    pub fn width(&self) -> usize {
        OUTPUT_SIZE
    }

    pub fn height(&self) -> usize {
        OUTPUT_SIZE
    }

    pub fn channels(&self) -> usize {
        OUTPUT_CHANNELS
    }

    /// RGB sample at column `x`, row `y`; `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= OUTPUT_SIZE || y >= OUTPUT_SIZE {
            return None;
        }
        let i = (y * OUTPUT_SIZE + x) * OUTPUT_CHANNELS;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// Intermediate results of one pipeline run, kept for inspection and logging.
#[derive(Debug, Clone)]
pub struct PipelineTrace {
    pub byte_count: usize,
    pub grid_side: usize,
    pub stats: GridStats,
}

/// Grid -> normalize -> quantize -> resize, for one in-memory byte stream.
pub fn process_bytes_pipeline(
    bytes: &[u8],
    policy: DegeneratePolicy,
) -> Result<(OutputImage, PipelineTrace)> {
    let grid = build_grid(bytes)?;
    let grid_side = grid.dim().0;

    let (normalized, stats) = normalize_grid(grid, policy)?;
    let quantized = quantize_grid(&normalized);
    drop(normalized);

    let resized = resize_grid(quantized, OUTPUT_SIZE)?;
    debug!(
        "Pipeline complete: {} bytes, grid {}x{}, mean={:.4}, std={:.4}",
        bytes.len(),
        grid_side,
        grid_side,
        stats.mean,
        stats.std
    );

    let trace = PipelineTrace {
        byte_count: bytes.len(),
        grid_side,
        stats,
    };
    Ok((OutputImage::from_grid(resized)?, trace))
}
