use ndarray::Array3;

/// Convert a real sample to `u8` by truncating toward zero and wrapping
/// modulo 256. Out-of-range values wrap; they are not clamped.
#[inline]
pub fn quantize_sample(v: f64) -> u8 {
    // f64 -> i64 truncates toward zero; i64 -> u8 keeps the low byte.
    (v as i64) as u8
}

pub fn quantize_grid(normalized: &Array3<f64>) -> Array3<u8> {
    normalized.mapv(quantize_sample)
}
