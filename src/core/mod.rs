//! Core processing building blocks: grid layout, z-score normalization,
//! wrapping quantization and bilinear resize, composed by `processing::pipeline`.
//! These are internal primitives consumed by the high-level `api` module.
pub mod params;
pub mod processing;
