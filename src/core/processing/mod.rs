pub mod grid;
pub mod normalize;
pub mod pipeline;
pub mod quantize;
pub mod resize;
pub mod save;
