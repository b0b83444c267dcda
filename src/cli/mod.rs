//! Command Line Interface (CLI) layer for apkraster.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-file and batch
//! conversion. It wires user-provided options to the library functionality
//! exposed via `apkraster::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
