//! Shared types and enums used across apkraster.
//! Includes `OutputFormat`, `DegeneratePolicy` and `CollisionPolicy`, plus the
//! fixed output geometry constants.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output side length in pixels. Not configurable.
pub const OUTPUT_SIZE: usize = 128;

/// Output channel count (RGB).
pub const OUTPUT_CHANNELS: usize = 3;

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Png,
    Tiff,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tiff",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "PNG"),
            OutputFormat::Tiff => write!(f, "TIFF"),
        }
    }
}

/// What to do when the grid's standard deviation is zero (constant-valued input).
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneratePolicy {
    /// Report `Error::DegenerateInput` for the file.
    #[default]
    Fail,
    /// Treat every normalized value as 0.0, producing an all-zero image.
    ZeroFill,
}

impl std::fmt::Display for DegeneratePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegeneratePolicy::Fail => write!(f, "Fail"),
            DegeneratePolicy::ZeroFill => write!(f, "ZeroFill"),
        }
    }
}

/// How a batch resolves two inputs that map to the same output file name.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// First input (in sorted order) keeps the name, later ones fail.
    #[default]
    Fail,
    /// Later inputs get a numeric suffix: `<stem>-1`, `<stem>-2`, ...
    Disambiguate,
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionPolicy::Fail => write!(f, "Fail"),
            CollisionPolicy::Disambiguate => write!(f, "Disambiguate"),
        }
    }
}
