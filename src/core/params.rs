use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{CollisionPolicy, DegeneratePolicy, OutputFormat};

/// Conversion parameters suitable for config files and CLI presets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParams {
    pub format: OutputFormat,
    pub degenerate: DegeneratePolicy,
    pub collision: CollisionPolicy,
    /// File extension used for input discovery, without the leading dot
    pub extension: String,
    /// Walk subdirectories of the input directory
    pub recursive: bool,
    /// Worker threads for batch conversion; 0 means one per core
    pub jobs: usize,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            degenerate: DegeneratePolicy::Fail,
            collision: CollisionPolicy::Fail,
            extension: "apk".to_string(),
            recursive: false,
            jobs: 0,
        }
    }
}

impl ConversionParams {
    /// Load parameters from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
