//! JSON configuration overrides
//!
//! Every key is optional; present keys replace the corresponding default.
//!
//! ```json
//! {
//!   "compressionLevel": "fast",
//!   "excludePatterns": [".git", "*.map"],
//!   "maxFileSize": 52428800,
//!   "retryAttempts": 5,
//!   "retryDelay": 250,
//!   "overwrite": false
//! }
//! ```

use crate::{CompressionLevel, RunConfiguration};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    pub compression_level: Option<String>,
    pub exclude_patterns: Option<Vec<String>>,
    pub max_file_size: Option<u64>,
    pub retry_attempts: Option<u32>,
    /// Milliseconds.
    pub retry_delay: Option<u64>,
    pub overwrite: Option<bool>,
}

/// Read and parse a configuration file.
pub fn load_overrides<P: AsRef<Path>>(path: P) -> std::io::Result<ConfigOverrides> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl ConfigOverrides {
    /// Merge these overrides into `config`, returning warnings for values that were adjusted.
    pub fn apply(self, config: &mut RunConfiguration) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(label) = self.compression_level {
            let level = CompressionLevel::from_label_or_best(&label);
            if level.as_str() != label {
                warnings.push(format!(
                    "Unknown compression level '{label}' in config, using '{level}'"
                ));
            }
            config.level = level;
        }
        if let Some(patterns) = self.exclude_patterns {
            config.exclude_patterns = patterns;
        }
        if let Some(max_file_size) = self.max_file_size {
            config.max_file_size = max_file_size;
        }
        if let Some(attempts) = self.retry_attempts {
            if attempts == 0 {
                warnings.push("retryAttempts must be at least 1, using 1".to_string());
            }
            config.retry_attempts = attempts.max(1);
        }
        if let Some(delay_ms) = self.retry_delay {
            config.retry_delay = Duration::from_millis(delay_ms);
        }
        if let Some(overwrite) = self.overwrite {
            config.overwrite = overwrite;
        }

        warnings
    }
}
