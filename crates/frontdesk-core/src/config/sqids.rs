//! Public identifier codec configuration.

use serde::{Deserialize, Serialize};

/// Sqids settings for short public-facing tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqidsConfig {
    /// Custom alphabet. `None` uses the Sqids default alphabet.
    #[serde(default)]
    pub alphabet: Option<String>,
    /// Minimum token length.
    #[serde(default = "default_min_length")]
    pub min_length: u8,
}

impl Default for SqidsConfig {
    fn default() -> Self {
        Self {
            alphabet: None,
            min_length: default_min_length(),
        }
    }
}

fn default_min_length() -> u8 {
    8
}
