//! Configuration for classifiers

use labelgate_core::Result;
use serde::{Deserialize, Serialize};

/// Complement Naive Bayes configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplementNbConfig {
    /// Additive smoothing parameter (0 disables smoothing)
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for ComplementNbConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
        }
    }
}

impl ComplementNbConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

fn default_alpha() -> f64 {
    1.0
}
