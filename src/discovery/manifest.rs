//! Project configuration (spritenorm.yaml) parsing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NormError, Result};
use crate::types::NormalizeOptions;

/// Project configuration loaded from spritenorm.yaml.
///
/// ```yaml
/// output: normalized
/// options:
///   transparencyThreshold: 32
///   padding: 1
///   forceTileWidth: 48
/// excludes:
///   - "*.bak.png"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Output directory for normalized sheets.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Default normalization options; CLI flags override them.
    pub options: NormalizeOptions,

    /// Patterns to exclude from batch discovery.
    pub excludes: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("normalized")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            output: default_output(),
            options: NormalizeOptions::default(),
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from a spritenorm.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| NormError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let manifest: Self = serde_yaml::from_str(content).map_err(|e| NormError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some("Check spritenorm.yaml syntax".to_string()),
        })?;
        manifest.options.validate()?;
        Ok(manifest)
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Simple glob pattern matching.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            // **/dir/* matches anything inside dir anywhere in the path
            if let Some(dir) = suffix.strip_suffix("/*") {
                return path.starts_with(&format!("{}/", dir))
                    || path.contains(&format!("/{}/", dir));
            }
            return path.ends_with(suffix);
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            if !pattern.contains('/') {
                return path.ends_with(suffix);
            }
        }

        if let Some(prefix) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", prefix))
                || path.contains(&format!("/{}/", prefix));
        }

        path.contains(pattern)
    }
}
