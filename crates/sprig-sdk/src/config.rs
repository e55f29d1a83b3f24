use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sprig_dag::TraversalOrder;

use crate::error::{SdkError, SdkResult};

/// Repository configuration, stored as `.sprig/config.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprigConfig {
    /// Branch created by `init`.
    pub default_branch: String,
    pub merge: MergeConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Frontier order used when searching for the split point.
    pub traversal: TraversalOrder,
}

impl Default for SprigConfig {
    fn default() -> Self {
        Self {
            default_branch: "main".to_string(),
            merge: MergeConfig::default(),
        }
    }
}

impl SprigConfig {
    /// Read the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> SdkResult<Self> {
        toml::from_str(text).map_err(|e| SdkError::Config(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> SdkResult<()> {
        let text = toml::to_string_pretty(self).map_err(|e| SdkError::Config(e.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = SprigConfig::parse("").unwrap();
        assert_eq!(config, SprigConfig::default());
        assert_eq!(config.default_branch, "main");
        assert_eq!(config.merge.traversal, TraversalOrder::BreadthFirst);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = SprigConfig::parse("[merge]\ntraversal = \"lexicographic\"\n").unwrap();
        assert_eq!(config.default_branch, "main");
        assert_eq!(config.merge.traversal, TraversalOrder::Lexicographic);
    }

    #[test]
    fn unknown_traversal_is_config_error() {
        let err = SprigConfig::parse("[merge]\ntraversal = \"random\"\n").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = SprigConfig {
            default_branch: "trunk".to_string(),
            merge: MergeConfig {
                traversal: TraversalOrder::Lexicographic,
            },
        };
        config.save(&path).unwrap();
        assert_eq!(SprigConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SprigConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, SprigConfig::default());
    }
}
