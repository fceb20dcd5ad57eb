use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Name of the single file written into every commit
    pub file_name: String,
    /// Commit message is this prefix followed by the id
    pub message_prefix: String,
    /// Tag name is this prefix followed by the id
    pub tag_prefix: String,
    /// Upper bound on the number of commits a run may produce
    pub max_commits: u64,
    /// Upper bound on the number of generations
    pub max_depth: u32,
    /// Indented JSON output
    pub pretty: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            file_name: "path.txt".to_string(),
            message_prefix: "Commit ".to_string(),
            tag_prefix: "tag-".to_string(),
            max_commits: 1_000_000,
            max_depth: 1024,
            pretty: true,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str(content)?;
        tracing::debug!(?config, "loaded generator configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "file_name = \"ancestry.txt\"").unwrap();
        writeln!(file, "max_commits = 50").unwrap();

        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.file_name, "ancestry.txt");
        assert_eq!(config.max_commits, 50);
        assert_eq!(config.tag_prefix, "tag-");
        assert!(config.pretty);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(GeneratorConfig::from_toml("").unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = GeneratorConfig::from_toml("max_commits = \"lots\"").unwrap_err();
        assert!(matches!(err, crate::GenerateError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = GeneratorConfig::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, crate::GenerateError::Io(_)));
    }
}
