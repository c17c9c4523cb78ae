//! Audit configuration.
//!
//! Everything is optional; a missing config file means the built-in
//! defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scan::DEFAULT_EXCLUDED_DIR;

/// Config file names looked up in the audit root.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["projscan.yaml", ".projscan.yaml"];

/// Identifiers that were left behind in the original project and flagged on
/// sight by the client-script unused-variable rule.
pub const DEFAULT_UNUSED_IDENTIFIERS: &[&str] = &[
    "duplicateUser",
    "duplicateDevice",
    "duplicatePatient",
    "noAuthRequest",
    "invalidAuthRequest",
];

/// Top-level audit configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Identifier names reported as unused wherever they appear in a
    /// client-script file.
    #[serde(default = "default_unused_identifiers")]
    pub unused_identifiers: Vec<String>,
    /// Directory names never descended into (hidden directories are always
    /// skipped).
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            unused_identifiers: default_unused_identifiers(),
            excluded_dirs: default_excluded_dirs(),
        }
    }
}

fn default_unused_identifiers() -> Vec<String> {
    DEFAULT_UNUSED_IDENTIFIERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_excluded_dirs() -> Vec<String> {
    vec![DEFAULT_EXCLUDED_DIR.to_string()]
}

impl AuditConfig {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path.display(), e))?;
        Self::parse_str(&content)
            .map_err(|e| anyhow::anyhow!("parsing config {}: {}", path.display(), e))
    }

    /// Parse a config from YAML text. An empty document yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AuditConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the config for an audit root.
    ///
    /// An explicit path must exist. Otherwise the root is searched for one of
    /// [`DEFAULT_CONFIG_NAMES`] and the defaults are used if none is found.
    pub fn load(root: &Path, explicit: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(root),
        };

        match path {
            Some(p) => {
                let config = Self::parse_file(&p)?;
                validate(&config)?;
                Ok((config, Some(p)))
            }
            None => Ok((Self::default(), None)),
        }
    }
}

/// Find a config file in `root`.
pub fn discover(root: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

/// Validate a config for correctness.
pub fn validate(config: &AuditConfig) -> anyhow::Result<()> {
    for ident in &config.unused_identifiers {
        if ident.trim().is_empty() {
            anyhow::bail!("unused_identifiers must not contain empty names");
        }
    }

    for dir in &config.excluded_dirs {
        if dir.is_empty() {
            anyhow::bail!("excluded_dirs must not contain empty names");
        }
        if dir.contains('/') || dir.contains('\\') {
            anyhow::bail!(
                "invalid excluded_dirs entry {:?}: expected a directory name, not a path",
                dir
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
unused_identifiers:
  - legacyHandler
  - oldToken
excluded_dirs:
  - node_modules
  - vendor
"#;
        let config = AuditConfig::parse_str(yaml).unwrap();
        assert_eq!(config.unused_identifiers, vec!["legacyHandler", "oldToken"]);
        assert_eq!(config.excluded_dirs, vec!["node_modules", "vendor"]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = AuditConfig::parse_str("excluded_dirs: [vendor]").unwrap();
        assert_eq!(config.unused_identifiers.len(), DEFAULT_UNUSED_IDENTIFIERS.len());
        assert_eq!(config.excluded_dirs, vec!["vendor"]);

        let empty = AuditConfig::parse_str("").unwrap();
        assert_eq!(empty.excluded_dirs, vec![DEFAULT_EXCLUDED_DIR]);
    }

    #[test]
    fn test_explicit_empty_list_is_kept() {
        let config = AuditConfig::parse_str("unused_identifiers: []").unwrap();
        assert!(config.unused_identifiers.is_empty());
    }

    #[test]
    fn test_validate_rejects_paths() {
        let config = AuditConfig {
            excluded_dirs: vec!["src/vendor".to_string()],
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        let config = AuditConfig {
            unused_identifiers: vec!["  ".to_string()],
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        assert!(validate(&AuditConfig::default()).is_ok());
    }

    #[test]
    fn test_load_discovers_config_in_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("projscan.yaml"),
            "unused_identifiers: [staleFlag]\n",
        )
        .unwrap();

        let (config, path) = AuditConfig::load(temp.path(), None).unwrap();
        assert_eq!(config.unused_identifiers, vec!["staleFlag"]);
        assert_eq!(path.unwrap(), temp.path().join("projscan.yaml"));
    }

    #[test]
    fn test_load_without_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let (config, path) = AuditConfig::load(temp.path(), None).unwrap();
        assert!(path.is_none());
        assert_eq!(config.excluded_dirs, vec![DEFAULT_EXCLUDED_DIR]);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("custom.yaml");
        assert!(AuditConfig::load(temp.path(), Some(&missing)).is_err());
    }
}
