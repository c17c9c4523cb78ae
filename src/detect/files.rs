//! Presence checks for well-known project files.

use serde::Serialize;
use std::path::Path;

/// Files whose presence is checked in the audit root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigFile {
    DockerCompose,
    PackageJson,
    Readme,
    JestConfig,
    EnvExample,
    NextConfig,
    TailwindConfig,
}

impl ConfigFile {
    pub const ALL: [ConfigFile; 7] = [
        ConfigFile::DockerCompose,
        ConfigFile::PackageJson,
        ConfigFile::Readme,
        ConfigFile::JestConfig,
        ConfigFile::EnvExample,
        ConfigFile::NextConfig,
        ConfigFile::TailwindConfig,
    ];

    /// Path relative to the audit root.
    pub fn path(&self) -> &'static str {
        match self {
            ConfigFile::DockerCompose => "docker-compose.yml",
            ConfigFile::PackageJson => "package.json",
            ConfigFile::Readme => "README.md",
            ConfigFile::JestConfig => "jest.config.js",
            ConfigFile::EnvExample => "env.example",
            ConfigFile::NextConfig => "next.config.js",
            ConfigFile::TailwindConfig => "tailwind.config.js",
        }
    }
}

/// One presence flag per [`ConfigFile`], in [`ConfigFile::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigPresence {
    pub entries: Vec<ConfigEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub file: ConfigFile,
    pub path: &'static str,
    pub present: bool,
}

impl ConfigPresence {
    pub fn is_present(&self, file: ConfigFile) -> bool {
        self.entries
            .iter()
            .any(|e| e.file == file && e.present)
    }

    pub fn missing(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.iter().filter(|e| !e.present)
    }
}

/// Check which well-known files exist under `base_dir`.
///
/// Anything that cannot be stat'ed counts as absent.
pub fn check_config<P: AsRef<Path>>(base_dir: P) -> ConfigPresence {
    let base = base_dir.as_ref();
    let entries = ConfigFile::ALL
        .iter()
        .map(|&file| ConfigEntry {
            file,
            path: file.path(),
            present: std::fs::metadata(base.join(file.path())).is_ok(),
        })
        .collect();

    ConfigPresence { entries }
}
