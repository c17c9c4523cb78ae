//! Recursive directory scanning and per-extension file counts.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Directory skipped when no exclusion list is configured.
pub const DEFAULT_EXCLUDED_DIR: &str = "node_modules";

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("root directory {0:?} does not exist")]
    RootNotFound(PathBuf),

    #[error("root {0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("reading root {path:?}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walking {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// File categories reported in the statistics section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Php,
    Js,
    Sql,
    Markdown,
    PowerShell,
    Json,
    Yaml,
}

impl FileCategory {
    pub const ALL: [FileCategory; 7] = [
        FileCategory::Php,
        FileCategory::Js,
        FileCategory::Sql,
        FileCategory::Markdown,
        FileCategory::PowerShell,
        FileCategory::Json,
        FileCategory::Yaml,
    ];

    /// Filename suffix that selects this category.
    pub fn suffix(&self) -> &'static str {
        match self {
            FileCategory::Php => ".php",
            FileCategory::Js => ".js",
            FileCategory::Sql => ".sql",
            FileCategory::Markdown => ".md",
            FileCategory::PowerShell => ".ps1",
            FileCategory::Json => ".json",
            FileCategory::Yaml => ".yml",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::Php => "PHP",
            FileCategory::Js => "JS",
            FileCategory::Sql => "SQL",
            FileCategory::Markdown => "MD",
            FileCategory::PowerShell => "PS1",
            FileCategory::Json => "JSON",
            FileCategory::Yaml => "YAML",
        }
    }
}

/// File counts per category, in category order.
pub type FileStats = BTreeMap<FileCategory, usize>;

/// Walks a project tree, pruning hidden and excluded directories.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    excluded_dirs: Vec<String>,
}

impl Scanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            excluded_dirs: vec![DEFAULT_EXCLUDED_DIR.to_string()],
        }
    }

    /// Replace the list of directory names that are never descended into.
    pub fn excluded_dirs(mut self, dirs: &[String]) -> Self {
        self.excluded_dirs = dirs.to_vec();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect every file under the root whose name ends with `suffix`.
    ///
    /// Paths keep the root prefix exactly as it was given. Traversal is
    /// sorted by file name, so repeated scans of an unchanged tree return
    /// the same sequence.
    pub fn scan(&self, suffix: &str) -> Result<Vec<PathBuf>, ScanError> {
        self.check_root()?;

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_pruned(e));

        for entry in walker {
            let entry = entry.map_err(|source| ScanError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source,
            })?;
            if !is_regular_file(&entry) {
                continue;
            }
            let matches = entry.file_name().to_string_lossy().ends_with(suffix);
            if matches {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Count files for every [`FileCategory`].
    pub fn count_files(&self) -> Result<FileStats, ScanError> {
        let mut stats = FileStats::new();
        for category in FileCategory::ALL {
            let count = self.scan(category.suffix())?.len();
            stats.insert(category, count);
        }
        Ok(stats)
    }

    fn check_root(&self) -> Result<(), ScanError> {
        match std::fs::metadata(&self.root) {
            Ok(m) if m.is_dir() => Ok(()),
            Ok(_) => Err(ScanError::NotADirectory(self.root.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ScanError::RootNotFound(self.root.clone()))
            }
            Err(source) => Err(ScanError::Root {
                path: self.root.clone(),
                source,
            }),
        }
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        // The root is always walked, even when given as "." or a dot-directory.
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        name.starts_with('.') || self.excluded_dirs.iter().any(|d| *d == name)
    }
}

/// Symlinks count when their target is a regular file. Links to directories
/// are never descended into, and dangling links are ignored.
fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        return std::fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false);
    }
    entry.file_type().is_file()
}

/// Scan `root` for files ending with `suffix`, skipping hidden directories
/// and `node_modules`.
pub fn scan<P: AsRef<Path>>(root: P, suffix: &str) -> Result<Vec<PathBuf>, ScanError> {
    Scanner::new(root).scan(suffix)
}

/// Count files per category under `root` with the default exclusions.
pub fn count_files<P: AsRef<Path>>(root: P) -> Result<FileStats, ScanError> {
    Scanner::new(root).count_files()
}
