//! Structured JSON output for scripting and piping.
//!
//! This module provides serializable data structures that represent the
//! output of each inspection command. When the `--json` flag is passed,
//! these structures are serialized to stdout as a single JSON object,
//! replacing all human-readable output.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use humansize::{DECIMAL, format_size};
use serde::Serialize;

use crate::package::Package;

/// JSON document for the `includes` command.
#[derive(Serialize)]
pub struct JsonIncludes {
    /// Workspace root the directories were extracted from.
    pub workspace: String,

    /// Ordered, deduplicated include directory paths.
    pub include_dirs: Vec<String>,
}

impl JsonIncludes {
    /// Build the document from a workspace root and extracted directories.
    #[must_use]
    pub fn new(workspace: &Path, include_dirs: Vec<String>) -> Self {
        Self {
            workspace: workspace.display().to_string(),
            include_dirs,
        }
    }
}

/// JSON document for the `packages` command (workspace scan).
#[derive(Serialize)]
pub struct JsonPackages {
    /// Packages found in the workspace.
    pub packages: Vec<JsonPackageEntry>,

    /// Aggregated summary statistics.
    pub summary: JsonPackageSummary,
}

/// A single package entry in the JSON output.
#[derive(Serialize)]
pub struct JsonPackageEntry {
    /// Package name from the manifest.
    pub name: String,

    /// Absolute path to the package root directory.
    pub path: String,

    /// Source tree size in bytes.
    pub size: u64,

    /// Human-readable formatted size (e.g. `"1.23 MB"`).
    pub size_formatted: String,
}

/// Aggregated summary across all found packages.
#[derive(Serialize)]
pub struct JsonPackageSummary {
    /// Total number of packages found.
    pub total_packages: usize,

    /// Total source size in bytes.
    pub total_size: u64,

    /// Human-readable formatted total size.
    pub total_size_formatted: String,
}

impl JsonPackages {
    /// Build a `JsonPackages` from a slice of scanned packages.
    #[must_use]
    pub fn from_packages(packages: &[Package]) -> Self {
        let total_size: u64 = packages.iter().map(|p| p.size).sum();

        Self {
            packages: packages
                .iter()
                .map(|p| JsonPackageEntry {
                    name: p.name.clone(),
                    path: p.path.display().to_string(),
                    size: p.size,
                    size_formatted: format_size(p.size, DECIMAL),
                })
                .collect(),
            summary: JsonPackageSummary {
                total_packages: packages.len(),
                total_size,
                total_size_formatted: format_size(total_size, DECIMAL),
            },
        }
    }
}

/// JSON document for the `packages --installed` command.
#[derive(Serialize)]
pub struct JsonInstalledPackages {
    /// Installed packages as a name → path map.
    pub packages: BTreeMap<String, String>,
}

impl JsonInstalledPackages {
    /// Build the document from a `rospack list` result.
    #[must_use]
    pub fn from_map(packages: &BTreeMap<String, PathBuf>) -> Self {
        Self {
            packages: packages
                .iter()
                .map(|(name, path)| (name.clone(), path.display().to_string()))
                .collect(),
        }
    }
}

/// JSON document for the `env` command.
#[derive(Serialize)]
pub struct JsonEnv {
    /// The sourced setup file.
    pub setup_file: String,

    /// The resulting environment.
    pub env: BTreeMap<String, String>,
}

/// JSON document for plain path/name list commands
/// (`distros`, `executables`, `launch-files`).
#[derive(Serialize)]
pub struct JsonList {
    /// The listed entries, in display order.
    pub entries: Vec<String>,
}

impl JsonList {
    /// Build the document from displayable paths.
    #[must_use]
    pub fn from_paths(paths: &[PathBuf]) -> Self {
        Self {
            entries: paths.iter().map(|p| p.display().to_string()).collect(),
        }
    }

    /// Build the document from plain strings.
    #[must_use]
    pub fn from_strings(entries: Vec<String>) -> Self {
        Self { entries }
    }
}
