//! Workspace source scanning and package detection.
//!
//! This module provides the scanning logic that traverses a workspace's
//! `src/` tree to find catkin packages (directories carrying a
//! `package.xml` manifest). It supports parallel size calculation and
//! handles unreadable entries gracefully.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::{config::ScanOptions, package::Package, utils::calculate_dir_size};

/// Catkin package manifest filename.
const MANIFEST: &str = "package.xml";

/// Workspace source scanner for detecting catkin packages.
///
/// The `Scanner` encapsulates the logic for traversing a workspace source
/// tree and identifying packages along with their source sizes. It supports
/// configurable skipping and parallel processing.
#[derive(Debug)]
pub struct Scanner {
    /// Configuration options for scanning behavior
    scan_options: ScanOptions,

    /// When `true`, suppresses progress spinner output (used by `--json` mode).
    quiet: bool,
}

impl Scanner {
    /// Create a new scanner with the specified options.
    #[must_use]
    pub const fn new(scan_options: ScanOptions) -> Self {
        Self {
            scan_options,
            quiet: false,
        }
    }

    /// Enable or disable quiet mode (suppresses progress spinner).
    ///
    /// When quiet mode is active the scanning spinner is hidden, which is
    /// required for `--json` output so that only the final JSON is printed.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Scan a workspace for catkin packages.
    ///
    /// Traverses `<root>/src` when it exists (the conventional workspace
    /// layout), otherwise `root` itself. The scan operates in two phases:
    /// 1. Directory traversal to identify package manifests
    /// 2. Parallel source-size calculation per package
    ///
    /// # Arguments
    ///
    /// * `root` - The workspace root directory
    ///
    /// # Returns
    ///
    /// A vector of [`Package`] instances in no particular order (callers
    /// sort as needed for display).
    ///
    /// # Panics
    ///
    /// May panic if the progress bar template string is invalid, which
    /// cannot happen as the template is hardcoded and valid.
    pub fn scan_workspace(&self, root: &Path) -> Vec<Package> {
        let errors = Arc::new(Mutex::new(Vec::<String>::new()));

        let source_root = {
            let src = root.join("src");
            if src.is_dir() { src } else { root.to_path_buf() }
        };

        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            pb.set_message("Scanning...");
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        };

        let found_count = Arc::new(AtomicUsize::new(0));
        let progress_clone = progress.clone();
        let count_clone = Arc::clone(&found_count);

        // Find all package directories. Exclusion goes through filter_entry
        // so that a rejected directory prunes its whole subtree.
        let detected: Vec<Package> = WalkDir::new(&source_root)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || self.should_scan_entry(entry))
            .filter_map(Result::ok)
            .collect::<Vec<_>>()
            .into_par_iter()
            .filter_map(|entry| {
                let result = self.detect_package(&entry, &errors);
                if result.is_some() {
                    let n = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
                    progress_clone.set_message(format!("Scanning... {n} found"));
                }
                result
            })
            .collect();

        progress.finish_with_message("✅ Workspace scan complete");

        // Calculate source sizes in parallel
        let packages: Vec<Package> = detected
            .into_par_iter()
            .map(|mut package| {
                if package.size == 0 {
                    package.size = calculate_dir_size(&package.path);
                }
                package
            })
            .collect();

        // Print errors if verbose
        if self.scan_options.verbose {
            let errors = errors.lock().unwrap();
            for error in errors.iter() {
                eprintln!("{}", error.red());
            }
        }

        packages
    }

    /// Detect a catkin package at a directory entry.
    ///
    /// A directory is a package when it contains a `package.xml` manifest.
    /// The package name is taken from the manifest; the directory name is
    /// used when the manifest cannot be read or parsed.
    fn detect_package(&self, entry: &DirEntry, errors: &Arc<Mutex<Vec<String>>>) -> Option<Package> {
        let path = entry.path();

        if !entry.file_type().is_dir() {
            return None;
        }

        let manifest = path.join(MANIFEST);
        if !manifest.is_file() {
            return None;
        }

        let name = self
            .extract_package_name(&manifest, errors)
            .or_else(|| fallback_to_directory_name(path))?;

        Some(Package::new(name, path.to_path_buf(), 0))
    }

    /// Extract the package name from a `package.xml` manifest.
    ///
    /// Parses the manifest as XML and reads the text of the `<name>` child
    /// of the root `<package>` element.
    ///
    /// # Returns
    ///
    /// - `Some(String)` containing the package name if successfully extracted
    /// - `None` if the file cannot be read, parsed, or carries no name
    fn extract_package_name(
        &self,
        manifest: &Path,
        errors: &Arc<Mutex<Vec<String>>>,
    ) -> Option<String> {
        let content = match fs::read_to_string(manifest) {
            Ok(content) => content,
            Err(e) => {
                if self.scan_options.verbose {
                    errors
                        .lock()
                        .unwrap()
                        .push(format!("Error reading {}: {e}", manifest.display()));
                }
                return None;
            }
        };

        match roxmltree::Document::parse(&content) {
            Ok(doc) => parse_manifest_name(&doc),
            Err(e) => {
                if self.scan_options.verbose {
                    errors
                        .lock()
                        .unwrap()
                        .push(format!("Error parsing {}: {e}", manifest.display()));
                }
                None
            }
        }
    }

    /// Determine if a directory entry should be scanned for packages.
    ///
    /// Applies the exclusion rules that keep the traversal out of build
    /// output and irrelevant trees:
    /// - Directories in the user-specified skip list
    /// - Hidden directories (starting with `.`)
    /// - Catkin build output: `build`, `devel`, `install`, `logs`, `log`
    /// - Common temporary and dependency directories
    fn should_scan_entry(&self, entry: &DirEntry) -> bool {
        let path = entry.path();

        if self.is_path_in_skip_list(path) {
            return false;
        }

        if is_hidden_directory(path) {
            return false;
        }

        !is_excluded_directory(path)
    }

    /// Check if a path is in the skip list
    fn is_path_in_skip_list(&self, path: &Path) -> bool {
        self.scan_options.skip.iter().any(|skip| {
            path.components().any(|component| {
                component
                    .as_os_str()
                    .to_str()
                    .is_some_and(|name| name == skip.to_string_lossy())
            })
        })
    }
}

/// Check if directory is hidden and should be skipped
fn is_hidden_directory(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with('.') && name.len() > 1)
}

/// Check if directory is in the excluded list
fn is_excluded_directory(path: &Path) -> bool {
    let excluded_dirs = [
        "build",
        "devel",
        "install",
        "logs",
        "log",
        "node_modules",
        "__pycache__",
        "temp",
        "tmp",
    ];

    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| excluded_dirs.contains(&name))
}

/// Read the `<name>` element of a parsed `package.xml` document.
fn parse_manifest_name(doc: &roxmltree::Document) -> Option<String> {
    let root = doc.root_element();
    if !root.has_tag_name("package") {
        return None;
    }

    root.children()
        .find(|n| n.has_tag_name("name"))
        .and_then(|n| n.text())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Fallback to directory name
fn fallback_to_directory_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Create a scanner with default options.
    fn default_scanner() -> Scanner {
        Scanner::new(ScanOptions {
            verbose: false,
            threads: 1,
            skip: vec![],
        })
        .with_quiet(true)
    }

    /// Helper to create a file with content, ensuring parent dirs exist.
    fn create_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Create a minimal catkin package under `base`.
    fn create_package(base: &Path, dir_name: &str, manifest_name: &str) -> PathBuf {
        let package_path = base.join(dir_name);
        create_file(
            &package_path.join("package.xml"),
            &format!(
                r#"<?xml version="1.0"?>
<package format="2">
  <name>{manifest_name}</name>
  <version>0.1.0</version>
</package>"#
            ),
        );
        create_file(&package_path.join("src").join("node.cpp"), "int main() {}");
        package_path
    }

    #[test]
    fn test_scan_finds_packages_under_src() {
        let ws = TempDir::new().unwrap();
        create_package(&ws.path().join("src"), "driver", "my_driver");
        create_package(&ws.path().join("src").join("stack"), "nav", "navigation");

        let mut names: Vec<String> = default_scanner()
            .scan_workspace(ws.path())
            .into_iter()
            .map(|p| p.name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["my_driver", "navigation"]);
    }

    #[test]
    fn test_scan_skips_build_and_devel() {
        let ws = TempDir::new().unwrap();
        create_package(&ws.path().join("src"), "real", "real_pkg");
        create_package(&ws.path().join("build"), "ghost", "ghost_pkg");
        create_package(&ws.path().join("src").join("devel"), "ghost2", "ghost2_pkg");

        let packages = default_scanner().scan_workspace(ws.path());

        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "real_pkg");
    }

    #[test]
    fn test_scan_prunes_excluded_subtrees() {
        let ws = TempDir::new().unwrap();
        create_package(&ws.path().join("src"), "real", "real_pkg");
        // Packages nested below excluded or hidden directories must not be
        // reached even when the package directory itself has a clean name.
        create_package(
            &ws.path().join("src").join("devel").join("nested"),
            "ghost",
            "ghost_pkg",
        );
        create_package(&ws.path().join("src").join(".cache"), "hidden", "hidden_pkg");

        let packages = default_scanner().scan_workspace(ws.path());

        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "real_pkg");
    }

    #[test]
    fn test_scan_respects_skip_list() {
        let ws = TempDir::new().unwrap();
        create_package(&ws.path().join("src"), "keep", "keep_pkg");
        create_package(&ws.path().join("src").join("third_party"), "dep", "dep_pkg");

        let scanner = Scanner::new(ScanOptions {
            verbose: false,
            threads: 1,
            skip: vec![PathBuf::from("third_party")],
        })
        .with_quiet(true);

        let packages = scanner.scan_workspace(ws.path());
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "keep_pkg");
    }

    #[test]
    fn test_malformed_manifest_falls_back_to_directory_name() {
        let ws = TempDir::new().unwrap();
        create_file(
            &ws.path().join("src").join("broken_pkg").join("package.xml"),
            "<package><name>unclosed",
        );

        let packages = default_scanner().scan_workspace(ws.path());
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "broken_pkg");
    }

    #[test]
    fn test_sizes_are_calculated() {
        let ws = TempDir::new().unwrap();
        create_package(&ws.path().join("src"), "sized", "sized_pkg");

        let packages = default_scanner().scan_workspace(ws.path());
        assert_eq!(packages.len(), 1);
        assert!(packages[0].size > 0);
    }

    #[test]
    fn test_scan_without_src_dir_uses_root() {
        let dir = TempDir::new().unwrap();
        create_package(dir.path(), "standalone", "standalone_pkg");

        let packages = default_scanner().scan_workspace(dir.path());
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "standalone_pkg");
    }

    #[test]
    fn test_manifest_name_parsing() {
        let doc =
            roxmltree::Document::parse("<package format=\"2\"><name> spaced </name></package>")
                .unwrap();
        assert_eq!(parse_manifest_name(&doc), Some("spaced".to_string()));

        let wrong_root = roxmltree::Document::parse("<manifest><name>x</name></manifest>").unwrap();
        assert_eq!(parse_manifest_name(&wrong_root), None);

        let empty = roxmltree::Document::parse("<package><name>  </name></package>").unwrap();
        assert_eq!(parse_manifest_name(&empty), None);
    }
}
