//! Installed ROS distribution discovery.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Default installation root for ROS distributions.
pub const DISTRO_ROOT: &str = "/opt/ros";

/// List the names of the ROS distributions installed under `root`.
///
/// Each direct subdirectory of `root` (conventionally `/opt/ros`) is one
/// installed distro. Names are returned sorted.
///
/// # Errors
///
/// Returns an error when `root` cannot be read, including when no ROS
/// installation exists at all; the caller decides how to present that.
pub fn installed_distros(root: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(root)
        .with_context(|| format!("failed to list ROS installations in {}", root.display()))?;

    let mut distros: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(ToString::to_string))
        .collect();

    distros.sort();
    Ok(distros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_distro_directories_sorted() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("noetic")).unwrap();
        fs::create_dir(root.path().join("melodic")).unwrap();
        fs::write(root.path().join("README"), "not a distro").unwrap();

        let distros = installed_distros(root.path()).unwrap();
        assert_eq!(distros, vec!["melodic", "noetic"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let err = installed_distros(Path::new("/no/such/opt/ros")).unwrap_err();
        assert!(err.to_string().contains("/no/such/opt/ros"));
    }
}
