//! Core package data structure.

use std::{
    fmt::{Display, Formatter, Result},
    path::PathBuf,
};

use serde::Serialize;

/// One catkin package found in a workspace source tree.
///
/// A package is any directory carrying a `package.xml` manifest. The name is
/// taken from the manifest's `<name>` element when it parses, falling back to
/// the directory name otherwise.
#[derive(Clone, Debug, Serialize)]
pub struct Package {
    /// Package name from the manifest (or the directory name as fallback)
    pub name: String,

    /// The package root directory (where `package.xml` lives)
    pub path: PathBuf,

    /// Total size of the package's source tree in bytes
    ///
    /// Calculated by recursively summing file sizes under the package root.
    /// Used for the summary report.
    pub size: u64,
}

impl Package {
    /// Create a new package instance.
    ///
    /// # Arguments
    ///
    /// * `name` - Package name from the manifest or directory
    /// * `path` - Path to the package root directory
    /// * `size` - Total source size in bytes (0 when not yet calculated)
    #[must_use]
    pub const fn new(name: String, path: PathBuf, size: u64) -> Self {
        Self { name, path, size }
    }
}

impl Display for Package {
    /// Format the package as `📦 name (path)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "📦 {} ({})", self.name, self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_new() {
        let package = Package::new(
            "my_robot_driver".to_string(),
            PathBuf::from("/ws/src/my_robot_driver"),
            4096,
        );

        assert_eq!(package.name, "my_robot_driver");
        assert_eq!(package.path, PathBuf::from("/ws/src/my_robot_driver"));
        assert_eq!(package.size, 4096);
    }

    #[test]
    fn test_package_display() {
        let package = Package::new(
            "navigation".to_string(),
            PathBuf::from("/ws/src/navigation"),
            0,
        );

        assert_eq!(format!("{package}"), "📦 navigation (/ws/src/navigation)");
    }
}
