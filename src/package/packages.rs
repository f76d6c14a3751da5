//! Collection management and operations for workspace packages.

use colored::Colorize;
use humansize::{DECIMAL, format_size};
use rayon::prelude::*;

use super::Package;

/// A collection of workspace packages with associated operations.
///
/// Wraps a vector of [`Package`] instances and provides summary reporting
/// and parallel iteration support. Serves as the main data structure handed
/// from the scanner to the output layer.
#[derive(Debug)]
pub struct Packages(Vec<Package>);

impl From<Vec<Package>> for Packages {
    /// Create a `Packages` collection from a vector of packages, typically
    /// the scanner's result.
    fn from(packages: Vec<Package>) -> Self {
        Self(packages)
    }
}

impl IntoParallelIterator for Packages {
    type Iter = rayon::vec::IntoIter<Package>;
    type Item = Package;

    /// Enable parallel iteration with ownership transfer.
    fn into_par_iter(self) -> Self::Iter {
        self.0.into_par_iter()
    }
}

impl<'a> IntoParallelIterator for &'a Packages {
    type Iter = rayon::slice::Iter<'a, Package>;
    type Item = &'a Package;

    /// Enable parallel iteration over package references.
    fn into_par_iter(self) -> Self::Iter {
        self.0.par_iter()
    }
}

impl Packages {
    /// Calculate the total source size of all packages in the collection.
    #[must_use]
    pub fn get_total_size(&self) -> u64 {
        self.0.iter().map(|p| p.size).sum()
    }

    /// Get the number of packages in the collection.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a slice of the underlying package collection.
    ///
    /// Useful for inspecting packages without consuming the collection,
    /// for example to build JSON output.
    #[must_use]
    pub fn as_slice(&self) -> &[Package] {
        &self.0
    }

    /// Print a per-package listing followed by a total.
    ///
    /// The output is formatted with colors and emoji icons for readability.
    ///
    /// # Output Format
    ///
    /// ```text
    ///   📦 my_robot_driver (/ws/src/my_robot_driver): 1.2 MB
    ///   📦 navigation (/ws/src/navigation): 845 kB
    ///   💾 2 packages, 2.0 MB of sources
    /// ```
    pub fn print_summary(&self) {
        for package in &self.0 {
            println!(
                "  {package}: {}",
                format_size(package.size, DECIMAL).bright_white()
            );
        }

        println!(
            "  💾 {} packages, {} of sources",
            self.0.len().to_string().bright_white(),
            format_size(self.get_total_size(), DECIMAL)
                .bright_green()
                .bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> Packages {
        Packages::from(vec![
            Package::new("a".to_string(), PathBuf::from("/ws/src/a"), 100),
            Package::new("b".to_string(), PathBuf::from("/ws/src/b"), 250),
        ])
    }

    #[test]
    fn test_total_size_sums_packages() {
        assert_eq!(sample().get_total_size(), 350);
    }

    #[test]
    fn test_len_and_is_empty() {
        assert_eq!(sample().len(), 2);
        assert!(!sample().is_empty());
        assert!(Packages::from(vec![]).is_empty());
    }

    #[test]
    fn test_as_slice_preserves_order() {
        let packages = sample();
        let names: Vec<&str> = packages.as_slice().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
