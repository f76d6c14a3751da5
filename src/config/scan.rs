//! Scanning configuration for workspace traversal.
//!
//! This module defines the options that control how the workspace source
//! tree is scanned for packages.

use std::path::PathBuf;

/// Configuration for workspace scanning behavior.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Whether to show verbose output including scan errors
    pub verbose: bool,

    /// Number of threads to use for scanning (0 = default)
    pub threads: usize,

    /// List of directory patterns to skip during scanning
    pub skip: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_options_creation() {
        let scan_opts = ScanOptions {
            verbose: true,
            threads: 4,
            skip: vec![PathBuf::from("third_party")],
        };

        assert!(scan_opts.verbose);
        assert_eq!(scan_opts.threads, 4);
        assert_eq!(scan_opts.skip.len(), 1);
    }

    #[test]
    fn test_scan_options_clone() {
        let original = ScanOptions {
            verbose: true,
            threads: 4,
            skip: vec![PathBuf::from("third_party")],
        };
        let cloned = original.clone();

        assert_eq!(original.verbose, cloned.verbose);
        assert_eq!(original.threads, cloned.threads);
        assert_eq!(original.skip, cloned.skip);
    }
}
