//! Directory size measurement.

use std::path::Path;

use walkdir::WalkDir;

/// Calculate the total size of a directory and all its contents, in bytes.
///
/// Recursively traverses the directory tree using `walkdir` and sums the sizes
/// of all files found. Errors for individual entries (permission denied, broken
/// symlinks, etc.) are silently skipped so the function always returns a result.
///
/// Returns `0` if the path does not exist or cannot be traversed at the root level.
#[must_use]
pub fn calculate_dir_size(path: &Path) -> u64 {
    let mut total = 0u64;

    for entry in WalkDir::new(path).into_iter().flatten() {
        if entry.file_type().is_file()
            && let Ok(metadata) = entry.metadata()
        {
            total += metadata.len();
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sums_nested_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "12345").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("b.txt"), "123").unwrap();

        assert_eq!(calculate_dir_size(dir.path()), 8);
    }

    #[test]
    fn test_missing_path_is_zero() {
        assert_eq!(calculate_dir_size(Path::new("/no/such/dir")), 0);
    }
}
