//! Installed package queries via `rospack` and `catkin_find`.
//!
//! These helpers wrap the ROS command-line tools that know about the
//! *installed* package index (as opposed to the workspace source scan in
//! [`crate::scanner`]). Directory resolution goes through the tools; the
//! subsequent file discovery is done in-process with `walkdir` instead of
//! shelling out to `find`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::runner::{CommandEnv, CommandRunner};

/// List the installed packages as an ordered name → path map.
///
/// Runs `rospack list` and parses each line as `<name> <path>` (split on the
/// first space). Lines that do not fit the shape are skipped.
///
/// # Errors
///
/// Returns an error when `rospack` is missing or exits with failure.
pub fn list_packages(
    runner: &dyn CommandRunner,
    env: CommandEnv,
) -> Result<BTreeMap<String, PathBuf>> {
    let stdout = runner
        .run("rospack", &["list"], env)
        .context("failed to list packages via rospack")?;

    Ok(parse_package_list(&stdout))
}

/// Parse `rospack list` output into a name → path map.
#[must_use]
pub fn parse_package_list(output: &str) -> BTreeMap<String, PathBuf> {
    let mut packages = BTreeMap::new();

    for line in output.trim().lines() {
        if let Some((name, path)) = line.split_once(' ') {
            packages.insert(name.to_string(), PathBuf::from(path));
        }
    }

    packages
}

/// Find the executables a package installs.
///
/// Resolves the package's libexec and share directories via
/// `catkin_find --without-underlays --libexec --share <package>` and walks
/// them for executable regular files.
///
/// # Errors
///
/// Returns an error when `catkin_find` fails (e.g. unknown package).
pub fn find_package_executables(
    runner: &dyn CommandRunner,
    env: CommandEnv,
    package: &str,
) -> Result<Vec<PathBuf>> {
    let dirs = catkin_find(
        runner,
        env,
        &["--without-underlays", "--libexec", "--share", package],
    )?;

    let mut executables: Vec<PathBuf> = Vec::new();

    for dir in dirs {
        for entry in WalkDir::new(&dir).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(metadata) = entry.metadata()
                && is_executable(entry.path(), &metadata)
            {
                executables.push(entry.into_path());
            }
        }
    }

    executables.sort();
    Ok(executables)
}

/// Find the `.launch` files a package installs.
///
/// Resolves the package's share directories via
/// `catkin_find --without-underlays --share <package>` and walks them for
/// files with the `launch` extension.
///
/// # Errors
///
/// Returns an error when `catkin_find` fails (e.g. unknown package).
pub fn find_package_launch_files(
    runner: &dyn CommandRunner,
    env: CommandEnv,
    package: &str,
) -> Result<Vec<PathBuf>> {
    let dirs = catkin_find(runner, env, &["--without-underlays", "--share", package])?;

    let mut launch_files: Vec<PathBuf> = Vec::new();

    for dir in dirs {
        for entry in WalkDir::new(&dir).into_iter().filter_map(Result::ok) {
            if entry.file_type().is_file()
                && entry.path().extension().and_then(|e| e.to_str()) == Some("launch")
            {
                launch_files.push(entry.into_path());
            }
        }
    }

    launch_files.sort();
    Ok(launch_files)
}

/// Run `catkin_find` with the given arguments and collect the printed
/// directories, keeping only those that exist.
fn catkin_find(
    runner: &dyn CommandRunner,
    env: CommandEnv,
    args: &[&str],
) -> Result<Vec<PathBuf>> {
    let stdout = runner
        .run("catkin_find", args, env)
        .context("failed to resolve package directories via catkin_find")?;

    Ok(stdout
        .trim()
        .lines()
        .map(PathBuf::from)
        .filter(|dir| dir.is_dir())
        .collect())
}

/// Check whether a file is an executable binary.
///
/// On Unix, this inspects the permission bits for the executable flag.
/// On Windows, this checks for the `.exe` file extension.
#[cfg(unix)]
fn is_executable(path: &Path, metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;

    let _ = path; // only the permission bits matter on Unix
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(windows)]
fn is_executable(path: &Path, _metadata: &fs::Metadata) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("exe"))
}
