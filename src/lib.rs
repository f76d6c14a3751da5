//! # catkin-inspect
//!
//! A CLI tool and library for inspecting ROS/catkin workspaces.
//!
//! The tool answers the questions an editor integration or a developer on
//! the command line keeps asking about a workspace: which packages does it
//! contain, which compiler include directories do its package targets
//! declare, what environment does a setup file produce, and where are a
//! package's executables and launch files.
//!
//! ## Features
//!
//! - Include-directory extraction from the generated `build/Project.cbp`
//! - Workspace package discovery with parallel scanning
//! - Installed package queries via `rospack` / `catkin_find`
//! - Setup-file environment capture
//! - JSON output for scripting
//! - Persistent configuration via `~/.config/catkin-inspect/config.toml`

pub mod config;
pub mod distros;
pub mod env;
pub mod error;
pub mod includes;
pub mod output;
pub mod package;
pub mod rospack;
pub mod runner;
pub mod scanner;
pub mod utils;

pub use config::{FileConfig, ScanOptions};
pub use error::{ExtractError, ProjectFileError};
pub use includes::extract_include_dirs;
pub use package::{Package, Packages};
pub use runner::{CommandRunner, MockRunner, ShellRunner};
pub use scanner::Scanner;
