//! Workspace package data structures.
//!
//! This module contains the types representing catkin packages discovered in
//! a workspace source tree, and the collection operations performed on them.
//!
//! ## Main Parts
//!
//! - [`Package`] - One catkin package (a directory carrying a `package.xml`)
//! - [`Packages`] - A collection of packages with summary reporting

#[allow(clippy::module_inception)]
// This is acceptable as it is the main module for package management
pub mod package;
pub mod packages;

pub use package::Package;
pub use packages::Packages;
