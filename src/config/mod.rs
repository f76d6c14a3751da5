//! Configuration types and layered configuration support.
//!
//! Configuration comes from two layers: the optional TOML config file
//! ([`file::FileConfig`]) and the command line, with CLI arguments taking
//! priority. This module groups the option structs the rest of the crate
//! consumes once the layers are merged.

pub mod file;
pub mod scan;

pub use file::FileConfig;
pub use scan::ScanOptions;
