//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and subcommands
//! using the [clap](https://docs.rs/clap/) library. It provides structured
//! access to user input.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that
//! config-file values act as defaults that CLI arguments can override
//! (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use catkin_inspect::config::ScanOptions;
use catkin_inspect::config::file::{FileConfig, expand_tilde};

/// Command-line arguments for controlling workspace scanning behavior.
#[derive(Parser)]
struct ScanningArgs {
    /// The number of threads to use for workspace scanning
    ///
    /// A value of 0 uses the default number of threads (typically the number
    /// of CPU cores).
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Show access errors that occur while scanning
    ///
    /// When enabled, displays errors encountered while reading package
    /// manifests during the scanning process.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Directories to skip during scanning
    ///
    /// These directories will be skipped during scans, but their parent
    /// directories may still be processed. Can be specified multiple times.
    #[arg(long, action = clap::ArgAction::Append)]
    skip: Vec<PathBuf>,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the compiler include directories declared by the workspace's
    /// package targets (requires a built workspace)
    Includes,

    /// List the packages in the workspace source tree
    Packages {
        /// Query the installed package index via `rospack` instead of
        /// scanning the workspace sources
        #[arg(long)]
        installed: bool,
    },

    /// List the ROS distributions installed under /opt/ros
    Distros,

    /// Source a setup file and print the environment it produces
    Env {
        /// Path to the setup script (e.g. /opt/ros/noetic/setup.bash)
        setup_file: PathBuf,
    },

    /// List the executables installed for a package
    Executables {
        /// The package name
        package: String,
    },

    /// List the launch files installed for a package
    LaunchFiles {
        /// The package name
        package: String,
    },

    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// This struct defines the complete command-line interface for the
/// catkin-inspect tool, combining the global options and the subcommands.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file
/// values act as defaults when the corresponding CLI argument is not
/// provided.
#[derive(Parser)]
#[command(name = "catkin-inspect")]
#[command(about = "Inspect ROS/catkin workspaces: packages, include directories, environments, executables and launch files")]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// The inspection to run
    #[command(subcommand)]
    pub subcommand: Commands,

    /// The workspace root directory
    ///
    /// Defaults to the config file's `workspace` value, then to the current
    /// directory.
    #[arg(short = 'w', long)]
    workspace: Option<PathBuf>,

    /// Setup file to source before querying ROS tools
    ///
    /// When set, commands that invoke `rospack` or `catkin_find` run under
    /// the environment this file produces. Defaults to the configured
    /// distro's setup.bash, then to the current environment.
    #[arg(long)]
    setup: Option<PathBuf>,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// When enabled, all human-readable output (colors, progress bars,
    /// emojis) is suppressed and a single JSON document is printed to stdout.
    #[arg(long)]
    json: bool,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    ///
    /// Priority: CLI flag `||` config value `||` `false`.
    #[must_use]
    pub fn json(&self, config: &FileConfig) -> bool {
        self.json || config.output.json.unwrap_or(false)
    }

    /// Resolve the workspace root from CLI args, config file, or default.
    ///
    /// Priority: CLI argument > config file `workspace` > current directory.
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn workspace(&self, config: &FileConfig) -> PathBuf {
        if let Some(ref workspace) = self.workspace {
            return workspace.clone();
        }

        if let Some(ref workspace) = config.workspace {
            return expand_tilde(workspace);
        }

        PathBuf::from(".")
    }

    /// Resolve the setup file to source before running ROS tools.
    ///
    /// Priority: CLI `--setup` > config `distro` (mapped to
    /// `/opt/ros/<distro>/setup.bash`) > none (inherit the current
    /// environment).
    #[must_use]
    pub fn setup_file(&self, config: &FileConfig) -> Option<PathBuf> {
        if let Some(ref setup) = self.setup {
            return Some(setup.clone());
        }

        config.distro.as_ref().map(|distro| {
            PathBuf::from(catkin_inspect::distros::DISTRO_ROOT)
                .join(distro)
                .join("setup.bash")
        })
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **threads**: CLI > config > `0` (default)
    /// - **verbose**: CLI flag `||` config value `||` `false`
    /// - **skip**: merged from both sources (config values first, then CLI)
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        let mut skip = config.scanning.skip.clone().unwrap_or_default();
        skip.extend(self.scanning.skip.clone());

        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            threads: self
                .scanning
                .threads
                .or(config.scanning.threads)
                .unwrap_or(0),
            skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_values() {
        let args = Cli::parse_from(["catkin-inspect", "includes"]);
        let config = FileConfig::default();

        assert_eq!(args.workspace(&config), PathBuf::from("."));
        assert!(!args.json(&config));
        assert_eq!(args.setup_file(&config), None);

        let scan_opts = args.scan_options(&config);
        assert!(!scan_opts.verbose);
        assert_eq!(scan_opts.threads, 0);
        assert!(scan_opts.skip.is_empty());
    }

    #[test]
    fn test_workspace_priority() {
        let config: FileConfig = toml::from_str("workspace = \"/from/config\"").unwrap();

        let from_config = Cli::parse_from(["catkin-inspect", "includes"]);
        assert_eq!(from_config.workspace(&config), PathBuf::from("/from/config"));

        let from_cli =
            Cli::parse_from(["catkin-inspect", "--workspace", "/from/cli", "includes"]);
        assert_eq!(from_cli.workspace(&config), PathBuf::from("/from/cli"));
    }

    #[test]
    fn test_setup_file_from_distro_config() {
        let config: FileConfig = toml::from_str("distro = \"noetic\"").unwrap();

        let args = Cli::parse_from(["catkin-inspect", "packages", "--installed"]);
        assert_eq!(
            args.setup_file(&config),
            Some(PathBuf::from("/opt/ros/noetic/setup.bash"))
        );

        let explicit =
            Cli::parse_from(["catkin-inspect", "--setup", "/ws/devel/setup.bash", "distros"]);
        assert_eq!(
            explicit.setup_file(&config),
            Some(PathBuf::from("/ws/devel/setup.bash"))
        );
    }

    #[test]
    fn test_scan_options_merge_skip_lists() {
        let config: FileConfig = toml::from_str(
            r#"
[scanning]
skip = ["third_party"]
verbose = true
"#,
        )
        .unwrap();

        let args = Cli::parse_from(["catkin-inspect", "--skip", "external", "packages"]);
        let scan_opts = args.scan_options(&config);

        assert!(scan_opts.verbose);
        assert_eq!(
            scan_opts.skip,
            vec![PathBuf::from("third_party"), PathBuf::from("external")]
        );
    }

    #[test]
    fn test_json_flag_from_either_layer() {
        let config: FileConfig = toml::from_str("[output]\njson = true").unwrap();
        let args = Cli::parse_from(["catkin-inspect", "distros"]);
        assert!(args.json(&config));

        let cli_flag = Cli::parse_from(["catkin-inspect", "--json", "distros"]);
        assert!(cli_flag.json(&FileConfig::default()));
    }

    #[test]
    fn test_subcommand_parsing() {
        let args = Cli::parse_from(["catkin-inspect", "executables", "my_robot"]);
        assert!(matches!(
            args.subcommand,
            Commands::Executables { ref package } if package == "my_robot"
        ));

        let args = Cli::parse_from(["catkin-inspect", "packages", "--installed"]);
        assert!(matches!(
            args.subcommand,
            Commands::Packages { installed: true }
        ));
    }
}
