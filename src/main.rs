//! # catkin-inspect
//!
//! A CLI tool for inspecting ROS/catkin workspaces.
//!
//! The tool answers the questions an editor integration or a developer on the
//! command line keeps asking about a workspace: which packages does it contain,
//! which compiler include directories do its package targets declare, what
//! environment does a setup file produce, and where are a package's
//! executables and launch files.
//!
//! ## Usage
//!
//! ```bash
//! # Include directories of a built workspace
//! catkin-inspect --workspace ~/catkin_ws includes
//!
//! # Packages in the workspace source tree
//! catkin-inspect --workspace ~/catkin_ws packages
//!
//! # Installed packages, under the noetic environment
//! catkin-inspect --setup /opt/ros/noetic/setup.bash packages --installed
//!
//! # Machine-readable output
//! catkin-inspect --json distros
//! ```

mod cli;

use std::collections::BTreeMap;
use std::path::Path;
use std::process::exit;

use anyhow::{Ok, Result, bail};
use catkin_inspect::{
    config::FileConfig,
    distros::{DISTRO_ROOT, installed_distros},
    env::source_setup_file,
    includes::extract_include_dirs,
    output::{JsonEnv, JsonIncludes, JsonInstalledPackages, JsonList, JsonPackages},
    package::Packages,
    rospack::{find_package_executables, find_package_launch_files, list_packages},
    runner::{CommandRunner, ShellRunner},
    scanner::Scanner,
};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;

/// Entry point for the catkin-inspect application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and
/// printing any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// This function orchestrates the full pipeline: parse arguments, merge the
/// config file, resolve the workspace and environment, and dispatch to the
/// selected inspection.
///
/// # Errors
///
/// Returns errors from thread-pool configuration, workspace inspection,
/// command execution, or JSON serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Commands::Config { ref command } = args.subcommand {
        return handle_config_command(command);
    }

    let file_config = load_config(args.json(&FileConfig::default()));
    let json_mode = args.json(&file_config);
    let workspace = args.workspace(&file_config);
    let scan_options = args.scan_options(&file_config);
    let setup_file = args.setup_file(&file_config);

    if scan_options.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(scan_options.threads)
            .build_global()?;
    }

    match args.subcommand {
        Commands::Includes => run_includes(&workspace, json_mode),
        Commands::Packages { installed: false } => {
            let scanner = Scanner::new(scan_options).with_quiet(json_mode);
            run_workspace_packages(&scanner, &workspace, json_mode)
        }
        Commands::Packages { installed: true } => {
            let runner = ShellRunner;
            let env = resolve_env(&runner, setup_file.as_deref())?;
            run_installed_packages(&runner, env.as_ref(), json_mode)
        }
        Commands::Distros => run_distros(json_mode),
        Commands::Env { ref setup_file } => run_env(setup_file, json_mode),
        Commands::Executables { ref package } => {
            let runner = ShellRunner;
            let env = resolve_env(&runner, setup_file.as_deref())?;
            let executables = find_package_executables(&runner, env.as_ref(), package)?;
            print_paths(
                &executables,
                &format!("🚀 Executables of {}", package.bold()),
                &format!("No executables found for {package}"),
                json_mode,
            )
        }
        Commands::LaunchFiles { ref package } => {
            let runner = ShellRunner;
            let env = resolve_env(&runner, setup_file.as_deref())?;
            let launch_files = find_package_launch_files(&runner, env.as_ref(), package)?;
            print_paths(
                &launch_files,
                &format!("🚀 Launch files of {}", package.bold()),
                &format!("No launch files found for {package}"),
                json_mode,
            )
        }
        Commands::Config { .. } => Ok(()), // handled above
    }
}

// ── Inspections ─────────────────────────────────────────────────────────

/// Run the `includes` inspection against a workspace root.
fn run_includes(workspace: &Path, json_mode: bool) -> Result<()> {
    let include_dirs = extract_include_dirs(workspace)?;

    if json_mode {
        let output = JsonIncludes::new(workspace, include_dirs);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if include_dirs.is_empty() {
        println!("{}", "No include directories declared by package targets".yellow());
        return Ok(());
    }

    println!("{}", "🔍 Include directories:".bold());
    for dir in &include_dirs {
        println!("  {dir}");
    }

    Ok(())
}

/// Run the workspace source scan and print the found packages.
fn run_workspace_packages(scanner: &Scanner, workspace: &Path, json_mode: bool) -> Result<()> {
    let mut found = scanner.scan_workspace(workspace);
    found.sort_by(|a, b| a.name.cmp(&b.name));

    let packages: Packages = found.into();

    if json_mode {
        let output = JsonPackages::from_packages(packages.as_slice());
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if packages.is_empty() {
        println!("{}", "✨ No packages found in the workspace!".green());
        return Ok(());
    }

    println!("{}", "📊 Found packages:".bold());
    packages.print_summary();

    Ok(())
}

/// Query `rospack` for the installed packages and print them.
fn run_installed_packages(
    runner: &dyn CommandRunner,
    env: Option<&BTreeMap<String, String>>,
    json_mode: bool,
) -> Result<()> {
    let packages = list_packages(runner, env)?;

    if json_mode {
        let output = JsonInstalledPackages::from_map(&packages);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "📊 Installed packages:".bold());
    for (name, path) in &packages {
        println!("  {} ({})", name.bold(), path.display().to_string().cyan());
    }
    println!(
        "  💾 {} packages",
        packages.len().to_string().bright_white()
    );

    Ok(())
}

/// List the ROS distributions installed under `/opt/ros`.
fn run_distros(json_mode: bool) -> Result<()> {
    let distros = installed_distros(Path::new(DISTRO_ROOT))?;

    if json_mode {
        let output = JsonList::from_strings(distros);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if distros.is_empty() {
        println!("{}", format!("No ROS distributions found in {DISTRO_ROOT}").yellow());
        return Ok(());
    }

    for distro in &distros {
        println!("{distro}");
    }

    Ok(())
}

/// Source a setup file and print the environment it produces.
fn run_env(setup_file: &Path, json_mode: bool) -> Result<()> {
    let env = source_setup_file(&ShellRunner, setup_file, None)?;

    if json_mode {
        let output = JsonEnv {
            setup_file: setup_file.display().to_string(),
            env,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (key, value) in &env {
        println!("{key}={value}");
    }

    Ok(())
}

// ── Helper functions ────────────────────────────────────────────────────

/// Resolve the environment ROS tools should run under.
///
/// When a setup file is given its sourced environment is captured and
/// returned; otherwise `None` is returned and tools inherit the current
/// process environment.
fn resolve_env(
    runner: &dyn CommandRunner,
    setup_file: Option<&Path>,
) -> Result<Option<BTreeMap<String, String>>> {
    match setup_file {
        Some(file) => Ok(Some(source_setup_file(runner, file, None)?)),
        None => Ok(None),
    }
}

/// Print a path listing in JSON or human-readable form.
fn print_paths(
    paths: &[std::path::PathBuf],
    header: &str,
    empty_message: &str,
    json_mode: bool,
) -> Result<()> {
    if json_mode {
        let output = JsonList::from_paths(paths);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if paths.is_empty() {
        println!("{}", empty_message.yellow());
        return Ok(());
    }

    println!("{header}");
    for path in paths {
        println!("  {}", path.display());
    }

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# catkin-inspect configuration
# All values shown are their defaults. Uncomment and change as needed.

# Default workspace root to inspect (defaults to the current directory when not set)
# workspace = "~/catkin_ws"

# Default ROS distro; commands that query ROS tools source
# /opt/ros/<distro>/setup.bash when no --setup is given
# distro = "noetic"

[scanning]
# Number of threads to use for scanning (0 = all CPU cores)
# threads = 0

# Show access errors encountered during scanning
# verbose = false

# Directories to skip during scanning
# skip = []

[output]
# Emit JSON instead of human-readable output
# json = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_usize(val: Option<usize>, default: &str) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_path(val: Option<&std::path::PathBuf>, default: &str) -> String {
        val.map_or_else(
            || format!("{default}  (default)"),
            |p| format!("\"{}\"", p.display()),
        )
    }
    fn show_paths(val: Option<&[std::path::PathBuf]>) -> String {
        match val {
            Some(v) if !v.is_empty() => {
                let items: Vec<String> = v.iter().map(|p| format!("\"{}\"", p.display())).collect();
                format!("[{}]", items.join(", "))
            }
            _ => "[]  (default)".to_string(),
        }
    }

    format!(
        "\
workspace  = {workspace}
distro     = {distro}

[scanning]
threads    = {threads}
verbose    = {verbose}
skip       = {skip}

[output]
json       = {json}",
        workspace = show_path(config.workspace.as_ref(), "\".\""),
        distro = config
            .distro
            .as_deref()
            .map_or_else(|| "(none)  (default)".to_string(), |v| format!("\"{v}\"")),
        threads = show_usize(config.scanning.threads, "0 (all cores)"),
        verbose = show_bool(config.scanning.verbose, false),
        skip = show_paths(config.scanning.skip.as_deref()),
        json = show_bool(config.output.json, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        std::result::Result::Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}
