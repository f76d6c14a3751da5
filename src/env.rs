//! Setup-file sourcing and environment capture.
//!
//! ROS workspaces are activated by sourcing a generated shell script
//! (`/opt/ros/<distro>/setup.bash`, `<ws>/devel/setup.bash`). This module
//! runs such a script through `bash` and captures the resulting environment
//! so it can be handed to other tools without polluting the current process.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::runner::{CommandEnv, CommandRunner};

/// Source a setup file and return the environment it produces.
///
/// Runs `bash -c "source '<file>' && env"` and parses the printed
/// environment. When `base_env` is provided it replaces the spawned shell's
/// environment, so the result reflects exactly what the setup file adds on
/// top of it.
///
/// # Arguments
///
/// * `runner` - Command execution capability
/// * `setup_file` - Path to the setup script to source
/// * `base_env` - Environment the shell starts from (`None` = inherit)
///
/// # Errors
///
/// Returns an error when the shell cannot be spawned or the setup file fails
/// to source (non-zero exit).
pub fn source_setup_file(
    runner: &dyn CommandRunner,
    setup_file: &Path,
    base_env: CommandEnv,
) -> Result<BTreeMap<String, String>> {
    let script = format!("source '{}' && env", setup_file.display());

    let stdout = runner
        .run("bash", &["-c", &script], base_env)
        .with_context(|| format!("failed to source {}", setup_file.display()))?;

    Ok(parse_env_output(&stdout))
}

/// Parse `env`-style output into a map.
///
/// Each line is split on its *first* `=`; lines without a separator (e.g.
/// continuation lines of multi-line values) are skipped. Later occurrences of
/// a key overwrite earlier ones.
#[must_use]
pub fn parse_env_output(output: &str) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();

    for line in output.lines() {
        if let Some((key, value)) = line.split_once('=') {
            env.insert(key.to_string(), value.to_string());
        }
    }

    env
}
