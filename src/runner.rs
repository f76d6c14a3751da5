//! Subprocess invocation behind a trait for testable command execution.
//!
//! Every helper that shells out (`rospack`, `catkin_find`, setup-file
//! sourcing) takes a [`CommandRunner`] rather than spawning processes
//! directly, so the parsing logic can be exercised against canned output.
//! The include-directory extractor deliberately takes no runner at all.

use std::collections::BTreeMap;
use std::process::Command;

use anyhow::{Result, bail};

/// An environment to run a command under.
///
/// `None` inherits the current process environment; `Some(map)` replaces it
/// entirely, which is how sourced ROS environments are propagated to the
/// tools that need them.
pub type CommandEnv<'a> = Option<&'a BTreeMap<String, String>>;

/// Abstraction over running an external command and capturing its stdout.
pub trait CommandRunner {
    /// Run `program` with `args` and return its stdout as a string.
    ///
    /// # Errors
    ///
    /// Returns an error when the program cannot be spawned or exits with a
    /// non-zero status; the error message carries the captured stderr.
    fn run(&self, program: &str, args: &[&str], env: CommandEnv) -> Result<String>;
}

/// The real [`CommandRunner`]: spawns processes via [`std::process::Command`].
#[derive(Debug, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, program: &str, args: &[&str], env: CommandEnv) -> Result<String> {
        let mut command = Command::new(program);
        command.args(args);

        if let Some(vars) = env {
            command.env_clear();
            command.envs(vars);
        }

        let output = command
            .output()
            .map_err(|e| anyhow::anyhow!("failed to run {program}: {e}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// A canned-output [`CommandRunner`] for tests.
///
/// Responses are keyed by the full command line (`program` followed by its
/// arguments, space-joined). Unknown command lines fail, mimicking a missing
/// tool on `$PATH`.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: BTreeMap<String, String>,
}

impl MockRunner {
    /// Create an empty mock that rejects every command.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register canned stdout for a full command line.
    #[must_use]
    pub fn with_output(mut self, command_line: &str, stdout: &str) -> Self {
        self.responses
            .insert(command_line.to_string(), stdout.to_string());
        self
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str], _env: CommandEnv) -> Result<String> {
        let mut command_line = program.to_string();
        for arg in args {
            command_line.push(' ');
            command_line.push_str(arg);
        }

        match self.responses.get(&command_line) {
            Some(stdout) => Ok(stdout.clone()),
            None => bail!("command not found: {command_line}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_runner_captures_stdout() {
        let runner = ShellRunner;
        let out = runner.run("echo", &["hello"], None).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn test_shell_runner_reports_failure_with_stderr() {
        let runner = ShellRunner;
        let err = runner
            .run("sh", &["-c", "echo oops >&2; exit 3"], None)
            .unwrap_err();
        assert!(err.to_string().contains("oops"));
    }

    #[test]
    fn test_shell_runner_replaces_environment() {
        let runner = ShellRunner;
        let mut env = BTreeMap::new();
        env.insert("ROS_DISTRO".to_string(), "noetic".to_string());
        env.insert("PATH".to_string(), "/usr/bin:/bin".to_string());

        let out = runner
            .run("sh", &["-c", "echo $ROS_DISTRO"], Some(&env))
            .unwrap();
        assert_eq!(out.trim(), "noetic");
    }

    #[test]
    fn test_mock_runner_round_trip() {
        let runner = MockRunner::new().with_output("rospack list", "roscpp /opt/ros/lib\n");

        let out = runner.run("rospack", &["list"], None).unwrap();
        assert_eq!(out, "roscpp /opt/ros/lib\n");

        assert!(runner.run("rospack", &["find", "roscpp"], None).is_err());
    }
}
