//! External test-suite runner for the integration-test endpoint.
//!
//! Spawns the configured command (by default the workspace's own
//! integration-test crate, including its `#[ignore]`-gated live-server
//! tests) and parses the libtest summary lines into structured results.

use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;

use crate::config::TestRunnerConfig;

/// Default command: run the workspace integration suite against this server.
const DEFAULT_COMMAND: &[&str] = &[
    "cargo",
    "test",
    "-p",
    "driftline-integration-tests",
    "--",
    "--include-ignored",
];

/// Errors that can occur when running the external test suite.
#[derive(Debug, Error)]
pub enum TestRunnerError {
    /// The configured command was empty.
    #[error("test runner command is empty")]
    EmptyCommand,

    /// Spawning the process failed.
    #[error("failed to spawn test runner: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Structured outcome of one test-suite run.
///
/// Unlike every other endpoint, runner diagnostics are included verbatim —
/// this endpoint exists to surface them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunResults {
    pub success: bool,
    pub passed: u32,
    pub failed: u32,
    pub ignored: u32,
    pub output: String,
}

/// Runs the external test suite as a child process.
pub struct TestRunner {
    command: Vec<String>,
}

impl TestRunner {
    /// Build a runner from config, falling back to the default command.
    #[must_use]
    pub fn from_config(config: &TestRunnerConfig) -> Self {
        let command = config.command.as_ref().map_or_else(
            || DEFAULT_COMMAND.iter().map(ToString::to_string).collect(),
            |raw| raw.split_whitespace().map(ToString::to_string).collect(),
        );
        Self { command }
    }

    /// Run the full suite and collect structured results.
    ///
    /// # Errors
    ///
    /// Returns `TestRunnerError` if the command is empty or cannot be
    /// spawned. A suite that runs but fails is a successful call with
    /// `success: false`.
    pub async fn run(&self) -> Result<TestRunResults, TestRunnerError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or(TestRunnerError::EmptyCommand)?;

        tracing::info!(command = %self.command.join(" "), "Running integration test suite");

        let output = Command::new(program).args(args).output().await?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        let (passed, failed, ignored) = parse_summary(&combined);

        Ok(TestRunResults {
            success: output.status.success(),
            passed,
            failed,
            ignored,
            output: combined,
        })
    }
}

/// Sum libtest `test result:` summary lines across all suites in the output.
///
/// Returns zeros when no summary line is present (e.g. the command failed
/// before any suite ran); the exit status still reports the failure.
fn parse_summary(output: &str) -> (u32, u32, u32) {
    let mut passed = 0;
    let mut failed = 0;
    let mut ignored = 0;

    for line in output.lines() {
        let Some(rest) = line.trim().strip_prefix("test result:") else {
            continue;
        };

        // "ok. 5 passed; 1 failed; 2 ignored; 0 measured; 0 filtered out; ..."
        for part in rest.split(';') {
            let mut tokens = part.split_whitespace().rev();
            let (Some(label), Some(count)) = (tokens.next(), tokens.next()) else {
                continue;
            };
            let Ok(n) = count.parse::<u32>() else {
                continue;
            };
            match label {
                "passed" => passed += n,
                "failed" => failed += n,
                "ignored" => ignored += n,
                _ => {}
            }
        }
    }

    (passed, failed, ignored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_suite() {
        let output = "\nrunning 6 tests\n......\ntest result: ok. 5 passed; 0 failed; 1 ignored; 0 measured; 0 filtered out; finished in 0.42s\n";
        assert_eq!(parse_summary(output), (5, 0, 1));
    }

    #[test]
    fn test_parse_sums_multiple_suites() {
        let output = "\
test result: ok. 3 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out; finished in 0.10s
test result: FAILED. 2 passed; 1 failed; 0 ignored; 0 measured; 0 filtered out; finished in 0.20s
";
        assert_eq!(parse_summary(output), (5, 1, 0));
    }

    #[test]
    fn test_parse_no_summary_lines() {
        assert_eq!(parse_summary("error: could not compile"), (0, 0, 0));
        assert_eq!(parse_summary(""), (0, 0, 0));
    }

    #[test]
    fn test_from_config_default_command() {
        let runner = TestRunner::from_config(&TestRunnerConfig::default());
        assert_eq!(runner.command.first().map(String::as_str), Some("cargo"));
    }

    #[test]
    fn test_from_config_override() {
        let runner = TestRunner::from_config(&TestRunnerConfig {
            command: Some("echo hello".to_string()),
        });
        assert_eq!(runner.command, vec!["echo", "hello"]);
    }
}
