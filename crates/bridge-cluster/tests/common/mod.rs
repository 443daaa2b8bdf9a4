//! Common test helpers for bridge-cluster integration tests
//!
//! Mock `helm`/`kubectl` executables are shell scripts written into a temp
//! directory. Each script logs its arguments so tests can assert on the exact
//! invocation, then prints canned output and exits with a fixed code.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temp directory holding mock executables
pub struct MockBin {
    pub dir: TempDir,
}

impl MockBin {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Absolute path of the mock named `name`
    pub fn path(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }

    /// Lines logged by the mock named `name`, one per invocation
    #[allow(dead_code)]
    pub fn log(&self, name: &str) -> Vec<String> {
        read_mock_log(self.dir.path(), name)
    }
}

/// Creates a mock executable that prints `stdout` and exits with `exit_code`
pub fn create_mock_executable(
    dir: &Path,
    name: &str,
    stdout: &str,
    exit_code: i32,
) -> Result<PathBuf> {
    let log_path = dir.join(format!("{}.log", name));
    let script = format!(
        r#"#!/bin/sh
echo "$*" >> "{log}"
cat <<'MOCK_OUTPUT'
{stdout}
MOCK_OUTPUT
exit {exit_code}
"#,
        log = log_path.display(),
    );
    write_script(dir, name, &script)
}

/// Creates a mock that picks its output by substring match on the arguments.
/// Unmatched invocations print `default_stderr` to stderr and exit 1.
#[allow(dead_code)]
pub fn create_conditional_mock(
    dir: &Path,
    name: &str,
    conditions: &[(&str, &str)], // (arg_pattern, stdout)
    default_stderr: &str,
) -> Result<PathBuf> {
    let log_path = dir.join(format!("{}.log", name));
    let mut script = format!(
        r#"#!/bin/sh
echo "$*" >> "{log}"
ALL_ARGS="$*"
"#,
        log = log_path.display(),
    );

    for (i, (pattern, stdout)) in conditions.iter().enumerate() {
        let keyword = if i == 0 { "if" } else { "elif" };
        script.push_str(&format!(
            r#"{keyword} echo "$ALL_ARGS" | grep -qF -- '{pattern}'; then
  cat <<'MOCK_OUT_{i}'
{stdout}
MOCK_OUT_{i}
  exit 0
"#
        ));
    }

    if conditions.is_empty() {
        script.push_str(&format!("echo '{}' >&2\nexit 1\n", default_stderr));
    } else {
        script.push_str(&format!("else\n  echo '{}' >&2\n  exit 1\nfi\n", default_stderr));
    }

    write_script(dir, name, &script)
}

fn write_script(dir: &Path, name: &str, script: &str) -> Result<PathBuf> {
    let script_path = dir.join(name);
    std::fs::write(&script_path, script)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&script_path, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(script_path)
}

/// Read the invocation log for a mock executable
pub fn read_mock_log(dir: &Path, name: &str) -> Vec<String> {
    std::fs::read_to_string(dir.join(format!("{}.log", name)))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
