//! Running external command-line tools (CocoaPods, Flutter) with captured output
//!
//! Tool failures are reported as a `ToolOutcome` instead of an error: the
//! caller decides whether a failed install or build is worth stopping for.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Succeeded,
    /// The tool ran and exited unsuccessfully
    Failed { code: Option<i32>, stderr: String },
    /// The tool could not be started at all (not installed, not executable, ...)
    Unavailable { reason: String },
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Succeeded)
    }

    /// Text worth showing the user when the tool did not succeed
    pub fn detail(&self) -> String {
        match self {
            ToolOutcome::Succeeded => String::new(),
            ToolOutcome::Failed { code, stderr } => {
                let stderr = stderr.trim();
                match (code, stderr.is_empty()) {
                    (Some(code), true) => format!("exited with status {}", code),
                    (None, true) => "terminated by signal".to_string(),
                    _ => stderr.to_string(),
                }
            }
            ToolOutcome::Unavailable { reason } => reason.clone(),
        }
    }
}

/// Resolve `program` for a child running in `cwd`.
///
/// Bare names are left for PATH lookup; relative paths such as
/// `./flutter/bin/flutter` are anchored at the child's working directory so
/// the parent's own working directory never matters.
pub fn resolve_program(program: &str, cwd: &Path) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        cwd.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Run `program args...` inside `cwd`, capturing stdout and stderr
pub fn run_tool(program: &str, args: &[&str], cwd: &Path) -> ToolOutcome {
    // The child resolves the joined program path from inside cwd, so cwd must be absolute
    let cwd = fs::canonicalize(cwd).unwrap_or_else(|_| cwd.to_path_buf());
    let resolved = resolve_program(program, &cwd);

    let output = Command::new(&resolved)
        .args(args)
        .current_dir(&cwd)
        .output();

    match output {
        Ok(output) if output.status.success() => ToolOutcome::Succeeded,
        Ok(output) => ToolOutcome::Failed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Err(e) => ToolOutcome::Unavailable {
            reason: format!("Failed to run {}: {}", resolved.display(), e),
        },
    }
}
