//! Wrapper around the external source translator (`gopherino-core`).
//!
//! The translator turns one Go source file into one C++ file the toolchain
//! can compile. It is invoked once per file and fully drained before its
//! result is inspected; failures arrive as free text on stderr and are
//! normalized with the translator grammar.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::diag::{self, SourceKind, Traceback};

pub const DEFAULT_BINARY: &str = "gopherino-core";

#[derive(Debug, Error)]
pub enum TranslateError {
  /// The translator exited non-zero; the normalized diagnostic rides along.
  #[error("transpilation failed")]
  Failed { traceback: Traceback },

  /// The binary could not be spawned at all.
  #[error("cannot run {binary}: {source}")]
  Spawn {
    binary: String,
    #[source]
    source: std::io::Error,
  },
}

/// Handle on the translator binary.
#[derive(Debug, Clone)]
pub struct Translator {
  binary: String,
}

/// Output of one successful translation.
#[derive(Debug, Clone)]
pub struct Translation {
  pub output_file: PathBuf,
  /// Warning lines, in the order the translator emitted them.
  pub warnings: Vec<String>,
}

/// Findings from one `--check` run.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
  pub warnings: Vec<String>,
  pub errors: Vec<String>,
  /// Whether the translator itself exited zero.
  pub passed: bool,
}

impl Translator {
  /// A translator using the given binary path; empty searches PATH for the
  /// default binary name.
  pub fn new(binary: &str) -> Self {
    let binary = if binary.is_empty() {
      DEFAULT_BINARY.to_string()
    } else {
      binary.to_string()
    };
    Translator { binary }
  }

  pub fn binary(&self) -> &str {
    &self.binary
  }

  /// Whether the binary can be spawned at all.
  pub async fn installed(&self) -> bool {
    Command::new(&self.binary)
      .arg("--version")
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .status()
      .await
      .is_ok()
  }

  /// Translate a single source file.
  pub async fn translate(
    &self,
    input: &Path,
    output: &Path,
    board: &str,
    source_map: bool,
  ) -> Result<Translation, TranslateError> {
    let mut cmd = Command::new(&self.binary);
    cmd
      .arg(input)
      .arg(output)
      .arg("--board")
      .arg(board);
    if source_map {
      cmd.arg("--source-map");
    }

    debug!(binary = %self.binary, input = %input.display(), board, "invoking translator");

    let out = cmd.output().await.map_err(|source| TranslateError::Spawn {
      binary: self.binary.clone(),
      source,
    })?;
    let stderr = String::from_utf8_lossy(&out.stderr);

    if !out.status.success() {
      let traceback = diag::normalize(&stderr, SourceKind::Translator { input_file: input });
      return Err(TranslateError::Failed { traceback });
    }

    Ok(Translation {
      output_file: output.to_path_buf(),
      warnings: warning_lines(&stderr),
    })
  }

  /// Validate a source file without producing output.
  pub async fn check(&self, input: &Path, board: &str) -> Result<CheckOutcome, TranslateError> {
    debug!(binary = %self.binary, input = %input.display(), board, "checking source");

    let out = Command::new(&self.binary)
      .arg(input)
      .arg("--board")
      .arg(board)
      .arg("--check")
      .output()
      .await
      .map_err(|source| TranslateError::Spawn {
        binary: self.binary.clone(),
        source,
      })?;

    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let combined = format!("{stdout}{stderr}");

    Ok(CheckOutcome {
      warnings: warning_lines(&combined),
      errors: error_lines(&stderr),
      passed: out.status.success(),
    })
  }

  /// Version string of the translator binary.
  pub async fn version(&self) -> Result<String, TranslateError> {
    let out = Command::new(&self.binary)
      .arg("--version")
      .output()
      .await
      .map_err(|source| TranslateError::Spawn {
        binary: self.binary.clone(),
        source,
      })?;
    Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
  }
}

fn warning_lines(output: &str) -> Vec<String> {
  matching_lines(output, "warning")
}

fn error_lines(output: &str) -> Vec<String> {
  matching_lines(output, "error")
}

fn matching_lines(output: &str, needle: &str) -> Vec<String> {
  output
    .lines()
    .filter(|line| line.to_lowercase().contains(needle))
    .map(|line| line.trim().to_string())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_binary_falls_back_to_default() {
    assert_eq!(Translator::new("").binary(), DEFAULT_BINARY);
    assert_eq!(Translator::new("/opt/core").binary(), "/opt/core");
  }

  #[test]
  fn warning_lines_match_case_insensitively() {
    let output = "Warning: unused variable `x`\nall good\nwarning: shadowed name\n";
    assert_eq!(
      warning_lines(output),
      vec!["Warning: unused variable `x`", "warning: shadowed name"]
    );
  }

  #[test]
  fn error_lines_ignore_unrelated_output() {
    let output = "checking...\nerror[E001]: nope\ndone\n";
    assert_eq!(error_lines(output), vec!["error[E001]: nope"]);
  }

  #[tokio::test]
  async fn installed_is_false_for_missing_binary() {
    let translator = Translator::new("/definitely/not/a/real/binary");
    assert!(!translator.installed().await);
  }
}
