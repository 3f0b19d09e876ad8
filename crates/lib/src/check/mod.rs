//! Source validation without output: the translator's `--check` mode run
//! across the whole project.
//!
//! Unlike the build pipeline, the check sweep does not stop at the first
//! failing file. The report covering every file is the point.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::build;
use crate::manifest::Manifest;
use crate::translator::{TranslateError, Translator};

#[derive(Debug, Error)]
pub enum CheckError {
  #[error(
    "{binary} not found — install it or set core_binary in your config\n  \
     gopherino config set core_binary /path/to/gopherino-core"
  )]
  TranslatorMissing { binary: String },

  #[error("no .go files found in {dir}")]
  NoSources { dir: String },

  #[error(transparent)]
  Translator(#[from] TranslateError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Options for one check sweep.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
  /// Board override; empty means the manifest default.
  pub board: String,
  /// Translator binary override; empty searches PATH.
  pub core_binary: String,
}

/// Findings for one file.
#[derive(Debug, Clone)]
pub struct FileReport {
  pub file: PathBuf,
  pub warnings: Vec<String>,
  pub errors: Vec<String>,
}

/// Findings for the whole project, in source order.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
  pub files: Vec<FileReport>,
}

impl CheckReport {
  pub fn warning_count(&self) -> usize {
    self.files.iter().map(|f| f.warnings.len()).sum()
  }

  pub fn error_count(&self) -> usize {
    self.files.iter().map(|f| f.errors.len()).sum()
  }

  pub fn is_clean(&self) -> bool {
    self.error_count() == 0
  }
}

/// Check every source file under `<project>/src`.
pub async fn run(
  project_dir: &Path,
  manifest: &Manifest,
  opts: &CheckOptions,
) -> Result<CheckReport, CheckError> {
  let board = if opts.board.is_empty() {
    manifest.board.as_str()
  } else {
    opts.board.as_str()
  };

  let translator = Translator::new(&opts.core_binary);
  if !translator.installed().await {
    return Err(CheckError::TranslatorMissing {
      binary: translator.binary().to_string(),
    });
  }

  let src_dir = project_dir.join("src");
  let files = build::discover_sources(&src_dir)?;
  if files.is_empty() {
    return Err(CheckError::NoSources {
      dir: src_dir.display().to_string(),
    });
  }

  let mut report = CheckReport::default();
  for file in files {
    info!(file = %file.display(), board, "checking");
    let outcome = translator.check(&file, board).await?;
    report.files.push(FileReport {
      file,
      warnings: outcome.warnings,
      errors: outcome.errors,
    });
  }
  Ok(report)
}
