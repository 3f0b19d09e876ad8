//! Project scaffolding for `gopherino init`.

pub mod templates;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::manifest::{self, Manifest, ManifestError};

#[derive(Debug, Error)]
pub enum InitError {
  #[error("creating directory {dir}: {source}")]
  CreateDir {
    dir: String,
    #[source]
    source: std::io::Error,
  },

  #[error("writing manifest: {0}")]
  Manifest(#[from] ManifestError),

  #[error("writing {file}: {source}")]
  WriteFile {
    file: String,
    #[source]
    source: std::io::Error,
  },
}

/// What to scaffold.
#[derive(Debug, Clone)]
pub struct InitOptions {
  pub dir: PathBuf,
  pub name: String,
  pub board: String,
}

/// What got created, and what was left alone because it already existed.
#[derive(Debug, Clone)]
pub struct InitResult {
  pub project_dir: PathBuf,
  pub manifest_path: PathBuf,
  pub main_go: PathBuf,
  pub main_go_created: bool,
  pub gitignore_created: bool,
}

/// Scaffold a new project: `src/`, manifest, blink skeleton, `.gitignore`.
/// Existing source files are never overwritten; the manifest is.
pub fn init(opts: &InitOptions) -> Result<InitResult, InitError> {
  let src_dir = opts.dir.join("src");
  for dir in [&opts.dir, &src_dir] {
    std::fs::create_dir_all(dir).map_err(|source| InitError::CreateDir {
      dir: dir.display().to_string(),
      source,
    })?;
  }

  let manifest = Manifest::new(&opts.name, &opts.board);
  manifest.save(&opts.dir)?;
  debug!(dir = %opts.dir.display(), "manifest written");

  let main_go = src_dir.join("main.go");
  let main_go_created = write_if_absent(&main_go, templates::MAIN_GO)?;

  let gitignore = opts.dir.join(".gitignore");
  let gitignore_created = write_if_absent(&gitignore, templates::GITIGNORE)?;

  Ok(InitResult {
    project_dir: opts.dir.clone(),
    manifest_path: opts.dir.join(manifest::FILE_NAME),
    main_go,
    main_go_created,
    gitignore_created,
  })
}

fn write_if_absent(path: &Path, content: &str) -> Result<bool, InitError> {
  if path.exists() {
    return Ok(false);
  }
  std::fs::write(path, content).map_err(|source| InitError::WriteFile {
    file: path.display().to_string(),
    source,
  })?;
  Ok(true)
}
