//! Project manifest: `gopherino.json` loading, saving, and discovery.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FILE_NAME: &str = "gopherino.json";

#[derive(Debug, Error)]
pub enum ManifestError {
  /// The directory holds no manifest.
  #[error("no gopherino.json found in {dir} — run `gopherino init` first")]
  NotFound { dir: String },

  /// Nothing up the tree holds a manifest either.
  #[error("no gopherino.json found (searched from {start} upward)")]
  NotFoundUpward { start: String },

  #[error("reading gopherino.json: {0}")]
  Io(#[from] std::io::Error),

  #[error("parsing gopherino.json: {0}")]
  Parse(#[from] serde_json::Error),
}

/// The project manifest, as persisted in `gopherino.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  pub name: String,
  pub version: String,
  pub board: String,
  pub go_version: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub description: String,
  pub dependencies: Vec<Dependency>,
  pub build: BuildConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
  pub name: String,
  pub version: String,
  /// "go" | "arduino" | "local"
  pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
  pub output_dir: String,
  pub cpp_std: String,
  pub optimize: String,
  pub extra_flags: Vec<String>,
  pub source_map: bool,
}

impl Manifest {
  /// A new manifest with project defaults.
  pub fn new(name: &str, board: &str) -> Self {
    Manifest {
      name: name.to_string(),
      version: "0.1.0".to_string(),
      board: board.to_string(),
      go_version: "1.21".to_string(),
      description: String::new(),
      dependencies: Vec::new(),
      build: BuildConfig {
        output_dir: "build".to_string(),
        cpp_std: "c++11".to_string(),
        optimize: "Os".to_string(),
        extra_flags: Vec::new(),
        source_map: false,
      },
    }
  }

  /// Read the manifest from `dir`.
  pub fn load(dir: &Path) -> Result<Self, ManifestError> {
    let path = dir.join(FILE_NAME);
    let data = std::fs::read_to_string(&path).map_err(|err| {
      if err.kind() == std::io::ErrorKind::NotFound {
        ManifestError::NotFound {
          dir: dir.display().to_string(),
        }
      } else {
        ManifestError::Io(err)
      }
    })?;
    Ok(serde_json::from_str(&data)?)
  }

  /// Write the manifest into `dir`.
  pub fn save(&self, dir: &Path) -> Result<(), ManifestError> {
    let mut data = serde_json::to_string_pretty(self)?;
    data.push('\n');
    std::fs::write(dir.join(FILE_NAME), data)?;
    Ok(())
  }

  /// Search upward from `start` for a manifest; returns the directory that
  /// holds it along with the parsed manifest.
  pub fn find(start: &Path) -> Result<(PathBuf, Self), ManifestError> {
    let mut dir = start;
    loop {
      if dir.join(FILE_NAME).is_file() {
        return Ok((dir.to_path_buf(), Self::load(dir)?));
      }
      match dir.parent() {
        Some(parent) => dir = parent,
        None => break,
      }
    }
    Err(ManifestError::NotFoundUpward {
      start: start.display().to_string(),
    })
  }
}
