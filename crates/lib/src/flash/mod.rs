//! Firmware upload: resolve a serial endpoint, then hand previously
//! compiled artifacts to the toolchain's uploader.
//!
//! This is a sibling pipeline to the build, not part of it: it assumes
//! `gopherino build --compile` already populated the cache directory.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::boards;
use crate::build::DEFAULT_TOOLCHAIN;
use crate::diag::{self, SourceKind, Traceback};
use crate::manifest::Manifest;

/// Options for one upload run.
#[derive(Debug, Clone, Default)]
pub struct FlashOptions {
  /// Serial port; empty triggers auto-detection.
  pub port: String,
  /// Board override; empty means the manifest default.
  pub board: String,
  /// Directory with compiled firmware; empty means
  /// `<project>/<manifest output_dir>/.cache`.
  pub build_dir: String,
  /// Pass the toolchain's verbose flag through.
  pub verbose: bool,
  /// Toolchain binary override; empty means `arduino-cli`.
  pub toolchain: String,
}

#[derive(Debug, Error)]
pub enum FlashError {
  #[error("unknown board {id:?} — run `gopherino boards list` for the full list")]
  UnknownBoard { id: String },

  /// Auto-detection came up empty.
  #[error(
    "no board detected: {reason}\n  \
     Hint: connect the board and try again, or pass --port /dev/ttyUSBx"
  )]
  NoPortDetected { reason: String },

  /// The uploader exited non-zero; the normalized diagnostic rides along.
  #[error("upload failed")]
  Upload { traceback: Traceback },

  #[error("cannot run {binary}: {source}")]
  ToolchainSpawn {
    binary: String,
    #[source]
    source: std::io::Error,
  },
}

/// Upload compiled firmware to the connected board.
pub async fn run(
  project_dir: &Path,
  manifest: &Manifest,
  opts: &FlashOptions,
) -> Result<(), FlashError> {
  let board = if opts.board.is_empty() {
    manifest.board.as_str()
  } else {
    opts.board.as_str()
  };

  let Some(fqbn) = boards::fqbn(board) else {
    return Err(FlashError::UnknownBoard {
      id: board.to_string(),
    });
  };

  let toolchain = if opts.toolchain.is_empty() {
    DEFAULT_TOOLCHAIN
  } else {
    opts.toolchain.as_str()
  };

  let port = if opts.port.is_empty() {
    info!("auto-detecting board on serial ports");
    let port = detect_port(toolchain).await?;
    info!(port = %port, "board found");
    port
  } else {
    opts.port.clone()
  };

  let build_dir = if opts.build_dir.is_empty() {
    project_dir.join(&manifest.build.output_dir).join(".cache")
  } else {
    PathBuf::from(&opts.build_dir)
  };

  info!(port = %port, fqbn, dir = %build_dir.display(), "uploading firmware");

  let mut cmd = Command::new(toolchain);
  cmd
    .arg("upload")
    .arg("--fqbn")
    .arg(fqbn)
    .arg("--port")
    .arg(&port)
    .arg("--input-dir")
    .arg(&build_dir);
  if opts.verbose {
    cmd.arg("--verbose");
  }

  let out = cmd.output().await.map_err(|source| FlashError::ToolchainSpawn {
    binary: toolchain.to_string(),
    source,
  })?;

  if !out.status.success() {
    let mut combined = String::from_utf8_lossy(&out.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&out.stderr));
    let traceback = diag::normalize(&combined, SourceKind::Uploader { port: &port });
    return Err(FlashError::Upload { traceback });
  }
  Ok(())
}

/// First plausible serial endpoint reported by the toolchain's device
/// listing. Linux exposes `/dev/ttyUSB*` and `/dev/ttyACM*`, macOS
/// `/dev/cu.*`, Windows `COMx`; the `/dev/` and `COM` prefixes cover all
/// three.
pub async fn detect_port(toolchain: &str) -> Result<String, FlashError> {
  debug!(toolchain, "listing serial devices");

  let out = Command::new(toolchain)
    .arg("board")
    .arg("list")
    .output()
    .await
    .map_err(|source| FlashError::ToolchainSpawn {
      binary: toolchain.to_string(),
      source,
    })?;

  if !out.status.success() {
    return Err(FlashError::NoPortDetected {
      reason: format!("{toolchain} board list failed"),
    });
  }

  let listing = String::from_utf8_lossy(&out.stdout);
  first_port(&listing).ok_or_else(|| FlashError::NoPortDetected {
    reason: "no board found on any serial port".to_string(),
  })
}

/// First port-looking token in device-listing output; one device per line,
/// endpoint name first.
fn first_port(listing: &str) -> Option<String> {
  listing.lines().find_map(|line| {
    let first = line.split_whitespace().next()?;
    (first.starts_with("/dev/") || first.starts_with("COM")).then(|| first.to_string())
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_port_skips_headers_and_prose() {
    let listing = "Port         Protocol  Type    Board\n\
                   /dev/ttyUSB0 serial    Serial  Arduino Uno\n\
                   /dev/ttyACM0 serial    Serial  Arduino Mega\n";
    assert_eq!(first_port(listing), Some("/dev/ttyUSB0".to_string()));
  }

  #[test]
  fn first_port_accepts_windows_com_ports() {
    assert_eq!(
      first_port("COM3 serial Serial Arduino Uno\n"),
      Some("COM3".to_string())
    );
  }

  #[test]
  fn first_port_handles_empty_listing() {
    assert_eq!(first_port(""), None);
    assert_eq!(first_port("No boards found.\n"), None);
  }
}
