//! Implementation of the `gopherino clean` command.

use anyhow::{Context, Result};

use gopherino_lib::manifest::Manifest;

use crate::output;

/// Remove the project's build directory. An absent directory is a no-op.
pub fn cmd_clean() -> Result<()> {
  let cwd = std::env::current_dir().context("cannot determine current directory")?;
  let (project_dir, manifest) = Manifest::find(&cwd)?;

  let build_dir = project_dir.join(&manifest.build.output_dir);
  if !build_dir.exists() {
    output::print_info(&format!(
      "{} does not exist — nothing to clean",
      manifest.build.output_dir
    ));
    return Ok(());
  }

  std::fs::remove_dir_all(&build_dir)
    .with_context(|| format!("removing {}", build_dir.display()))?;
  output::print_success(&format!("Removed {}", build_dir.display()));
  Ok(())
}
