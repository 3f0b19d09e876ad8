//! Implementation of the `gopherino check` command.

use anyhow::{Context, Result, bail};

use gopherino_lib::check::{self, CheckOptions};
use gopherino_lib::config::Config;
use gopherino_lib::manifest::Manifest;

use crate::output;

/// Validate every source file with the translator's check mode; exits
/// non-zero when any file reports errors.
pub fn cmd_check(board: Option<&str>, cfg: &Config) -> Result<()> {
  let cwd = std::env::current_dir().context("cannot determine current directory")?;
  let (project_dir, manifest) = Manifest::find(&cwd)?;

  let opts = CheckOptions {
    board: board.unwrap_or_default().to_string(),
    core_binary: cfg.core_binary.clone(),
  };

  let shown_board = if opts.board.is_empty() {
    &manifest.board
  } else {
    &opts.board
  };
  output::section_title(&format!("Checking  [board: {shown_board}]"));

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(check::run(&project_dir, &manifest, &opts))?;

  for file in &report.files {
    for warning in &file.warnings {
      output::print_warning(warning);
    }
    for error in &file.errors {
      output::print_error(error);
    }
  }

  if !report.is_clean() {
    bail!("{} error(s) found", report.error_count());
  }

  output::print_success(&format!(
    "{} file(s) checked, {} warning(s), no errors",
    report.files.len(),
    report.warning_count()
  ));
  Ok(())
}
