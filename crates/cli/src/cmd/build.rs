//! Implementation of the `gopherino build` command.
//!
//! Runs the build pipeline against the manifest found from the current
//! directory. Structured tracebacks from failed tool invocations are
//! rendered before the command exits non-zero.

use anyhow::{Context, Result, bail};

use gopherino_lib::build::{self, BuildError, BuildOptions};
use gopherino_lib::config::Config;
use gopherino_lib::manifest::Manifest;

use crate::output;

/// Execute the build command: transpile every source file and, with
/// `--compile`, produce firmware via the board toolchain.
pub fn cmd_build(
  board: Option<&str>,
  out: Option<&str>,
  compile: bool,
  verbose: bool,
  cfg: &Config,
) -> Result<()> {
  let cwd = std::env::current_dir().context("cannot determine current directory")?;
  let (project_dir, manifest) = Manifest::find(&cwd)?;

  let opts = BuildOptions {
    board: board.unwrap_or_default().to_string(),
    compile,
    output_dir: out.unwrap_or_default().to_string(),
    source_map: manifest.build.source_map,
    verbose,
    core_binary: cfg.core_binary.clone(),
    toolchain: cfg.arduino_cli.clone(),
  };

  let shown_board = if opts.board.is_empty() {
    &manifest.board
  } else {
    &opts.board
  };
  output::section_title(&format!("Transpiling  [board: {shown_board}]"));

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let outcome = match rt.block_on(build::run(&project_dir, &manifest, &opts)) {
    Ok(outcome) => outcome,
    Err(BuildError::Translation { file, traceback }) => {
      output::render_traceback(&traceback);
      bail!("transpilation failed for {}", file.display());
    }
    Err(BuildError::Compile { toolchain, traceback }) => {
      output::render_traceback(&traceback);
      bail!("{toolchain} compile failed");
    }
    Err(err) => return Err(err.into()),
  };

  for warning in &outcome.warnings {
    output::print_warning(warning);
  }
  for cpp in &outcome.cpp_files {
    output::print_info(&format!("wrote {}", cpp.display()));
  }
  output::print_info(&format!("sketch: {}", outcome.sketch_dir.display()));
  if let Some(firmware) = &outcome.firmware {
    output::print_info(&format!("firmware: {}", firmware.display()));
  }

  output::print_success("Build finished!");
  Ok(())
}
