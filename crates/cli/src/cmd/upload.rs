//! Implementation of the `gopherino upload` command.

use anyhow::{Context, Result, bail};

use gopherino_lib::config::Config;
use gopherino_lib::flash::{self, FlashError, FlashOptions};
use gopherino_lib::manifest::Manifest;

use crate::output;

/// Upload previously compiled firmware to a connected board.
pub fn cmd_upload(
  port: Option<&str>,
  board: Option<&str>,
  build_dir: Option<&str>,
  verbose: bool,
  cfg: &Config,
) -> Result<()> {
  let cwd = std::env::current_dir().context("cannot determine current directory")?;
  let (project_dir, manifest) = Manifest::find(&cwd)?;

  let opts = FlashOptions {
    port: port.unwrap_or_default().to_string(),
    board: board.unwrap_or_default().to_string(),
    build_dir: build_dir.unwrap_or_default().to_string(),
    verbose,
    toolchain: cfg.arduino_cli.clone(),
  };

  output::section_title("Uploading");

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  match rt.block_on(flash::run(&project_dir, &manifest, &opts)) {
    Ok(()) => {
      output::print_success("Firmware uploaded!");
      Ok(())
    }
    Err(FlashError::Upload { traceback }) => {
      output::render_traceback(&traceback);
      bail!("upload failed");
    }
    Err(err) => Err(err.into()),
  }
}
