//! Implementation of the `gopherino boards` subcommands.

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use gopherino_lib::boards;
use gopherino_lib::build::DEFAULT_TOOLCHAIN;
use gopherino_lib::config::Config;
use gopherino_lib::flash;

use crate::output;

/// Print the static board catalog as a table.
pub fn cmd_boards_list() -> Result<()> {
  output::section_title("Supported boards");
  println!();
  println!(
    "  {}",
    format!(
      "{:<12}  {:<34}  {:>7}  {:>6}  {}",
      "ID", "NAME", "FLASH", "RAM", "FQBN"
    )
    .if_supports_color(Stream::Stdout, |s| s.bold())
  );

  for board in boards::CATALOG {
    println!(
      "  {:<12}  {:<34}  {:>6}K  {:>5}K  {}",
      board.id.if_supports_color(Stream::Stdout, |s| s.cyan()),
      board.name,
      board.flash_kb,
      board.ram_kb,
      board.fqbn.if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
  println!();
  Ok(())
}

/// Probe the toolchain's device listing for a connected board.
pub fn cmd_boards_detect(cfg: &Config) -> Result<()> {
  let toolchain = if cfg.arduino_cli.is_empty() {
    DEFAULT_TOOLCHAIN
  } else {
    cfg.arduino_cli.as_str()
  };

  output::print_info("Scanning serial ports…");

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let port = rt.block_on(flash::detect_port(toolchain))?;

  output::print_success(&format!("Found board on {port}"));
  Ok(())
}
