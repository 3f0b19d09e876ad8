//! Implementation of the `gopherino config` subcommands.

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use gopherino_lib::config::Config;

use crate::output;

pub fn cmd_config_get(key: &str) -> Result<()> {
  let cfg = Config::load()?;
  println!("{}", cfg.get(key)?);
  Ok(())
}

pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
  let mut cfg = Config::load()?;
  cfg.set(key, value)?;
  cfg.save().context("Failed to save config")?;
  output::print_success(&format!("{key} = {value}"));
  Ok(())
}

pub fn cmd_config_list() -> Result<()> {
  let cfg = Config::load()?;
  for entry in cfg.entries() {
    let value = if entry.value.is_empty() {
      "(unset)".to_string()
    } else {
      entry.value
    };
    println!(
      "  {:<14} {:<28} {}",
      entry.key,
      value,
      format!("# {}", entry.comment).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
  Ok(())
}

pub fn cmd_config_path() -> Result<()> {
  println!("{}", Config::path()?.display());
  Ok(())
}
