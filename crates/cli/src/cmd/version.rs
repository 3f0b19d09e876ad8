//! Implementation of the `gopherino version` command.

use anyhow::{Context, Result};

use gopherino_lib::config::Config;
use gopherino_lib::translator::Translator;

/// Print the CLI version and, when reachable, the translator's.
pub fn cmd_version(cfg: &Config) -> Result<()> {
  println!("gopherino {}", env!("CARGO_PKG_VERSION"));

  let translator = Translator::new(&cfg.core_binary);
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  match rt.block_on(translator.version()) {
    Ok(version) => println!("{} {}", translator.binary(), version),
    Err(_) => println!("{} (not detected)", translator.binary()),
  }
  Ok(())
}
