//! Implementation of the `gopherino init` command.

use anyhow::{Context, Result};

use gopherino_lib::config::Config;
use gopherino_lib::init::{self, InitOptions};

use crate::output;

/// Scaffold a new project in the current directory, or in a subdirectory
/// when a project name is given.
pub fn cmd_init(name: Option<&str>, board: Option<&str>, cfg: &Config) -> Result<()> {
  let cwd = std::env::current_dir().context("cannot determine current directory")?;

  let (dir, name) = match name {
    Some(name) => (cwd.join(name), name.to_string()),
    None => {
      let name = cwd
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());
      (cwd.clone(), name)
    }
  };
  let board = board.unwrap_or(&cfg.default_board);

  output::section_title("Initializing project");
  output::print_info(&format!("name:  {name}"));
  output::print_info(&format!("board: {board}"));
  output::print_info(&format!("dir:   {}", dir.display()));
  println!();

  let result = init::init(&InitOptions {
    dir,
    name: name.clone(),
    board: board.to_string(),
  })
  .context("Failed to initialize project")?;

  output::print_success("Created gopherino.json");
  if result.main_go_created {
    output::print_success("Created src/main.go");
  } else {
    output::print_warning("src/main.go already exists — skipping");
  }
  if result.gitignore_created {
    output::print_success("Created .gitignore");
  }

  println!();
  output::print_success(&format!("Project '{name}' initialized for board '{board}'!"));
  output::print_info("next: edit src/main.go, then run `gopherino build`");
  Ok(())
}
