use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gopherino_lib::config::Config;

mod cmd;
mod output;

/// gopherino - write Arduino firmware in Go
#[derive(Parser)]
#[command(name = "gopherino")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Disable colored output
  #[arg(long, global = true)]
  no_color: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Initialize a new gopherino project
  Init {
    /// Project name (defaults to the current directory's name)
    name: Option<String>,

    /// Target board (default from config)
    #[arg(short, long)]
    board: Option<String>,
  },

  /// Transpile the project and optionally compile it to firmware
  Build {
    /// Target board (default from manifest)
    #[arg(short, long)]
    board: Option<String>,

    /// Output directory
    #[arg(short, long)]
    out: Option<String>,

    /// Compile to firmware after transpiling
    #[arg(short, long)]
    compile: bool,
  },

  /// Validate source files for errors and warnings (no output produced)
  Check {
    /// Target board (overrides manifest)
    #[arg(short, long)]
    board: Option<String>,
  },

  /// Upload compiled firmware to a connected board
  Upload {
    /// Serial port (auto-detect if omitted)
    #[arg(short, long)]
    port: Option<String>,

    /// Target board (overrides manifest)
    #[arg(short, long)]
    board: Option<String>,

    /// Directory with compiled firmware
    #[arg(long)]
    build_dir: Option<String>,
  },

  /// List and detect supported boards
  Boards {
    #[command(subcommand)]
    command: BoardsCommand,
  },

  /// Inspect and edit the persisted configuration
  Config {
    #[command(subcommand)]
    command: ConfigCommand,
  },

  /// Remove the build directory
  Clean,

  /// Print CLI and translator versions
  Version,
}

#[derive(Subcommand)]
enum BoardsCommand {
  /// List all supported boards
  List,
  /// Detect boards connected via USB
  Detect,
}

#[derive(Subcommand)]
enum ConfigCommand {
  /// Print one config value
  Get { key: String },
  /// Set a config value
  Set { key: String, value: String },
  /// List all config keys and values
  List,
  /// Print the config file path
  Path,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.no_color {
    owo_colors::set_override(false);
  }

  let default_filter = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
    )
    .without_time()
    .with_writer(std::io::stderr)
    .init();

  // Persisted config feeds defaults into every command; a broken file
  // falls back to defaults with a warning rather than blocking the CLI.
  let cfg = match Config::load() {
    Ok(cfg) => cfg,
    Err(err) => {
      output::print_warning(&format!("config load error: {err} — using defaults"));
      Config::default()
    }
  };

  match cli.command {
    Commands::Init { name, board } => cmd::cmd_init(name.as_deref(), board.as_deref(), &cfg),
    Commands::Build { board, out, compile } => {
      cmd::cmd_build(board.as_deref(), out.as_deref(), compile, cli.verbose, &cfg)
    }
    Commands::Check { board } => cmd::cmd_check(board.as_deref(), &cfg),
    Commands::Upload {
      port,
      board,
      build_dir,
    } => cmd::cmd_upload(
      port.as_deref(),
      board.as_deref(),
      build_dir.as_deref(),
      cli.verbose,
      &cfg,
    ),
    Commands::Boards { command } => match command {
      BoardsCommand::List => cmd::cmd_boards_list(),
      BoardsCommand::Detect => cmd::cmd_boards_detect(&cfg),
    },
    Commands::Config { command } => match command {
      ConfigCommand::Get { key } => cmd::cmd_config_get(&key),
      ConfigCommand::Set { key, value } => cmd::cmd_config_set(&key, &value),
      ConfigCommand::List => cmd::cmd_config_list(),
      ConfigCommand::Path => cmd::cmd_config_path(),
    },
    Commands::Clean => cmd::cmd_clean(),
    Commands::Version => cmd::cmd_version(&cfg),
  }
}
