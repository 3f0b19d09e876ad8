//! The build pipeline: translate every source file into a sketch
//! directory, synthesize the entry-point stub, then optionally hand the
//! sketch to the board toolchain for compilation.
//!
//! Every stage is a potential failure point that aborts the remainder.
//! Stages run strictly in sequence and every external invocation is fully
//! drained before its result is inspected. Nothing is rolled back on
//! failure; a re-run overwrites whatever an earlier run left behind.

pub mod sketch;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::boards;
use crate::diag::{self, SourceKind, Traceback};
use crate::manifest::Manifest;
use crate::translator::{TranslateError, Translator};

use self::sketch::{SketchDir, SketchError};

pub const DEFAULT_TOOLCHAIN: &str = "arduino-cli";

/// Options for one build run. Immutable for the duration of the run.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
  /// Board override; empty means the manifest default.
  pub board: String,
  /// Invoke the toolchain after translation.
  pub compile: bool,
  /// Output root override; empty means `<project>/<manifest output_dir>`.
  pub output_dir: String,
  /// Emit line-mapping pragmas in translated output.
  pub source_map: bool,
  /// Pass the toolchain's verbose flag through.
  pub verbose: bool,
  /// Translator binary override; empty searches PATH.
  pub core_binary: String,
  /// Toolchain binary override; empty means `arduino-cli`.
  pub toolchain: String,
}

/// Outputs of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
  /// Translated files, in source order.
  pub cpp_files: Vec<PathBuf>,
  /// The generated sketch directory.
  pub sketch_dir: PathBuf,
  /// Compiled firmware image, when the compile stage ran and one was found.
  /// Detection is best-effort: some cores emit `.bin` or `.uf2` instead and
  /// the build is still a success.
  pub firmware: Option<PathBuf>,
  /// Translator warnings, aggregated in source order.
  pub warnings: Vec<String>,
}

#[derive(Debug, Error)]
pub enum BuildError {
  /// The translator binary is unreachable; nothing was attempted.
  #[error(
    "{binary} not found — install it or set core_binary in your config\n  \
     gopherino config set core_binary /path/to/gopherino-core"
  )]
  TranslatorMissing { binary: String },

  /// No sources to translate.
  #[error("no .go files found in {dir}")]
  NoSources { dir: String },

  /// One source file failed to translate; later files were not attempted.
  #[error("transpilation failed for {}", .file.display())]
  Translation { file: PathBuf, traceback: Traceback },

  /// The toolchain's compile step exited non-zero.
  #[error("{toolchain} compile failed")]
  Compile {
    toolchain: String,
    traceback: Traceback,
  },

  /// Board id absent from the catalog.
  #[error("unknown board {id:?} — run `gopherino boards list` to see supported boards")]
  UnknownBoard { id: String },

  /// The toolchain binary could not be spawned.
  #[error("cannot run {binary}: {source}")]
  ToolchainSpawn {
    binary: String,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Sketch(#[from] SketchError),

  #[error(transparent)]
  Translator(#[from] TranslateError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Execute the full build pipeline for the project at `project_dir`.
pub async fn run(
  project_dir: &Path,
  manifest: &Manifest,
  opts: &BuildOptions,
) -> Result<BuildOutcome, BuildError> {
  // Board resolution: the explicit override wins. Validity is checked
  // lazily, right before the compile stage; the translator knows boards
  // the catalog may not, and its errors should still surface.
  let board = if opts.board.is_empty() {
    manifest.board.as_str()
  } else {
    opts.board.as_str()
  };

  let output_root = if opts.output_dir.is_empty() {
    project_dir.join(&manifest.build.output_dir)
  } else {
    PathBuf::from(&opts.output_dir)
  };

  let sketch = SketchDir::create(&output_root, &manifest.name)?;
  debug!(dir = %sketch.path().display(), "sketch directory ready");

  // The translator must be reachable before any file is attempted.
  let translator = Translator::new(&opts.core_binary);
  if !translator.installed().await {
    return Err(BuildError::TranslatorMissing {
      binary: translator.binary().to_string(),
    });
  }

  let src_dir = project_dir.join("src");
  let go_files = discover_sources(&src_dir)?;
  if go_files.is_empty() {
    return Err(BuildError::NoSources {
      dir: src_dir.display().to_string(),
    });
  }

  info!(board, files = go_files.len(), "transpiling");

  // Translate in source order, stopping at the first failure. Warnings
  // aggregate in exactly this order.
  let source_map = opts.source_map || manifest.build.source_map;
  let mut outcome = BuildOutcome {
    cpp_files: Vec::new(),
    sketch_dir: sketch.path().to_path_buf(),
    firmware: None,
    warnings: Vec::new(),
  };

  for go_file in &go_files {
    let cpp_file = sketch.cpp_path(go_file);
    debug!(from = %go_file.display(), to = %cpp_file.display(), "transpiling file");
    match translator.translate(go_file, &cpp_file, board, source_map).await {
      Ok(translation) => {
        outcome.cpp_files.push(translation.output_file);
        outcome.warnings.extend(translation.warnings);
      }
      Err(TranslateError::Failed { traceback }) => {
        return Err(BuildError::Translation {
          file: go_file.clone(),
          traceback,
        });
      }
      Err(err) => return Err(err.into()),
    }
  }

  // Entry-point stub, exactly once, after every file translated.
  sketch.write_entry_stub()?;
  debug!(entry = %sketch.entry_point().display(), "entry-point stub written");

  // Translation-only mode stops here; the board was never validated.
  if !opts.compile {
    return Ok(outcome);
  }

  let Some(fqbn) = boards::fqbn(board) else {
    return Err(BuildError::UnknownBoard {
      id: board.to_string(),
    });
  };

  // Toolchain artifacts are isolated in a cache directory so the sketch
  // keeps only translated sources and the stub.
  let cache_dir = output_root.join(".cache");
  tokio::fs::create_dir_all(&cache_dir).await?;

  compile_sketch(&sketch, fqbn, &cache_dir, opts).await?;
  outcome.firmware = find_firmware(&cache_dir)?;

  Ok(outcome)
}

/// Source files in `src/`, in deterministic sorted order. The order is
/// caller-visible: translation runs and warning aggregation follow it.
pub(crate) fn discover_sources(src_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
  let entries = match std::fs::read_dir(src_dir) {
    Ok(entries) => entries,
    Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
    Err(err) => return Err(err),
  };

  let mut files: Vec<PathBuf> = entries
    .filter_map(|entry| entry.ok())
    .map(|entry| entry.path())
    .filter(|path| path.extension().is_some_and(|ext| ext == "go") && path.is_file())
    .collect();
  files.sort();
  Ok(files)
}

async fn compile_sketch(
  sketch: &SketchDir,
  fqbn: &str,
  cache_dir: &Path,
  opts: &BuildOptions,
) -> Result<(), BuildError> {
  let toolchain = if opts.toolchain.is_empty() {
    DEFAULT_TOOLCHAIN
  } else {
    opts.toolchain.as_str()
  };

  let mut cmd = Command::new(toolchain);
  cmd
    .arg("compile")
    .arg("--fqbn")
    .arg(fqbn)
    .arg("--build-path")
    .arg(cache_dir)
    .arg("--warnings")
    .arg("all");
  if opts.verbose {
    cmd.arg("--verbose");
  }
  cmd.arg(sketch.path());
  cmd.current_dir(sketch.path());

  info!(toolchain, fqbn, "compiling sketch");

  let out = cmd.output().await.map_err(|source| BuildError::ToolchainSpawn {
    binary: toolchain.to_string(),
    source,
  })?;

  if !out.status.success() {
    // stdout and stderr are one diagnostic channel for the toolchain.
    let mut combined = String::from_utf8_lossy(&out.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&out.stderr));
    let traceback = diag::normalize(&combined, SourceKind::Compiler);
    return Err(BuildError::Compile {
      toolchain: toolchain.to_string(),
      traceback,
    });
  }
  Ok(())
}

/// First `.hex` in the cache directory, if any.
fn find_firmware(cache_dir: &Path) -> std::io::Result<Option<PathBuf>> {
  let mut hex_files: Vec<PathBuf> = std::fs::read_dir(cache_dir)?
    .filter_map(|entry| entry.ok())
    .map(|entry| entry.path())
    .filter(|path| path.extension().is_some_and(|ext| ext == "hex"))
    .collect();
  hex_files.sort();
  Ok(hex_files.into_iter().next())
}
