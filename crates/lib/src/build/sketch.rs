//! The compilation unit the toolchain demands: a sketch directory.
//!
//! The toolchain refuses anything that is not a *sketch directory*: a
//! folder whose name matches the `.ino` entry point inside it. That naming
//! contract is undocumented but hard; [`SketchDir`] makes it a constructor
//! invariant instead of a convention callers must remember. Translated
//! `.cpp` files are written next to the generated stub so the directory can
//! be handed to the toolchain as-is.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Substituted when sanitization leaves nothing of the project name.
pub const FALLBACK_NAME: &str = "sketch";

#[derive(Debug, Error)]
pub enum SketchError {
  #[error("creating sketch dir {dir}: {source}")]
  Create {
    dir: String,
    #[source]
    source: std::io::Error,
  },

  #[error("writing entry-point stub: {0}")]
  Stub(#[source] std::io::Error),

  #[error("{dir} is not a sketch directory: entry point {expected} is missing")]
  MissingEntryPoint { dir: String, expected: String },
}

/// Derive a valid sketch name from an arbitrary project name.
///
/// Letters and underscores pass through; digits are kept once the output is
/// non-empty; any other character becomes a single underscore, with runs
/// collapsed and nothing emitted while the output is still empty. The
/// result is either empty or a valid identifier, and sanitizing twice is
/// the same as sanitizing once.
pub fn sanitize_sketch_name(name: &str) -> String {
  let mut out = String::with_capacity(name.len());
  for ch in name.chars() {
    match ch {
      'A'..='Z' | 'a'..='z' | '_' => out.push(ch),
      '0'..='9' if !out.is_empty() => out.push(ch),
      '0'..='9' => {}
      _ => {
        if !out.is_empty() && !out.ends_with('_') {
          out.push('_');
        }
      }
    }
  }
  out
}

/// A sketch directory handle. The name invariant is enforced at
/// construction time, either by deriving the name ([`SketchDir::create`])
/// or by verifying an existing directory ([`SketchDir::open`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SketchDir {
  path: PathBuf,
  name: String,
}

impl SketchDir {
  /// Create `<output_root>/<sanitized project name>`, idempotently: an
  /// existing directory is reused, never an error.
  pub fn create(output_root: &Path, project_name: &str) -> Result<Self, SketchError> {
    let mut name = sanitize_sketch_name(project_name);
    if name.is_empty() {
      name = FALLBACK_NAME.to_string();
    }
    let path = output_root.join(&name);
    std::fs::create_dir_all(&path).map_err(|source| SketchError::Create {
      dir: path.display().to_string(),
      source,
    })?;
    Ok(SketchDir { path, name })
  }

  /// Open an existing sketch directory, verifying the entry-point file
  /// matches the directory's base name.
  pub fn open(path: &Path) -> Result<Self, SketchError> {
    let name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default();
    let expected = format!("{name}.ino");
    if !path.join(&expected).is_file() {
      return Err(SketchError::MissingEntryPoint {
        dir: path.display().to_string(),
        expected,
      });
    }
    Ok(SketchDir {
      path: path.to_path_buf(),
      name,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Path of the `.ino` entry point; its base name equals the directory's.
  pub fn entry_point(&self) -> PathBuf {
    self.path.join(format!("{}.ino", self.name))
  }

  /// Target path inside the sketch for a translated source file.
  pub fn cpp_path(&self, source: &Path) -> PathBuf {
    let base = source
      .file_stem()
      .map(|s| s.to_string_lossy().into_owned())
      .unwrap_or_default();
    self.path.join(format!("{base}.cpp"))
  }

  /// Write the toolchain-mandated entry-point stub. Overwrites freely; the
  /// file never carries hand-edited content.
  pub fn write_entry_stub(&self) -> Result<(), SketchError> {
    const STUB: &str = "// Auto-generated by gopherino; do not edit.\n\
                        // The toolchain compiles the .cpp files in this directory automatically.\n";
    std::fs::write(self.entry_point(), STUB).map_err(SketchError::Stub)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn sanitize_collapses_invalid_runs() {
    assert_eq!(sanitize_sketch_name("a!!!b"), "a_b");
    assert_eq!(sanitize_sketch_name("my-robot"), "my_robot");
    assert_eq!(sanitize_sketch_name("my - robot"), "my_robot");
  }

  #[test]
  fn sanitize_drops_leading_digits_and_separators() {
    assert_eq!(sanitize_sketch_name("123abc"), "abc");
    assert_eq!(sanitize_sketch_name("!!!"), "");
    assert_eq!(sanitize_sketch_name("--blink--"), "blink_");
    assert_eq!(sanitize_sketch_name("42"), "");
  }

  #[test]
  fn sanitize_keeps_valid_names_unchanged() {
    for name in ["blink", "my_robot_v2", "_private", "Sketch01"] {
      assert_eq!(sanitize_sketch_name(name), name);
    }
  }

  #[test]
  fn sanitize_is_idempotent() {
    let inputs = [
      "a!!!b", "123abc", "!!!", "my - robot", "émile's project", "x9", "9x",
      "snake_case", "UPPER CASE", "trailing!", "_", "", "a__b",
    ];
    for input in inputs {
      let once = sanitize_sketch_name(input);
      assert_eq!(sanitize_sketch_name(&once), once, "not idempotent for {input:?}");
    }
  }

  #[test]
  fn sanitize_output_is_empty_or_valid_identifier() {
    let inputs = ["a!!!b", "123abc", "!!!", "9lives", "über-blink", "a b c", "_9"];
    for input in inputs {
      let out = sanitize_sketch_name(input);
      if out.is_empty() {
        continue;
      }
      let mut chars = out.chars();
      let first = chars.next().unwrap();
      assert!(first.is_ascii_alphabetic() || first == '_', "bad start in {out:?}");
      assert!(
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        "bad char in {out:?}"
      );
    }
  }

  #[test]
  fn create_derives_name_and_is_idempotent() {
    let temp = TempDir::new().unwrap();

    let first = SketchDir::create(temp.path(), "my-robot").unwrap();
    assert_eq!(first.name(), "my_robot");
    assert_eq!(first.path(), temp.path().join("my_robot"));
    assert!(first.path().is_dir());

    let second = SketchDir::create(temp.path(), "my-robot").unwrap();
    assert_eq!(first, second);
  }

  #[test]
  fn create_falls_back_when_name_sanitizes_away() {
    let temp = TempDir::new().unwrap();
    let sketch = SketchDir::create(temp.path(), "!!!").unwrap();
    assert_eq!(sketch.name(), FALLBACK_NAME);
  }

  #[test]
  fn entry_point_matches_directory_name() {
    let temp = TempDir::new().unwrap();
    let sketch = SketchDir::create(temp.path(), "blink").unwrap();
    assert_eq!(sketch.entry_point(), temp.path().join("blink").join("blink.ino"));
  }

  #[test]
  fn open_requires_matching_entry_point() {
    let temp = TempDir::new().unwrap();
    let sketch = SketchDir::create(temp.path(), "blink").unwrap();

    // No stub yet: the invariant does not hold.
    assert!(matches!(
      SketchDir::open(sketch.path()),
      Err(SketchError::MissingEntryPoint { .. })
    ));

    sketch.write_entry_stub().unwrap();
    let opened = SketchDir::open(sketch.path()).unwrap();
    assert_eq!(opened.name(), "blink");

    // A stray .ino with the wrong name does not satisfy it either.
    let other = temp.path().join("other");
    std::fs::create_dir_all(&other).unwrap();
    std::fs::write(other.join("blink.ino"), "// stub\n").unwrap();
    assert!(SketchDir::open(&other).is_err());
  }

  #[test]
  fn cpp_path_lands_inside_the_sketch() {
    let temp = TempDir::new().unwrap();
    let sketch = SketchDir::create(temp.path(), "blink").unwrap();
    assert_eq!(
      sketch.cpp_path(Path::new("src/main.go")),
      sketch.path().join("main.cpp")
    );
  }
}
