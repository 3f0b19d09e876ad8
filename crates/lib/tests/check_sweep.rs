//! Check sweep tests driving a stub translator in `--check` mode.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use gopherino_lib::check::{self, CheckError, CheckOptions};
use gopherino_lib::manifest::Manifest;
use tempfile::TempDir;

/// Reports one warning per file and an error for any input whose name
/// contains "broken".
const STUB_CHECKER: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "stub-core 1.0.0"
  exit 0
fi
in="$1"
echo "warning: unused import in $(basename "$in")"
case "$in" in
  *broken*)
    echo "error[E001]: undefined function" >&2
    exit 1
    ;;
esac
exit 0
"#;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
  let path = dir.join(name);
  fs::write(&path, body).unwrap();
  let mut perms = fs::metadata(&path).unwrap().permissions();
  perms.set_mode(0o755);
  fs::set_permissions(&path, perms).unwrap();
  path
}

fn project_with_sources(names: &[&str]) -> (TempDir, PathBuf, Manifest, CheckOptions) {
  let temp = TempDir::new().unwrap();
  let project_dir = temp.path().join("demo");
  let bin_dir = temp.path().join("bin");
  fs::create_dir_all(project_dir.join("src")).unwrap();
  fs::create_dir_all(&bin_dir).unwrap();

  for name in names {
    fs::write(project_dir.join("src").join(name), "package main\n").unwrap();
  }

  let manifest = Manifest::new("demo-project", "uno");
  manifest.save(&project_dir).unwrap();

  let opts = CheckOptions {
    core_binary: write_script(&bin_dir, "stub-core", STUB_CHECKER)
      .display()
      .to_string(),
    ..CheckOptions::default()
  };

  (temp, project_dir, manifest, opts)
}

#[tokio::test]
async fn check_visits_every_file_even_after_errors() {
  let (_temp, project_dir, manifest, opts) =
    project_with_sources(&["a.go", "b_broken.go", "c.go"]);

  let report = check::run(&project_dir, &manifest, &opts).await.unwrap();

  // No fail-fast here: the failing file does not stop the sweep.
  assert_eq!(report.files.len(), 3);
  assert_eq!(report.warning_count(), 3);
  assert_eq!(report.error_count(), 1);
  assert!(!report.is_clean());

  assert!(report.files[1].file.ends_with("b_broken.go"));
  assert_eq!(report.files[1].errors, vec!["error[E001]: undefined function"]);
  assert!(report.files[0].errors.is_empty());
  assert!(report.files[2].errors.is_empty());
}

#[tokio::test]
async fn clean_project_reports_no_errors() {
  let (_temp, project_dir, manifest, opts) = project_with_sources(&["main.go"]);

  let report = check::run(&project_dir, &manifest, &opts).await.unwrap();

  assert!(report.is_clean());
  assert_eq!(
    report.files[0].warnings,
    vec!["warning: unused import in main.go"]
  );
}

#[tokio::test]
async fn empty_source_set_is_an_error() {
  let (_temp, project_dir, manifest, opts) = project_with_sources(&[]);

  let err = check::run(&project_dir, &manifest, &opts).await.unwrap_err();
  assert!(matches!(err, CheckError::NoSources { .. }));
}
