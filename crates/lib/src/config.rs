//! Persistent user-level configuration.
//!
//! Stored as JSON at `<config-dir>/gopherino/config.json`:
//! `~/.config/gopherino/config.json` on Linux/macOS (respecting
//! `XDG_CONFIG_HOME`), `%APPDATA%\gopherino\config.json` on Windows.
//! A missing file means defaults; the file is only written by
//! `gopherino config set`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("unknown config key {0:?}")]
  UnknownKey(String),

  #[error("invalid bool value {value:?} for key {key:?}")]
  InvalidBool { key: String, value: String },

  #[error("invalid int value {value:?} for key {key:?}")]
  InvalidInt { key: String, value: String },

  #[error("no user config directory available")]
  NoConfigDir,

  #[error("reading config: {0}")]
  Io(#[from] std::io::Error),

  #[error("parsing config: {0}")]
  Parse(#[from] serde_json::Error),
}

/// All persistent user-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Path to the translator binary; empty searches PATH.
  pub core_binary: String,
  /// Path to the board toolchain binary; empty searches PATH.
  pub arduino_cli: String,
  /// Default target board id.
  pub default_board: String,
  /// Default serial baud rate.
  pub default_baud: u32,
  /// Enable colored output.
  pub color: bool,
  /// Verbose command output.
  pub verbose: bool,
  /// Auto-detect connected boards.
  pub auto_detect: bool,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      core_binary: String::new(),
      arduino_cli: "arduino-cli".to_string(),
      default_board: "uno".to_string(),
      default_baud: 9600,
      color: true,
      verbose: false,
      auto_detect: true,
    }
  }
}

/// One config key with its current value, for display.
#[derive(Debug, Clone)]
pub struct Entry {
  pub key: &'static str,
  pub value: String,
  pub comment: &'static str,
}

impl Config {
  /// The config file location for this user.
  pub fn path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("gopherino").join("config.json"))
  }

  /// Load from the default location. Defaults when the file (or the config
  /// directory itself) does not exist.
  pub fn load() -> Result<Self, ConfigError> {
    match Self::path() {
      Ok(path) => Self::load_from(&path),
      Err(_) => Ok(Self::default()),
    }
  }

  pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
    match std::fs::read_to_string(path) {
      Ok(data) => Ok(serde_json::from_str(&data)?),
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
      Err(err) => Err(err.into()),
    }
  }

  /// Save to the default location, creating parent directories as needed.
  pub fn save(&self) -> Result<(), ConfigError> {
    self.save_to(&Self::path()?)
  }

  pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    let mut data = serde_json::to_string_pretty(self)?;
    data.push('\n');
    std::fs::write(path, data)?;
    Ok(())
  }

  /// Value of a key, rendered as a string.
  pub fn get(&self, key: &str) -> Result<String, ConfigError> {
    let value = match key {
      "core_binary" => self.core_binary.clone(),
      "arduino_cli" => self.arduino_cli.clone(),
      "default_board" => self.default_board.clone(),
      "default_baud" => self.default_baud.to_string(),
      "color" => self.color.to_string(),
      "verbose" => self.verbose.to_string(),
      "auto_detect" => self.auto_detect.to_string(),
      _ => return Err(ConfigError::UnknownKey(key.to_string())),
    };
    Ok(value)
  }

  /// Update a key from its string representation.
  pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
      "core_binary" => self.core_binary = value.to_string(),
      "arduino_cli" => self.arduino_cli = value.to_string(),
      "default_board" => self.default_board = value.to_string(),
      "default_baud" => self.default_baud = parse_int(key, value)?,
      "color" => self.color = parse_bool(key, value)?,
      "verbose" => self.verbose = parse_bool(key, value)?,
      "auto_detect" => self.auto_detect = parse_bool(key, value)?,
      _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    Ok(())
  }

  /// All keys with values and descriptions, in display order.
  pub fn entries(&self) -> Vec<Entry> {
    vec![
      Entry { key: "core_binary", value: self.core_binary.clone(), comment: "path to gopherino-core binary" },
      Entry { key: "arduino_cli", value: self.arduino_cli.clone(), comment: "path to arduino-cli binary" },
      Entry { key: "default_board", value: self.default_board.clone(), comment: "default target board" },
      Entry { key: "default_baud", value: self.default_baud.to_string(), comment: "default serial baud rate" },
      Entry { key: "color", value: self.color.to_string(), comment: "enable colored output" },
      Entry { key: "verbose", value: self.verbose.to_string(), comment: "verbose command output" },
      Entry { key: "auto_detect", value: self.auto_detect.to_string(), comment: "auto-detect connected boards" },
    ]
  }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  value.parse::<bool>().map_err(|_| ConfigError::InvalidBool {
    key: key.to_string(),
    value: value.to_string(),
  })
}

fn parse_int(key: &str, value: &str) -> Result<u32, ConfigError> {
  value.parse::<u32>().map_err(|_| ConfigError::InvalidInt {
    key: key.to_string(),
    value: value.to_string(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let cfg = Config::load_from(&temp.path().join("config.json")).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.arduino_cli, "arduino-cli");
    assert_eq!(cfg.default_board, "uno");
  }

  #[test]
  fn save_then_load_round_trips() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.json");

    let mut cfg = Config::default();
    cfg.set("default_board", "esp32").unwrap();
    cfg.set("default_baud", "115200").unwrap();
    cfg.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.default_board, "esp32");
    assert_eq!(loaded.default_baud, 115200);
  }

  #[test]
  fn partial_file_fills_in_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    std::fs::write(&path, r#"{"default_board": "pico"}"#).unwrap();

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.default_board, "pico");
    assert_eq!(cfg.default_baud, 9600);
    assert!(cfg.color);
  }

  #[test]
  fn get_and_set_agree_on_every_key() {
    let mut cfg = Config::default();
    for entry in Config::default().entries() {
      assert_eq!(cfg.get(entry.key).unwrap(), entry.value);
    }
    cfg.set("verbose", "true").unwrap();
    assert_eq!(cfg.get("verbose").unwrap(), "true");
  }

  #[test]
  fn unknown_key_is_rejected() {
    let mut cfg = Config::default();
    assert!(matches!(cfg.get("bogus"), Err(ConfigError::UnknownKey(_))));
    assert!(matches!(cfg.set("bogus", "1"), Err(ConfigError::UnknownKey(_))));
  }

  #[test]
  fn bad_typed_values_are_rejected() {
    let mut cfg = Config::default();
    assert!(matches!(
      cfg.set("color", "maybe"),
      Err(ConfigError::InvalidBool { .. })
    ));
    assert!(matches!(
      cfg.set("default_baud", "fast"),
      Err(ConfigError::InvalidInt { .. })
    ));
  }
}
