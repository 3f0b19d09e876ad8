//! Parser for uploader output, which has no structure worth trusting.

use super::DiagnosticParser;
use super::types::{Frame, Traceback};

pub(crate) const STAGE: &str = "upload";
pub(crate) const GENERIC_KIND: &str = "FlashError";

/// Collects every line that looks relevant (a case-insensitive `error` or
/// `not found`) into one message, anchored to the serial port in a single
/// synthetic frame.
pub struct UploaderParser<'a> {
  pub port: &'a str,
}

impl DiagnosticParser for UploaderParser<'_> {
  fn parse(&self, raw: &str) -> Traceback {
    let relevant: Vec<&str> = raw
      .lines()
      .map(str::trim)
      .filter(|line| {
        if line.is_empty() {
          return false;
        }
        let lower = line.to_lowercase();
        lower.contains("error") || lower.contains("not found")
      })
      .collect();

    let mut message = relevant.join("; ");
    if message.is_empty() {
      message = raw.trim().to_string();
    }

    Traceback {
      kind: GENERIC_KIND.to_string(),
      message: message.clone(),
      frames: vec![Frame::synthetic(self.port, STAGE, message)],
    }
  }
}
