//! Parser for the board toolchain's compile output.

use super::DiagnosticParser;
use super::types::{CodeLine, Frame, Traceback};

pub(crate) const STAGE: &str = "compile";
pub(crate) const GENERIC_KIND: &str = "CompileError";

const MARKER: &str = ": error:";

/// Parses gcc-style diagnostics mixed freely into stdout/stderr. Each
/// diagnostic is one self-contained line:
///
/// ```text
/// src/main.cpp:14:5: error: 'Delay' was not declared
/// ```
pub struct CompilerParser;

impl DiagnosticParser for CompilerParser {
  fn parse(&self, raw: &str) -> Traceback {
    let mut frames: Vec<Frame> = Vec::new();
    let mut message = String::new();

    for line in raw.lines() {
      let Some((loc, msg)) = line.split_once(MARKER) else {
        continue;
      };
      let msg = msg.trim();

      // Location is "file:line:col"; anything malformed degrades to zero
      // rather than aborting the parse.
      let mut parts = loc.split(':');
      let file = parts.next().unwrap_or("").to_string();
      let lineno = parts
        .next()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(0);

      if message.is_empty() {
        message = msg.to_string();
      }
      frames.push(Frame {
        file,
        line: lineno,
        stage: STAGE.to_string(),
        code: vec![CodeLine {
          number: lineno,
          text: msg.to_string(),
          is_pointer: true,
        }],
      });
    }

    if frames.is_empty() {
      message = "compilation failed".to_string();
      frames.push(Frame::synthetic("sketch", STAGE, raw.trim()));
    }

    Traceback {
      kind: GENERIC_KIND.to_string(),
      message,
      frames,
    }
  }
}
