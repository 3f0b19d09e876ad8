//! Free-text diagnostic normalization.
//!
//! Three external tools, three grammars, no common format. Each grammar has
//! its own [`DiagnosticParser`] implementation; dispatch is by an explicit
//! [`SourceKind`] tag rather than by sniffing the text, so parsing stays
//! deterministic and each parser is testable in isolation.

mod compiler;
mod translator;
mod types;
mod uploader;

pub use compiler::CompilerParser;
pub use translator::TranslatorParser;
pub use types::{CodeLine, Frame, Traceback};
pub use uploader::UploaderParser;

use std::path::Path;

/// Which external tool produced the raw text, plus the context its parser
/// needs to label frames.
#[derive(Debug, Clone, Copy)]
pub enum SourceKind<'a> {
  /// Translator stderr; frames without a location fall back to the input
  /// file being translated.
  Translator { input_file: &'a Path },
  /// Toolchain compile output (stdout and stderr are one channel).
  Compiler,
  /// Uploader output; the single frame is anchored to the serial port.
  Uploader { port: &'a str },
}

/// Parses one tool's raw diagnostic text into the uniform model.
///
/// Implementations must return at least one frame for any input, including
/// the empty string.
pub trait DiagnosticParser {
  fn parse(&self, raw: &str) -> Traceback;
}

/// Normalize raw tool output according to its source kind.
pub fn normalize(raw: &str, kind: SourceKind<'_>) -> Traceback {
  match kind {
    SourceKind::Translator { input_file } => TranslatorParser { input_file }.parse(raw),
    SourceKind::Compiler => CompilerParser.parse(raw),
    SourceKind::Uploader { port } => UploaderParser { port }.parse(raw),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Every grammar, any input: a traceback never comes back frameless.
  #[test]
  fn normalize_never_returns_zero_frames() {
    let inputs = ["", "   \n\n", "garbage with no structure", "error"];
    for raw in inputs {
      let kinds = [
        SourceKind::Translator {
          input_file: Path::new("src/main.go"),
        },
        SourceKind::Compiler,
        SourceKind::Uploader { port: "COM3" },
      ];
      for kind in kinds {
        let tb = normalize(raw, kind);
        assert!(
          !tb.frames.is_empty(),
          "no frames for {raw:?} via {kind:?}"
        );
        assert!(!tb.frames[0].code.is_empty());
      }
    }
  }

  #[test]
  fn dispatch_selects_the_right_grammar() {
    let tb = normalize(
      "src/main.cpp:14:5: error: 'Delay' was not declared",
      SourceKind::Compiler,
    );
    assert_eq!(tb.kind, "CompileError");

    let tb = normalize(
      "no board on port",
      SourceKind::Uploader { port: "/dev/ttyACM0" },
    );
    assert_eq!(tb.kind, "FlashError");
    assert_eq!(tb.frames[0].file, "/dev/ttyACM0");

    let tb = normalize(
      "error[E001]: nope",
      SourceKind::Translator {
        input_file: Path::new("a.go"),
      },
    );
    assert_eq!(tb.kind, "error[E001]");
  }
}
