//! Parser for the translator's rustc-style error reports.

use std::path::Path;

use super::DiagnosticParser;
use super::types::{CodeLine, Frame, Traceback};

pub(crate) const STAGE: &str = "transpile";
pub(crate) const GENERIC_KIND: &str = "TranspileError";

/// Parses translator stderr of the shape:
///
/// ```text
/// error[E001]: undefined function `Delay`
///   --> src/main.go:14:5
///    |
/// 14 |     Delay(1000)
///    |     ^^^^^ not found
/// ```
///
/// A header line carries the kind and message, each `-->` line opens a new
/// frame, and `N | text` lines fill in source context. Decoration rows
/// (bare `|` gutters, `^^^` carets) are skipped.
pub struct TranslatorParser<'a> {
  /// Frames missing a file location fall back to the file being translated.
  pub input_file: &'a Path,
}

impl DiagnosticParser for TranslatorParser<'_> {
  fn parse(&self, raw: &str) -> Traceback {
    let mut kind = String::new();
    let mut message = String::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut current: Option<Frame> = None;

    for line in raw.lines() {
      let line = line.trim_end_matches('\r');

      // "error[E001]: message" header; the first one wins.
      if line.starts_with("error") {
        if kind.is_empty() {
          match line.split_once(": ") {
            Some((tag, msg)) => {
              kind = tag.to_string();
              message = msg.to_string();
            }
            None => kind = line.to_string(),
          }
        }
        continue;
      }

      // "  --> src/main.go:14:5" closes the running frame and opens the next.
      if let Some(idx) = line.find("-->") {
        if let Some(frame) = current.take() {
          frames.push(frame);
        }
        let loc = line[idx + 3..].trim();
        let loc = loc.strip_prefix('·').map(str::trim_start).unwrap_or(loc);
        let mut parts = loc.split(':');
        let file = parts.next().unwrap_or("").to_string();
        let lineno = parts
          .next()
          .and_then(|s| s.trim().parse::<u32>().ok())
          .unwrap_or(0);
        current = Some(Frame {
          file: if file.is_empty() {
            self.input_file.display().to_string()
          } else {
            file
          },
          line: lineno,
          stage: STAGE.to_string(),
          code: Vec::new(),
        });
        continue;
      }

      // " 14 |     Delay(1000)" context line, only inside a frame.
      if let Some(frame) = current.as_mut() {
        if let Some(code) = parse_context_line(line, frame.line) {
          frame.code.push(code);
        }
      }
    }

    if let Some(frame) = current.take() {
      frames.push(frame);
    }

    if kind.is_empty() {
      kind = GENERIC_KIND.to_string();
      message = raw.trim().to_string();
    }
    if frames.is_empty() {
      frames.push(Frame::synthetic(
        self.input_file.display().to_string(),
        STAGE,
        raw.trim(),
      ));
    }

    Traceback {
      kind,
      message,
      frames,
    }
  }
}

/// A context line must parse as `<integer> <whitespace> | <rest>`.
/// Rows that are pure gutter decoration (leading `|` or `^`) never match.
fn parse_context_line(line: &str, pointer_line: u32) -> Option<CodeLine> {
  let trimmed = line.trim_start();
  if trimmed.is_empty() || trimmed.starts_with('|') || trimmed.starts_with('^') {
    return None;
  }

  let digits: &str = {
    let end = trimmed
      .char_indices()
      .find(|(_, c)| !c.is_ascii_digit())
      .map(|(i, _)| i)
      .unwrap_or(trimmed.len());
    &trimmed[..end]
  };
  if digits.is_empty() {
    return None;
  }
  let number = digits.parse::<u32>().ok()?;

  let rest = trimmed[digits.len()..].trim_start();
  let rest = rest.strip_prefix('|')?;
  // The separator is "| "; one space belongs to it, the rest is source text.
  let text = rest.strip_prefix(' ').unwrap_or(rest);

  Some(CodeLine {
    number,
    text: text.to_string(),
    is_pointer: number == pointer_line,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(raw: &str) -> Traceback {
    TranslatorParser {
      input_file: Path::new("src/main.go"),
    }
    .parse(raw)
  }

  #[test]
  fn structured_report() {
    let raw = "error[E001]: undefined function `Delay`\n  \
               --> src/main.go:14:5\n   \
               |\n\
               14 |     Delay(1000)\n   \
               |     ^^^^^ not found\n";
    let tb = parse(raw);

    assert_eq!(tb.kind, "error[E001]");
    assert_eq!(tb.message, "undefined function `Delay`");
    assert_eq!(tb.frames.len(), 1);

    let frame = &tb.frames[0];
    assert_eq!(frame.file, "src/main.go");
    assert_eq!(frame.line, 14);
    assert_eq!(frame.stage, "transpile");
    assert_eq!(
      frame.code,
      vec![CodeLine {
        number: 14,
        text: "    Delay(1000)".to_string(),
        is_pointer: true,
      }]
    );
  }

  #[test]
  fn arrow_line_closes_previous_frame() {
    let raw = "error[E007]: type mismatch\n  \
               --> src/main.go:3:1\n\
               3 | x := \"a\"\n  \
               --> src/util.go:9:2\n\
               9 | y := 1\n";
    let tb = parse(raw);

    assert_eq!(tb.frames.len(), 2);
    assert_eq!(tb.frames[0].file, "src/main.go");
    assert_eq!(tb.frames[0].line, 3);
    assert_eq!(tb.frames[0].code.len(), 1);
    assert_eq!(tb.frames[1].file, "src/util.go");
    assert_eq!(tb.frames[1].line, 9);
  }

  #[test]
  fn first_header_message_wins() {
    let raw = "error[E001]: first\n  --> a.go:1:1\nerror[E002]: second\n  --> b.go:2:1\n";
    let tb = parse(raw);
    assert_eq!(tb.kind, "error[E001]");
    assert_eq!(tb.message, "first");
  }

  #[test]
  fn pointer_only_on_matching_line() {
    let raw = "error[E003]: bad call\n  \
               --> src/main.go:5:1\n\
               4 | before()\n\
               5 | bad()\n\
               6 | after()\n";
    let tb = parse(raw);
    let pointers: Vec<bool> = tb.frames[0].code.iter().map(|c| c.is_pointer).collect();
    assert_eq!(pointers, vec![false, true, false]);
  }

  #[test]
  fn unstructured_text_degrades_to_synthetic_frame() {
    let tb = parse("panic: something exploded\n");
    assert_eq!(tb.kind, "TranspileError");
    assert_eq!(tb.message, "panic: something exploded");
    assert_eq!(tb.frames.len(), 1);
    assert_eq!(tb.frames[0].file, "src/main.go");
    assert_eq!(tb.frames[0].line, 0);
    assert!(tb.frames[0].code[0].is_pointer);
    assert_eq!(tb.frames[0].code[0].text, "panic: something exploded");
  }

  #[test]
  fn header_without_location_keeps_parsed_kind() {
    let tb = parse("error[E042]: everything is wrong\n");
    assert_eq!(tb.kind, "error[E042]");
    assert_eq!(tb.message, "everything is wrong");
    assert_eq!(tb.frames.len(), 1);
    assert_eq!(tb.frames[0].code[0].text, "error[E042]: everything is wrong");
  }

  #[test]
  fn empty_input_still_yields_a_frame() {
    let tb = parse("");
    assert_eq!(tb.kind, "TranspileError");
    assert_eq!(tb.frames.len(), 1);
  }

  #[test]
  fn decoration_rows_are_not_code_lines() {
    assert!(parse_context_line("   |", 1).is_none());
    assert!(parse_context_line("   |     ^^^^^ not found", 1).is_none());
    assert!(parse_context_line("^^^", 1).is_none());
    assert!(parse_context_line("", 1).is_none());
    assert!(parse_context_line("no number here", 1).is_none());
  }

  #[test]
  fn malformed_line_number_in_arrow_is_zero() {
    let raw = "error[E001]: oops\n  --> src/main.go:xx:5\n";
    let tb = parse(raw);
    assert_eq!(tb.frames[0].line, 0);
  }
}
