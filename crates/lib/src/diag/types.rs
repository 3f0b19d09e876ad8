//! The uniform structured diagnostic model.
//!
//! The translator, the toolchain's compile step, and its upload step each
//! report failures as loosely structured free text, and no two of them agree
//! on a format. Everything downstream of the parsers works with the single
//! model defined here: a [`Traceback`] holding ordered [`Frame`]s, each frame
//! holding ordered [`CodeLine`]s.
//!
//! Tracebacks exist for display only. They are built when a tool fails,
//! rendered, and dropped; nothing persists them.

/// A normalized diagnostic from one failed tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traceback {
  /// Error class tag, e.g. `error[E001]`, `TranspileError`, `CompileError`.
  pub kind: String,
  /// Top-level human-readable message.
  pub message: String,
  /// Location-anchored segments, in the order the tool reported them.
  /// Never empty: every parser falls back to a single synthetic frame.
  pub frames: Vec<Frame>,
}

/// One location-anchored segment of a traceback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
  /// Source file the frame points at, or a stand-in such as a serial port.
  pub file: String,
  /// 1-based line number; 0 when unknown.
  pub line: u32,
  /// Pipeline stage that produced the frame: `transpile`, `compile`, `upload`.
  pub stage: String,
  /// Source context lines, if the tool supplied any.
  pub code: Vec<CodeLine>,
}

/// One line of source context inside a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
  /// 1-based source line number; 0 when synthetic.
  pub number: u32,
  /// Literal line text.
  pub text: String,
  /// Marks the line the diagnostic points at. At most one per frame.
  pub is_pointer: bool,
}

impl Frame {
  /// A frame built from unstructured text: no location, one pointer line
  /// carrying the text verbatim.
  pub fn synthetic(
    file: impl Into<String>,
    stage: impl Into<String>,
    text: impl Into<String>,
  ) -> Self {
    Frame {
      file: file.into(),
      line: 0,
      stage: stage.into(),
      code: vec![CodeLine {
        number: 0,
        text: text.into(),
        is_pointer: true,
      }],
    }
  }
}
