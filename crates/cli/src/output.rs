//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output: colored status
//! messages, section titles, and the rendered form of a structured
//! [`Traceback`].

use gopherino_lib::diag::Traceback;
use owo_colors::{OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "-->";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn section_title(title: &str) {
  println!(
    "{} {}",
    "::".if_supports_color(Stream::Stdout, |s| s.cyan()),
    title.if_supports_color(Stream::Stdout, |s| s.bold())
  );
}

/// Render a structured traceback to stderr: kind and message first, then
/// each frame with its location and source context, pointer line marked.
pub fn render_traceback(tb: &Traceback) {
  eprintln!();
  eprintln!(
    "{} {}",
    format!("{}:", tb.kind).if_supports_color(Stream::Stderr, |s| s.red()),
    tb.message.if_supports_color(Stream::Stderr, |s| s.bold())
  );

  for frame in &tb.frames {
    let location = if frame.line > 0 {
      format!("{}:{}", frame.file, frame.line)
    } else {
      frame.file.clone()
    };
    eprintln!(
      "  {} {}  {}",
      symbols::ARROW.if_supports_color(Stream::Stderr, |s| s.dimmed()),
      location.if_supports_color(Stream::Stderr, |s| s.cyan()),
      format!("({})", frame.stage).if_supports_color(Stream::Stderr, |s| s.dimmed())
    );

    for code in &frame.code {
      let marker = if code.is_pointer { ">" } else { " " };
      if code.number > 0 {
        eprintln!(
          "   {} {:>4} {} {}",
          marker.if_supports_color(Stream::Stderr, |s| s.red()),
          code.number,
          "|".if_supports_color(Stream::Stderr, |s| s.dimmed()),
          code.text
        );
      } else {
        eprintln!(
          "   {} {}",
          marker.if_supports_color(Stream::Stderr, |s| s.red()),
          code.text
        );
      }
    }
  }
  eprintln!();
}
