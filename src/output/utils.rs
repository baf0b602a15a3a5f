//! Shared helpers for colored text

use std::io;

use termcolor::{Ansi, Color, ColorSpec, WriteColor};

/// Wrap `text` in ANSI escapes for `spec`.
pub fn paint(text: &str, spec: &ColorSpec) -> String {
    let mut out = Ansi::new(Vec::new());
    match write_painted(&mut out, text, spec) {
        Ok(()) => String::from_utf8_lossy(&out.into_inner()).into_owned(),
        Err(_) => text.to_string(),
    }
}

fn write_painted<W: WriteColor>(out: &mut W, text: &str, spec: &ColorSpec) -> io::Result<()> {
    out.set_color(spec)?;
    out.write_all(text.as_bytes())?;
    out.reset()
}

/// Directory lines are blue on the console.
pub fn paint_directory(text: &str) -> String {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Blue));
    paint(text, &spec)
}
