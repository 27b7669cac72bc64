//! The ordered command output produced by a compiler run.

use glam::DVec3;
use std::fmt;

/// An ordered list of engine commands.
///
/// Order is execution order. Lines starting with `#` are section comments; the
/// engine ignores them. Entries are never reordered or deduplicated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandList {
    lines: Vec<String>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: impl Into<String>) {
        self.lines.push(command.into());
    }

    /// Starts a named block with a `# title` comment line.
    pub fn section(&mut self, title: &str) {
        self.lines.push(format!("# {title}"));
    }

    /// Every line, comments included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Executable commands only, skipping section comments.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|line| !line.starts_with('#'))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }

    /// Lines joined with `\n`, no trailing newline.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl IntoIterator for CommandList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a CommandList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl fmt::Display for CommandList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Renders a number the way the engine scripts expect.
///
/// Integral values keep one decimal (`1.0`), everything else uses the shortest
/// form that round-trips. Negative zero prints as `0.0`.
pub fn num(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Three coordinates sharing one prefix, e.g. `^1.0 ^0.0 ^-2.5`.
pub fn coords(prefix: char, v: DVec3) -> String {
    v.to_array()
        .map(|c| format!("{prefix}{}", num(c)))
        .join(" ")
}
