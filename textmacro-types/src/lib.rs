//! Shared types for textmacro
//!
//! This crate provides the plain data types used across the textmacro
//! crates: source spans, file locations for diagnostics, and the directive
//! block markers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Byte range within a piece of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A (file, line) pair recorded while a failure unwinds through nested files.
///
/// Lines are 0-based: the number of newlines preceding the directive block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// Open/close marker pair delimiting a directive block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    #[serde(default = "default_open")]
    pub open: String,
    #[serde(default = "default_close")]
    pub close: String,
}

fn default_open() -> String {
    String::from("/*buildjs")
}

fn default_close() -> String {
    String::from("*/")
}

impl Markers {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = Location::new("src/a.js", 3);
        assert_eq!(loc.to_string(), "src/a.js:3");
    }

    #[test]
    fn test_default_markers() {
        let markers = Markers::default();
        assert_eq!(markers.open, "/*buildjs");
        assert_eq!(markers.close, "*/");
    }

    #[test]
    fn test_markers_partial_json() {
        let markers: Markers = serde_json::from_str(r#"{"open": "<!--m"}"#).unwrap();
        assert_eq!(markers.open, "<!--m");
        assert_eq!(markers.close, "*/");
    }

    #[test]
    fn test_span_len() {
        let span = Span::new(4, 9);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::default().is_empty());
    }
}
