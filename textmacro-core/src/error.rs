use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub use textmacro_types::{Location, Span};

/// Errors raised while parsing or executing a single directive block
#[derive(Debug, thiserror::Error)]
pub enum MacroError {
    #[error("File not found '{}'", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid command @{name}")]
    InvalidCommand { name: String },

    #[error(
        "Expected {expected} argument{} for @{name}, but only {found} {} found",
        plural_suffix(.expected),
        was_or_were(.found)
    )]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Unmatched token '{bracket}'")]
    UnmatchedToken { bracket: char },

    #[error("Include depth limit of {limit} exceeded at '{}'", .path.display())]
    DepthExceeded { limit: usize, path: PathBuf },

    /// Broken internal invariant rather than malformed input
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MacroError {
    /// Whether this failure stems from the input text rather than a bug
    pub fn is_input_error(&self) -> bool {
        !matches!(self, MacroError::Internal(_))
    }
}

fn plural_suffix(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

fn was_or_were(count: &usize) -> &'static str {
    if *count > 1 {
        "were"
    } else {
        "was"
    }
}

pub type Result<T> = std::result::Result<T, MacroError>;

/// A failure annotated with the chain of files it unwound through.
///
/// The first frame to observe a raw [`MacroError`] wraps it; every enclosing
/// frame appends its own location. `trace` is therefore ordered innermost
/// first.
#[derive(Debug)]
pub struct BuildError {
    pub cause: MacroError,
    pub trace: Vec<Location>,
}

impl BuildError {
    pub fn new(cause: MacroError) -> Self {
        Self {
            cause,
            trace: Vec::new(),
        }
    }

    /// Append the location of an enclosing frame
    pub fn at(mut self, location: Location) -> Self {
        self.trace.push(location);
        self
    }

    /// Location where the failure was first observed
    pub fn origin(&self) -> Option<&Location> {
        self.trace.first()
    }

    /// The root cause message without the trace
    pub fn message(&self) -> String {
        self.cause.to_string()
    }

    /// Serializable view for machine-readable diagnostics
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            message: self.message(),
            trace: self.trace.clone(),
        }
    }
}

impl From<MacroError> for BuildError {
    fn from(cause: MacroError) -> Self {
        Self::new(cause)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cause)?;
        for location in &self.trace {
            write!(f, "\n    at {}", location)?;
        }
        Ok(())
    }
}

// The cause is already part of `Display`, so no `source()`: reporters would
// otherwise print it twice.
impl std::error::Error for BuildError {}

/// JSON shape of a rendered [`BuildError`]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub message: String,
    pub trace: Vec<Location>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_wording() {
        let one = MacroError::ArityMismatch {
            name: "inc".into(),
            expected: 1,
            found: 0,
        };
        assert_eq!(one.to_string(), "Expected 1 argument for @inc, but only 0 was found");

        let two = MacroError::ArityMismatch {
            name: "def".into(),
            expected: 2,
            found: 1,
        };
        assert_eq!(two.to_string(), "Expected 2 arguments for @def, but only 1 was found");

        let three = MacroError::ArityMismatch {
            name: "wrap".into(),
            expected: 3,
            found: 2,
        };
        assert_eq!(three.to_string(), "Expected 3 arguments for @wrap, but only 2 were found");
    }

    #[test]
    fn test_trace_rendering() {
        let err = BuildError::from(MacroError::InvalidCommand {
            name: "bogus".into(),
        })
        .at(Location::new("c.txt", 2))
        .at(Location::new("lib/b.txt", 0));

        assert_eq!(
            err.to_string(),
            "Invalid command @bogus\n    at c.txt:2\n    at lib/b.txt:0"
        );
        assert_eq!(err.origin(), Some(&Location::new("c.txt", 2)));
    }

    #[test]
    fn test_untraced_rendering() {
        let err = BuildError::from(MacroError::FileNotFound {
            path: PathBuf::from("missing.txt"),
        });
        assert_eq!(err.to_string(), "File not found 'missing.txt'");
        assert!(err.origin().is_none());
    }

    #[test]
    fn test_internal_is_not_input_error() {
        assert!(!MacroError::Internal("bad".into()).is_input_error());
        assert!(MacroError::UnmatchedToken { bracket: '(' }.is_input_error());
    }
}
