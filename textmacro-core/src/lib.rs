//! # textmacro
//!
//! A text macro expander. Source files carry directive blocks, by default
//! `/*buildjs ... */`, holding a sequence of `@name arg…` calls:
//!
//! - `@def NAME value` replaces every literal `NAME` in the file
//! - `@inc "path"` splices in the fully expanded contents of another file,
//!   resolved relative to the including file
//!
//! Blocks are removed from the output once executed. Failures carry the
//! chain of `file:line` locations they unwound through.
//!
//! ## Example
//!
//! ```ignore
//! /*buildjs @def VERSION 1.2.0 @inc "banner.js" */
//! console.log("VERSION");
//! ```

pub mod assemble;
pub mod commands;
pub mod config;
pub mod error;
pub mod expander;
pub mod lexer;
pub mod parser;

#[cfg(test)]
mod tests;

// Re-export key types
pub use assemble::{AssembleError, Assembler};
pub use commands::{CallSite, CommandAction, CommandDescriptor, CommandRegistry};
pub use config::{Config, ConfigError};
pub use error::{BuildError, ErrorReport, MacroError, Result};
pub use expander::{BuildFrame, Expander, DEFAULT_MAX_INCLUDE_DEPTH};
pub use lexer::{tokenize, SpannedToken, TokenKind};
pub use parser::{parse_argument, parse_block, Invocation, Parser, TokenCursor};

pub use textmacro_types::{Location, Markers, Span};

use std::path::Path;

/// Expand a single file with the built-in commands
pub fn build(file: impl AsRef<Path>, base_dir: Option<&Path>) -> std::result::Result<String, BuildError> {
    Expander::new().expand_file(file, base_dir)
}

/// Expand `inputs` in order and write the concatenation to `output`
pub fn build_to_file<P: AsRef<Path>>(
    inputs: &[P],
    output: Option<&Path>,
    base_dir: Option<&Path>,
) -> std::result::Result<(), AssembleError> {
    let expander = Expander::new();
    Assembler::new(&expander).write(inputs, output, base_dir)
}
