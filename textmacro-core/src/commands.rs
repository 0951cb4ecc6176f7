//! Directive registry and the built-in `@def` / `@inc` commands.

use crate::error::{BuildError, MacroError};
use crate::expander::{BuildFrame, Expander};
use std::collections::HashMap;
use std::fmt;

/// Everything an action can see besides its arguments and the current text
pub struct CallSite<'a> {
    /// File whose directive block is executing
    pub frame: &'a BuildFrame,
    /// Byte offset where the directive block began
    pub index: usize,
    pub expander: &'a Expander,
}

/// Command body: `(args, current text, call site) -> new text`
pub type CommandAction =
    fn(&[String], String, &CallSite<'_>) -> std::result::Result<String, BuildError>;

/// A directive name bound to its arity and action
#[derive(Clone)]
pub struct CommandDescriptor {
    pub name: String,
    pub arity: usize,
    pub action: CommandAction,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>, arity: usize, action: CommandAction) -> Self {
        Self {
            name: name.into(),
            arity,
            action,
        }
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Dispatch table from directive name to command.
///
/// Filled before an [`Expander`] is constructed; the expander only reads it.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `@def` and `@inc`
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(CommandDescriptor::new("def", 2, define));
        registry.register(CommandDescriptor::new("inc", 1, include));
        registry
    }

    /// Add a command, returning the one it replaced
    pub fn register(&mut self, command: CommandDescriptor) -> Option<CommandDescriptor> {
        self.commands.insert(command.name.clone(), command)
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// `@def name value`: replace every literal `name` in the current text
fn define(args: &[String], text: String, _site: &CallSite<'_>) -> Result<String, BuildError> {
    let [name, value] = args else {
        return Err(arity_violation("def", 2, args.len()));
    };
    if name.is_empty() {
        return Ok(text);
    }
    tracing::trace!(name = %name, "def");
    Ok(text.replace(name.as_str(), value))
}

/// `@inc path`: splice the fully expanded target at the block's offset
fn include(args: &[String], text: String, site: &CallSite<'_>) -> Result<String, BuildError> {
    let [target] = args else {
        return Err(arity_violation("inc", 1, args.len()));
    };
    let target = strip_double_quotes(target);
    let included = site.expander.expand_include(site.frame, target)?;

    let index = floor_char_boundary(&text, site.index);
    let mut spliced = String::with_capacity(text.len() + included.len());
    spliced.push_str(&text[..index]);
    spliced.push_str(&included);
    spliced.push_str(&text[index..]);
    Ok(spliced)
}

fn arity_violation(name: &str, arity: usize, got: usize) -> BuildError {
    MacroError::Internal(format!("@{} takes {} arguments, action received {}", name, arity, got))
        .into()
}

/// Strip one pair of surrounding double quotes from a single-line argument
pub fn strip_double_quotes(arg: &str) -> &str {
    match arg.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(inner) if !inner.contains(['\n', '\r', '\u{2028}', '\u{2029}']) => inner,
        _ => arg,
    }
}

/// Clamp `index` into `text` and back it off to a char boundary.
///
/// Earlier commands in the same block may have shortened the text before the
/// block offset.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
