use crate::commands::{CallSite, CommandRegistry};
use crate::error::{BuildError, Location, MacroError};
use crate::parser::{parse_block, Invocation};
use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use textmacro_types::Markers;

/// Default bound on nested `@inc` levels
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

/// One activation of file expansion.
///
/// The directory context travels with the frame instead of living in the
/// process working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFrame {
    /// Path as written by the caller or the including directive
    pub file: PathBuf,
    /// Directory `file` is resolved against
    pub dir: PathBuf,
    /// Number of includes between this frame and the root
    pub depth: usize,
}

impl BuildFrame {
    pub fn root(file: impl Into<PathBuf>, base_dir: Option<&Path>) -> Self {
        Self {
            file: file.into(),
            dir: base_dir.map(Path::to_path_buf).unwrap_or_default(),
            depth: 0,
        }
    }

    /// Resolved location of this frame's file
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }

    /// Frame for a file included from this one, resolved against this
    /// file's directory
    pub fn child(&self, file: impl Into<PathBuf>) -> Self {
        let dir = self
            .path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            file: file.into(),
            dir,
            depth: self.depth + 1,
        }
    }
}

/// A directive block located in the text
#[derive(Debug, Clone, PartialEq, Eq)]
struct BlockMatch {
    /// Whole block, markers included
    range: Range<usize>,
    /// Text between the markers
    body: Range<usize>,
}

/// Expansion engine: finds directive blocks, parses and executes them, and
/// recurses into included files.
#[derive(Debug, Clone)]
pub struct Expander {
    registry: CommandRegistry,
    markers: Markers,
    max_depth: usize,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new()
    }
}

impl Expander {
    /// Expander with the built-in commands and default markers
    pub fn new() -> Self {
        Self::with_registry(CommandRegistry::builtin())
    }

    pub fn with_registry(registry: CommandRegistry) -> Self {
        Self {
            registry,
            markers: Markers::default(),
            max_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Expand a file, resolving it and its includes against `base_dir`
    pub fn expand_file(&self, file: impl AsRef<Path>, base_dir: Option<&Path>) -> Result<String, BuildError> {
        self.expand_frame(&BuildFrame::root(file.as_ref(), base_dir))
    }

    /// Expand the target of an `@inc` issued from `parent`
    pub fn expand_include(&self, parent: &BuildFrame, target: impl Into<PathBuf>) -> Result<String, BuildError> {
        let frame = parent.child(target);
        if frame.depth > self.max_depth {
            return Err(MacroError::DepthExceeded {
                limit: self.max_depth,
                path: frame.path(),
            }
            .into());
        }
        tracing::debug!(from = %parent.path().display(), to = %frame.path().display(), "include");
        self.expand_frame(&frame)
    }

    fn expand_frame(&self, frame: &BuildFrame) -> Result<String, BuildError> {
        let path = frame.path();
        tracing::debug!("Expanding {}", path.display());
        let text = read_source(&path)?;
        self.expand_text(text, frame)
    }

    /// Expand every directive block in `text`, which belongs to `frame`.
    ///
    /// Scanning restarts from the top after each block so spliced-in text is
    /// scanned again.
    pub fn expand_text(&self, mut text: String, frame: &BuildFrame) -> Result<String, BuildError> {
        while let Some(block) = self.find_block(&text) {
            let line = text[..block.range.start].matches('\n').count();
            text = self
                .expand_block(text, &block, frame)
                .map_err(|err| err.at(Location::new(frame.path(), line)))?;
        }
        Ok(text)
    }

    fn find_block(&self, text: &str) -> Option<BlockMatch> {
        let Markers { open, close } = &self.markers;
        if open.is_empty() || close.is_empty() {
            return None;
        }
        let start = text.find(open.as_str())?;
        let body_start = start + open.len();
        let body_end = body_start + text[body_start..].find(close.as_str())?;
        Some(BlockMatch {
            range: start..body_end + close.len(),
            body: body_start..body_end,
        })
    }

    /// Parse the whole block, cut it out, then run its invocations
    fn expand_block(&self, text: String, block: &BlockMatch, frame: &BuildFrame) -> Result<String, BuildError> {
        tracing::trace!(offset = block.range.start, "directive block");
        let invocations = parse_block(&text[block.body.clone()], &self.registry)?;

        let mut remaining = String::with_capacity(text.len() - block.range.len());
        remaining.push_str(&text[..block.range.start]);
        remaining.push_str(&text[block.range.end..]);

        let site = CallSite {
            frame,
            index: block.range.start,
            expander: self,
        };
        self.execute(&invocations, remaining, &site)
    }

    /// Run invocations in source order, threading the text through each
    pub fn execute(
        &self,
        invocations: &[Invocation<'_>],
        mut text: String,
        site: &CallSite<'_>,
    ) -> Result<String, BuildError> {
        for invocation in invocations {
            if invocation.args.len() != invocation.command.arity {
                return Err(MacroError::Internal(format!(
                    "@{} parsed with {} arguments but declares {}",
                    invocation.name(),
                    invocation.args.len(),
                    invocation.command.arity
                ))
                .into());
            }
            tracing::trace!(command = invocation.name(), args = ?invocation.args, "execute");
            text = (invocation.command.action)(&invocation.args, text, site)?;
        }
        Ok(text)
    }
}

fn read_source(path: &Path) -> Result<String, MacroError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => MacroError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => MacroError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
