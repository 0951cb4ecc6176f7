//! Concatenate the expansion of several top-level inputs into one output.

use crate::error::BuildError;
use crate::expander::Expander;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("You must define an output file")]
    MissingOutput,

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Failed to write output file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Runs an [`Expander`] over an ordered list of inputs
pub struct Assembler<'e> {
    expander: &'e Expander,
}

impl<'e> Assembler<'e> {
    pub fn new(expander: &'e Expander) -> Self {
        Self { expander }
    }

    /// Expand each input in order and concatenate the results
    pub fn assemble<P: AsRef<Path>>(&self, inputs: &[P], base_dir: Option<&Path>) -> Result<String, BuildError> {
        let mut combined = String::new();
        for input in inputs {
            combined.push_str(&self.expander.expand_file(input, base_dir)?);
        }
        Ok(combined)
    }

    /// Assemble `inputs` and write the result to `output`
    pub fn write<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        output: Option<&Path>,
        base_dir: Option<&Path>,
    ) -> Result<(), AssembleError> {
        let output = output.ok_or(AssembleError::MissingOutput)?;
        let combined = self.assemble(inputs, base_dir)?;

        let write_err = |source| AssembleError::Write {
            path: output.to_path_buf(),
            source,
        };
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(output, &combined).map_err(write_err)?;

        tracing::info!("Wrote {} bytes to {}", combined.len(), output.display());
        Ok(())
    }
}
