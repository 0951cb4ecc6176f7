//! Build command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use textmacro_core::{Assembler, Config};

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
}

/// Expand the inputs in order and write the concatenated output.
///
/// Inputs given on the command line are resolved against `--base-dir` (or
/// the working directory); otherwise the config's inputs are used with its
/// base directory.
pub fn build_output(config_path: &Path, opts: BuildOptions) -> Result<()> {
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;

    let (inputs, base_dir) = if opts.inputs.is_empty() {
        (config.inputs.clone(), opts.base_dir.or_else(|| config.base_dir()))
    } else {
        (opts.inputs, opts.base_dir)
    };
    if inputs.is_empty() {
        bail!("No input files given and none configured in {:?}", config_path);
    }
    let output = opts.output.or_else(|| config.output_path());

    tracing::info!("Building {} input(s)", inputs.len());

    let expander = config.expander();
    Assembler::new(&expander)
        .write(&inputs[..], output.as_deref(), base_dir.as_deref())
        .context("Build failed")?;

    if let Some(output) = &output {
        tracing::info!("✓ Output written to {:?}", output);
    }
    Ok(())
}
