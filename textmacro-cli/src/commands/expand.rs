//! Expand command implementation.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use textmacro_core::Config;

/// Expand one file and print the result to stdout.
///
/// Without `--base-dir` the file resolves against the config's base
/// directory, as `build` does for configured inputs.
pub fn expand_file(config_path: &Path, file: &Path, base_dir: Option<&Path>, json: bool) -> Result<()> {
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
    let expander = config.expander();
    let base_dir = base_dir.map(Path::to_path_buf).or_else(|| config.base_dir());

    tracing::debug!("Expanding {:?} (base dir {:?})", file, base_dir);

    match expander.expand_file(file, base_dir.as_deref()) {
        Ok(text) => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write expanded output")?;
            stdout.flush()?;
            Ok(())
        }
        Err(err) if json => {
            println!("{}", serde_json::to_string_pretty(&err.report())?);
            std::process::exit(1);
        }
        Err(err) => Err(anyhow::Error::new(err).context(format!("Failed to expand {:?}", file))),
    }
}
