//! # textmacro CLI
//!
//! Command-line interface for the textmacro expansion engine.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "textmacro")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "textmacro.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter textmacro.yml
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Expand a single file and print the result
    Expand {
        /// File to expand
        file: PathBuf,

        /// Directory the file is resolved against
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Report failures as JSON
        #[arg(long)]
        json: bool,
    },

    /// Expand inputs in order and write the concatenation
    Build {
        /// Input files (defaults to the config's inputs)
        inputs: Vec<PathBuf>,

        /// Output file (defaults to the config's output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory inputs are resolved against
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for expanded text
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Expand {
            file,
            base_dir,
            json,
        } => commands::expand_file(&cli.config, &file, base_dir.as_deref(), json),
        Commands::Build {
            inputs,
            output,
            base_dir,
        } => {
            let opts = commands::BuildOptions {
                inputs,
                output,
                base_dir,
            };
            commands::build_output(&cli.config, opts)
        }
    }
}
