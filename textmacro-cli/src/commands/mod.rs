//! CLI command implementations.

pub mod build;
pub mod expand;
pub mod init;

pub use build::{build_output, BuildOptions};
pub use expand::expand_file;
pub use init::init_project;
