//! Journal themes CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (extract, config)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, ExtractArgs};
pub use commands::{run_extract, show_config};
