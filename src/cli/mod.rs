//! CLI interface for rulegen
//!
//! Argument parsing and the command implementations behind the `rulegen`
//! binary.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, TuningArgs};
pub use commands::execute;
