//! API Module
//!
//! Structure:
//! - cli.rs: clap command line definition
//! - commands.rs: command handlers (config → pipeline → sinks)

pub mod cli;
pub mod commands;

pub use cli::Cli;
pub use commands::execute;
