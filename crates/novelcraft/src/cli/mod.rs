//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the novelcraft binary.

mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{run_chapter, run_prologue, run_setting, run_write};
