//! Command dispatch and execution
//!
//! This module handles:
//! - Classifying a command line as a volume change or a shell command
//! - Dispatching to the matching strategy handler
//! - Turning the handler outcome into a result envelope

mod classify;
mod error;
mod executor;
pub mod handlers;

pub use classify::{Command, ShellCommand, VolumeCommand};
pub use error::CommandError;
pub use executor::{CommandExecutor, CommandResult};
