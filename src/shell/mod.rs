//! Host shell execution
//!
//! The shell strategy runs command lines through a `ShellRunner`. Which
//! runner is used is decided once at startup from `ShellConfig`, so the
//! dispatcher never needs to know whether execution is live, disabled or
//! restricted to an allow-list.

mod policy;
mod system;

pub use policy::{AllowListShell, DisabledShell};
pub use system::SystemShell;

use crate::config::ShellConfig;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Captured output of a successful command
#[derive(Debug, Clone, Default)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Errors reported by a shell runner
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{}{}", .status, stderr_suffix(.stderr))]
    NonZeroExit {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("shell execution is disabled")]
    Disabled,

    #[error("{0:?} is not in the shell allow-list")]
    NotAllowed(String),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Runs a command line on the host
#[async_trait]
pub trait ShellRunner: Send + Sync {
    /// Run `line` to completion and capture its output
    async fn run(&self, line: &str) -> Result<ShellOutput, ShellError>;

    /// Human-readable runner name
    fn name(&self) -> &'static str;
}

/// Build the runner selected by configuration
pub fn from_config(config: &ShellConfig) -> Arc<dyn ShellRunner> {
    if !config.enabled {
        info!("Shell execution disabled by configuration");
        return Arc::new(DisabledShell);
    }

    let system: Arc<dyn ShellRunner> = Arc::new(SystemShell::new(config.program.clone()));

    if config.allow_list.is_empty() {
        warn!("Shell execution enabled without an allow-list: any command will run");
        system
    } else {
        info!("Shell execution restricted to: {}", config.allow_list.join(", "));
        Arc::new(AllowListShell::new(system, config.allow_list.iter().cloned()))
    }
}
