//! Command executor - classifies and dispatches incoming commands

use super::handlers::{self, HandlerContext};
use super::Command;
use crate::audio::AudioControl;
use crate::shell::ShellRunner;
use gkb_shared::{CommandRequest, ExecutionResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Result of command execution
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Command ran and succeeded
    Completed { message: String, output: String },
    /// Command ran but the host reported a failure
    Failed { message: String },
    /// Command refused before any host action (bad argument, policy)
    Rejected { message: String },
}

/// Executes commands received over HTTP
///
/// Holds no per-request state, so one executor is shared by all
/// connections.
#[derive(Clone)]
pub struct CommandExecutor {
    ctx: HandlerContext,
}

impl CommandExecutor {
    /// Create a new command executor
    pub fn new(audio: Arc<dyn AudioControl>, shell: Arc<dyn ShellRunner>) -> Self {
        Self {
            ctx: HandlerContext { audio, shell },
        }
    }

    /// Execute a command and return the result envelope
    ///
    /// Exactly one strategy runs per call and the envelope always ends in
    /// OK or KO.
    pub async fn execute(&self, request: &CommandRequest) -> ExecutionResult {
        let start_time = Instant::now();
        let command = Command::classify(&request.cmd);

        info!(
            "Executing command: strategy={} cmd={:?}",
            command.strategy(),
            request.cmd
        );

        // Dispatch to appropriate handler
        let result = match &command {
            Command::Volume(cmd) => handlers::handle_volume(&self.ctx, cmd).await,
            Command::Shell(cmd) => handlers::handle_shell(&self.ctx, cmd).await,
        };

        let elapsed_ms = start_time.elapsed().as_millis();

        // Convert result to envelope
        match result {
            CommandResult::Completed { message, output } => {
                info!("  Command completed in {}ms: {}", elapsed_ms, message);
                ExecutionResult::ok_with_output(message, output)
            }
            CommandResult::Failed { message } => {
                warn!("  Command failed in {}ms: {}", elapsed_ms, message);
                ExecutionResult::ko(message)
            }
            CommandResult::Rejected { message } => {
                warn!("  Command rejected: {}", message);
                ExecutionResult::ko(message)
            }
        }
    }
}
