//! Shell command handler

use super::HandlerContext;
use crate::command::{CommandError, CommandResult, ShellCommand};
use gkb_shared::messages;
use tracing::{debug, info};

/// Handle a shell command
///
/// Runs the line verbatim and waits for it to exit. Only stdout is returned
/// to the caller; failures never carry output.
pub async fn handle_shell(ctx: &HandlerContext, command: &ShellCommand) -> CommandResult {
    info!("  [SHELL] Running via {} runner", ctx.shell.name());

    match ctx.shell.run(command.line()).await {
        Ok(out) => {
            if !out.stderr.is_empty() {
                debug!("  [SHELL] stderr: {}", out.stderr.trim());
            }
            CommandResult::Completed {
                message: messages::CMD_EXECUTED.into(),
                output: out.stdout,
            }
        }
        Err(e) => {
            let err = CommandError::Launch(e);
            if err.is_rejection() {
                CommandResult::Rejected {
                    message: err.to_string(),
                }
            } else {
                CommandResult::Failed {
                    message: err.to_string(),
                }
            }
        }
    }
}
