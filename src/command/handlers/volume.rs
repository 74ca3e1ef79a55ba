//! Volume command handler

use super::HandlerContext;
use crate::command::{CommandError, CommandResult, VolumeCommand};
use gkb_shared::messages;
use tracing::{info, warn};

/// Handle a `volume <level>` command
///
/// The current volume is read first only to check that the audio subsystem
/// answers. A bad level is rejected whatever the probe said; a probe failure
/// alone does not stop the set attempt.
pub async fn handle_volume(ctx: &HandlerContext, command: &VolumeCommand) -> CommandResult {
    let probe = ctx
        .audio
        .get_volume()
        .await
        .map_err(CommandError::Probe);

    match &probe {
        Ok(current) => info!(
            "  [VOLUME] {} reports current level {}",
            ctx.audio.name(),
            current
        ),
        Err(e) => warn!("  [VOLUME] {}", e),
    }

    let level = match command.level() {
        Ok(level) => level,
        Err(parse_err) => {
            let message = match probe {
                Ok(_) => parse_err.to_string(),
                Err(probe_err) => format!("{} ({})", parse_err, probe_err),
            };
            return CommandResult::Rejected { message };
        }
    };

    match ctx.audio.set_volume(level).await {
        Ok(()) => {
            info!("  [VOLUME] Level set to {}", level);
            CommandResult::Completed {
                message: messages::VOLUME_SET.into(),
                output: String::new(),
            }
        }
        Err(e) => CommandResult::Failed {
            message: CommandError::SetVolume(e).to_string(),
        },
    }
}
