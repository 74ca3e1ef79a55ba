//! Errors raised while executing a classified command

use crate::audio::AudioError;
use crate::shell::ShellError;
use gkb_shared::messages;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    /// The availability probe could not read the current volume
    #[error("audio subsystem unavailable: {0}")]
    Probe(#[source] AudioError),

    /// The volume token is missing or not an integer
    #[error("{} {:?}", messages::INVALID_VOLUME, .token)]
    Parse { token: String },

    /// The audio subsystem rejected the new level
    #[error("set volume failed: {0}")]
    SetVolume(#[source] AudioError),

    /// The shell command could not start or exited unsuccessfully
    #[error("{}: {}", messages::CMD_FAILED_PREFIX, .0)]
    Launch(#[source] ShellError),
}

impl CommandError {
    /// True when the command was refused before any system action ran
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CommandError::Parse { .. }
                | CommandError::Launch(ShellError::Disabled)
                | CommandError::Launch(ShellError::NotAllowed(_))
        )
    }
}
