//! Command classification
//!
//! A command line containing the substring `"volume"` (case-sensitive,
//! anywhere) is a volume command; everything else is a shell command. This
//! is a plain substring test: `"set volume to 50"` and `"play my-volume-song"`
//! both classify as volume commands.

use super::CommandError;
use std::fmt;

/// Substring that selects the volume strategy
pub const VOLUME_KEYWORD: &str = "volume";

/// A classified command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Volume(VolumeCommand),
    Shell(ShellCommand),
}

impl Command {
    /// Classify a raw command line
    pub fn classify(line: &str) -> Self {
        if line.contains(VOLUME_KEYWORD) {
            Command::Volume(VolumeCommand {
                line: line.to_string(),
            })
        } else {
            Command::Shell(ShellCommand {
                line: line.to_string(),
            })
        }
    }

    /// Name of the strategy this command routes to
    pub fn strategy(&self) -> &'static str {
        match self {
            Command::Volume(_) => "volume",
            Command::Shell(_) => "shell",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Volume(v) => write!(f, "{}", v.line),
            Command::Shell(s) => write!(f, "{}", s.line),
        }
    }
}

/// `"<ignored-prefix> <integer>"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeCommand {
    line: String,
}

impl VolumeCommand {
    /// Second whitespace-delimited token, if any
    pub fn level_token(&self) -> Option<&str> {
        self.line.split_whitespace().nth(1)
    }

    /// Requested level. The 0-100 range is not enforced here.
    pub fn level(&self) -> Result<i32, CommandError> {
        let token = self.level_token().unwrap_or_default();
        token.parse().map_err(|_| CommandError::Parse {
            token: token.to_string(),
        })
    }
}

/// A command line passed verbatim to the host shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    line: String,
}

impl ShellCommand {
    pub fn line(&self) -> &str {
        &self.line
    }
}
