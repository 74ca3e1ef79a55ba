//! Platform mixer backend
//!
//! - Linux: ALSA `amixer get/set <control>`
//! - macOS: `osascript` volume settings
//! - anything else: `AudioError::Unsupported`

use super::{AudioControl, AudioError};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

const AMIXER: &str = "amixer";
const OSASCRIPT: &str = "osascript";

/// Which mixer tool to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Alsa,
    CoreAudio,
    Unsupported,
}

impl Backend {
    fn for_host() -> Self {
        if cfg!(target_os = "linux") {
            Backend::Alsa
        } else if cfg!(target_os = "macos") {
            Backend::CoreAudio
        } else {
            Backend::Unsupported
        }
    }
}

/// Mixer that shells out to the host's volume tools
pub struct SystemMixer {
    backend: Backend,
    /// ALSA simple control name (e.g. "Master")
    control: String,
}

impl SystemMixer {
    /// Create a mixer for the current platform
    pub fn new(control: impl Into<String>) -> Self {
        Self {
            backend: Backend::for_host(),
            control: control.into(),
        }
    }
}

#[async_trait]
impl AudioControl for SystemMixer {
    async fn get_volume(&self) -> Result<i32, AudioError> {
        match self.backend {
            Backend::Alsa => {
                let out = run(AMIXER, &["get", &self.control]).await?;
                parse_amixer_volume(&out).ok_or(AudioError::UnexpectedOutput {
                    program: AMIXER,
                    output: out,
                })
            }
            Backend::CoreAudio => {
                let script = "output volume of (get volume settings)";
                let out = run(OSASCRIPT, &["-e", script]).await?;
                out.trim()
                    .parse()
                    .map_err(|_| AudioError::UnexpectedOutput {
                        program: OSASCRIPT,
                        output: out,
                    })
            }
            Backend::Unsupported => Err(AudioError::Unsupported(std::env::consts::OS)),
        }
    }

    async fn set_volume(&self, level: i32) -> Result<(), AudioError> {
        match self.backend {
            Backend::Alsa => {
                run(AMIXER, &["set", &self.control, &format!("{}%", level)]).await?;
                Ok(())
            }
            Backend::CoreAudio => {
                run(OSASCRIPT, &["-e", &format!("set volume output volume {}", level)]).await?;
                Ok(())
            }
            Backend::Unsupported => Err(AudioError::Unsupported(std::env::consts::OS)),
        }
    }

    fn name(&self) -> &'static str {
        match self.backend {
            Backend::Alsa => AMIXER,
            Backend::CoreAudio => OSASCRIPT,
            Backend::Unsupported => "unsupported",
        }
    }
}

/// Run a mixer tool and return its stdout
async fn run(program: &'static str, args: &[&str]) -> Result<String, AudioError> {
    debug!(program, ?args, "running mixer tool");

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|source| AudioError::Launch { program, source })?;

    if !output.status.success() {
        return Err(AudioError::Failed {
            program,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extract the first `[NN%]` figure from `amixer get` output
fn parse_amixer_volume(output: &str) -> Option<i32> {
    output.lines().find_map(|line| {
        let start = line.find('[')?;
        let rest = &line[start + 1..];
        let end = rest.find("%]")?;
        rest[..end].parse().ok()
    })
}
