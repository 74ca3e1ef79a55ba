//! Host audio control
//!
//! The volume strategy talks to the audio subsystem only through the
//! `AudioControl` trait. `SystemMixer` drives the platform mixer tools.

mod mixer;

pub use mixer::SystemMixer;

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by an audio backend
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("failed to run {program}: {source}")]
    Launch {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("unexpected {program} output: {output:?}")]
    UnexpectedOutput {
        program: &'static str,
        output: String,
    },

    #[error("volume control is not supported on {0}")]
    Unsupported(&'static str),
}

/// Read and change the host output volume
#[async_trait]
pub trait AudioControl: Send + Sync {
    /// Current output volume in percent
    async fn get_volume(&self) -> Result<i32, AudioError>;

    /// Set the output volume in percent. The level is passed through as-is.
    async fn set_volume(&self, level: i32) -> Result<(), AudioError>;

    /// Human-readable backend name
    fn name(&self) -> &'static str;
}
