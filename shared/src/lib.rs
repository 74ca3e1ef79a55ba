//! gkb Shared Protocol Types
//!
//! This crate provides the request and response envelope types and the JSON
//! codec used between remote clients and the gkb command gateway.

pub mod codec;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Limits applied to inbound traffic
pub mod limits {
    /// Largest request body the decoder accepts (64 KiB)
    pub const MAX_REQUEST_BYTES: usize = 64 * 1024;
}

/// Fixed messages reported in envelopes
pub mod messages {
    pub const VOLUME_SET: &str = "set volume success";
    pub const INVALID_VOLUME: &str = "invalid volume value";
    pub const CMD_EXECUTED: &str = "cmd executed successfully";
    pub const CMD_FAILED_PREFIX: &str = "Failed to initiate cmd";
    pub const MISSING_BODY: &str = "Please send a request body";
}

/// A command sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub cmd: String,
}

impl CommandRequest {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }
}

/// Outcome indicator carried by every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "KO")]
    Ko,
    /// Not yet determined. Never leaves the gateway.
    #[default]
    #[serde(rename = "NA")]
    Na,
}

impl Status {
    /// True once the status has been set to OK or KO
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Na)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Ko => write!(f, "KO"),
            Status::Na => write!(f, "NA"),
        }
    }
}

/// The uniform `{status, message, output}` envelope returned for every request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: Status,
    pub message: String,
    #[serde(default)]
    pub output: String,
}

impl ExecutionResult {
    /// Create a successful result with no captured output
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            message: message.into(),
            output: String::new(),
        }
    }

    /// Create a successful result carrying captured output
    pub fn ok_with_output(message: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            message: message.into(),
            output: output.into(),
        }
    }

    /// Create a failed result. Failed results never carry output.
    pub fn ko(message: impl Into<String>) -> Self {
        Self {
            status: Status::Ko,
            message: message.into(),
            output: String::new(),
        }
    }
}
