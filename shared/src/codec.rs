//! JSON codec for command requests and result envelopes
//!
//! Requests are a single JSON object:
//! ```text
//! { "cmd": "<command line>" }
//! ```
//! Responses are the `{status, message, output}` envelope.

use bytes::Bytes;
use thiserror::Error;

use crate::limits::MAX_REQUEST_BYTES;
use crate::{messages, CommandRequest, ExecutionResult};

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("{}", messages::MISSING_BODY)]
    EmptyBody,

    #[error("cmd must not be empty")]
    EmptyCommand,

    #[error("request too large: {0} bytes (max: {MAX_REQUEST_BYTES})")]
    MessageTooLarge(usize),

    #[error("failed to read request body: {0}")]
    Read(String),

    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to encode response: {0}")]
    Encode(serde_json::Error),
}

impl CodecError {
    /// Missing or empty input, as opposed to input that failed to decode
    pub fn is_bad_request(&self) -> bool {
        matches!(self, CodecError::EmptyBody | CodecError::EmptyCommand)
    }
}

/// Decode a request body into a `CommandRequest`
///
/// Returns:
/// - `Err(EmptyBody)` if the body is empty or only whitespace
/// - `Err(MessageTooLarge)` if the body exceeds `MAX_REQUEST_BYTES`
/// - `Err(Malformed)` if the body is not an object with a string `cmd`
/// - `Err(EmptyCommand)` if `cmd` is blank
pub fn decode_request(body: &[u8]) -> Result<CommandRequest, CodecError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(CodecError::EmptyBody);
    }

    if body.len() > MAX_REQUEST_BYTES {
        return Err(CodecError::MessageTooLarge(body.len()));
    }

    let request: CommandRequest = serde_json::from_slice(body)?;

    if request.cmd.trim().is_empty() {
        return Err(CodecError::EmptyCommand);
    }

    Ok(request)
}

/// Encode a result envelope as a JSON body
pub fn encode_result(result: &ExecutionResult) -> Result<Bytes, CodecError> {
    serde_json::to_vec(result)
        .map(Bytes::from)
        .map_err(CodecError::Encode)
}
