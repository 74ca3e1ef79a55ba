//! `/api/v1/commands` handlers and the response envelope

use crate::command::CommandExecutor;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use gkb_shared::codec::{self, CodecError};
use gkb_shared::limits::MAX_REQUEST_BYTES;
use gkb_shared::{CommandRequest, ExecutionResult, Status};
use tracing::{error, warn};

/// Decode the body, run the command and answer with an envelope
pub async fn handle_commands(State(executor): State<CommandExecutor>, body: Body) -> Response {
    let request = match read_request(body).await {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, bad_request = e.is_bad_request(), "rejected request body");
            return envelope(StatusCode::BAD_REQUEST, &ExecutionResult::ko(e.to_string()));
        }
    };

    let result = executor.execute(&request).await;
    envelope(status_code(result.status), &result)
}

/// Collect the body, stopping as soon as it passes `MAX_REQUEST_BYTES`
async fn read_request(body: Body) -> Result<CommandRequest, CodecError> {
    let mut stream = body.into_data_stream();
    let mut buf = BytesMut::new();

    while let Some(chunk) = stream.next().await {
        let chunk: Bytes = chunk.map_err(|e| CodecError::Read(e.to_string()))?;
        buf.extend_from_slice(&chunk);
        if buf.len() > MAX_REQUEST_BYTES {
            return Err(CodecError::MessageTooLarge(buf.len()));
        }
    }

    codec::decode_request(&buf)
}

/// Bare OPTIONS without CORS preflight headers
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// HTTP status mirroring the envelope status
pub fn status_code(status: Status) -> StatusCode {
    match status {
        Status::Ok => StatusCode::CREATED,
        Status::Ko | Status::Na => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn envelope(status: StatusCode, result: &ExecutionResult) -> Response {
    match codec::encode_result(result) {
        Ok(body) => (status, [(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode envelope");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
