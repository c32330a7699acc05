use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

#[derive(Serialize)]
struct StatusBody<'a> {
    msg: &'a str,
}

#[derive(Serialize)]
struct LegacyStatusBody<'a> {
    status: &'a str,
    msg: &'a str,
}

/// Minimal JSON status reply: the given status code plus a body of the
/// shape `{"msg":"<message>"}`.
///
/// The body is written as raw bytes, so no `Content-Type` header is set.
#[derive(Debug)]
pub struct JsonStatus {
    pub status: StatusCode,
    pub message: String,
}

impl JsonStatus {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for JsonStatus {
    fn into_response(self) -> Response {
        raw_json(self.status, &StatusBody { msg: &self.message })
    }
}

/// Two-field status reply with the body
/// `{"status":"<reason-phrase>","msg":"<message>"}`.
///
/// The `status` field carries the canonical reason phrase for the code, or
/// an empty string when the code has none. Kept for consumers that still
/// depend on the old shape; new code should return [`JsonStatus`].
#[deprecated(note = "use JsonStatus instead")]
#[derive(Debug)]
pub struct LegacyStatus {
    pub status: StatusCode,
    pub message: String,
}

#[allow(deprecated)]
impl LegacyStatus {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

#[allow(deprecated)]
impl IntoResponse for LegacyStatus {
    fn into_response(self) -> Response {
        let reason = self.status.canonical_reason().unwrap_or_default();
        raw_json(
            self.status,
            &LegacyStatusBody {
                status: reason,
                msg: &self.message,
            },
        )
    }
}

fn raw_json<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let bytes = match serde_json::to_vec(body) {
        Ok(b) => b,
        Err(err) => {
            error!("Error serializing response body: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (status, Body::from(bytes)).into_response()
}
