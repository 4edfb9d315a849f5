//! Response builders shared by the handlers.

use axum::{
    Json,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::errors::{ErrorKind, RelayError};

// ============================================================================
// /api/aigc envelope
// ============================================================================

/// 200 with `success: true` merged into `fields`.
#[must_use]
pub fn aigc_ok(mut fields: Value) -> Response {
    if let Some(map) = fields.as_object_mut() {
        map.insert("success".to_string(), Value::Bool(true));
    }
    (StatusCode::OK, Json(fields)).into_response()
}

/// Maps a failure to `{success: false, error, details}`.
///
/// Input errors carry only their own message; vendor and internal errors
/// are prefixed with `context`.
#[must_use]
pub fn aigc_failure(context: &str, err: &RelayError) -> Response {
    let kind = err.kind();
    let message = if err.is_client_error() {
        warn!(kind = kind.as_str(), "Rejected request: {}", err);
        err.to_string()
    } else {
        error!(kind = kind.as_str(), "{}: {}", context, err);
        format!("{context}: {err}")
    };
    aigc_error(kind, &message)
}

#[must_use]
pub fn aigc_error(kind: ErrorKind, message: &str) -> Response {
    (
        kind.status(),
        Json(json!({
            "success": false,
            "error": message,
            "details": kind.as_str(),
        })),
    )
        .into_response()
}

// ============================================================================
// /cet6 envelope
// ============================================================================

/// 200 with an already-serialized JSON document.
#[must_use]
pub fn raw_json(body: String) -> Response {
    (StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response()
}

#[must_use]
pub fn cet6_failure(context: &str, err: &RelayError) -> Response {
    let kind = err.kind();
    if err.is_client_error() {
        warn!(kind = kind.as_str(), "Rejected CET6 request: {}", err);
    } else {
        error!(kind = kind.as_str(), "{}: {}", context, err);
    }
    cet6_error(kind, &format!("{context}：{err}"))
}

#[must_use]
pub fn cet6_error(kind: ErrorKind, message: &str) -> Response {
    (
        kind.status(),
        Json(json!({ "error": message, "kind": kind.as_str() })),
    )
        .into_response()
}

// ============================================================================
// Fallback
// ============================================================================

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "route not found",
            "details": "not_found",
        })),
    )
        .into_response()
}
