use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use platformd_infra::StoreError;

/// A backing-engine failure has no recovery path at this layer; report it as
/// a 500 and keep the detail in the log rather than the response body.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!("platform store failure: {err}");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store_error",
        "platform store unavailable",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
