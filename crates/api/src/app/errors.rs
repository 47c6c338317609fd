use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use lifedrop_store::StoreError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Invalid(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_argument", msg),
        StoreError::Backend(msg) => {
            tracing::error!("store backend failure: {msg}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", "internal error")
        }
    }
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
