use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use lifedrop_core::RequestId;
use lifedrop_store::DonationStatus;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::CallerContext;

/// POST /create-donation-request: no token required.
pub async fn create_donation_request(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateDonationRequestBody>,
) -> axum::response::Response {
    let status = body.donation_status.unwrap_or(DonationStatus::Pending);

    match services.donations.create(body.fields, status).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /my-donation-request: caller's own requests.
pub async fn my_donation_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
) -> axum::response::Response {
    match services.donations.list_by_requester(caller.email()).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /all-donation-requests: any authenticated caller (not admin-gated).
pub async fn all_donation_requests(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.donations.list_all().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /all-donation-requests-public: pending requests only, no token.
pub async fn all_donation_requests_public(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.donations.list_public_pending().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /details/:id
pub async fn details(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RequestId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid request id")
        }
    };

    match services.donations.get_by_id(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// PATCH /donation-status: partial status update.
pub async fn donation_status(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::DonationStatusRequest>,
) -> axum::response::Response {
    let id: RequestId = match body.id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid request id")
        }
    };

    match services.donations.update_status(id, body.donation_status).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": id.to_string(),
                "donation_status": body.donation_status,
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// PUT /update-donation-request/:id: full field replace.
pub async fn update_donation_request(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(fields): Json<lifedrop_store::DonationRequestFields>,
) -> axum::response::Response {
    let id: RequestId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid request id")
        }
    };

    match services.donations.replace_fields(id, fields).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "id": id.to_string() }))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// DELETE /delete-request/:id: no token required.
pub async fn delete_request(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RequestId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid request id")
        }
    };

    match services.donations.delete_by_id(id).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "deleted": true }))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
