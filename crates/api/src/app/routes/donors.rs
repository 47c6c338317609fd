use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use lifedrop_core::RequestId;
use lifedrop_store::NewDonorInfo;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// POST /add-donor: a donor responding to a request, no token required.
pub async fn add_donor(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddDonorRequest>,
) -> axum::response::Response {
    let donation_id: RequestId = match body.donation_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid donation id")
        }
    };

    let info = NewDonorInfo {
        donation_id,
        donor_name: body.donor_name,
        donor_email: body.donor_email,
        donor_phone: body.donor_phone,
    };

    match services.donors.create(info).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /find-donor?donation_id=...: donor responses for a request.
pub async fn find_donor(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::FindDonorQuery>,
) -> axum::response::Response {
    let donation_id: RequestId = match query.donation_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid donation id")
        }
    };

    match services.donors.find_by_donation_id(donation_id).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
