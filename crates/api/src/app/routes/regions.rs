use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// GET /districts: full static list, no token.
pub async fn districts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.regions.list_districts().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /upazilas?district_id=...: optionally filtered by district, no token.
pub async fn upazilas(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::UpazilaQuery>,
) -> axum::response::Response {
    match services.regions.list_upazilas(query.district_id).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
