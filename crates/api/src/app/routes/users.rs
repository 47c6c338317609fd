use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use lifedrop_core::UserId;
use lifedrop_store::{LoginOutcome, NewUser, UserUpdate};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::CallerContext;

/// POST /add-user: idempotent upsert-on-login, no token required.
pub async fn add_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(profile): Json<NewUser>,
) -> axum::response::Response {
    match services.users.upsert_on_login(profile).await {
        Ok(LoginOutcome::Created(record)) => {
            tracing::info!(email = %record.email, "user registered");
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Ok(LoginOutcome::AlreadyRegistered { login_count }) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "msg": "user already exists",
                "login_count": login_count,
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /get-user-role: role and status of the caller.
pub async fn get_user_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
) -> axum::response::Response {
    match services.users.get_by_email(caller.email()).await {
        Ok(user) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "role": user.role,
                "status": user.status,
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /get-user: full record of the caller.
pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
) -> axum::response::Response {
    match services.users.get_by_email(caller.email()).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// PATCH /update-user/:id: partial profile update.
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    match services.users.update_by_id(id, update).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /get-users: admin listing, everyone except the caller.
pub async fn get_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&*services.users, &caller).await {
        return resp;
    }

    match services.users.list_excluding(caller.email()).await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// PATCH /update-role: admin-only role change.
pub async fn update_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::UpdateRoleRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&*services.users, &caller).await {
        return resp;
    }

    match services.users.set_role(&body.email, body.role).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "email": body.email }))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// PATCH /update-status: admin-only status change.
pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::UpdateStatusRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&*services.users, &caller).await {
        return resp;
    }

    match services.users.set_status(&body.email, body.status).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "email": body.email }))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
