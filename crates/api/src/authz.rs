//! API-side role gate for admin-only routes.
//!
//! This enforces the role check at the handler boundary, after the bearer
//! middleware has verified the caller's identity.

use axum::http::StatusCode;
use axum::response::Response;

use lifedrop_store::{StoreError, UserStore};

use crate::app::errors;
use crate::context::CallerContext;

/// Allow continuation only for callers whose stored role is `admin`.
///
/// A caller with no user record is treated as not-authorized, the same as a
/// non-admin role; the record is never assumed to exist.
pub async fn require_admin(users: &dyn UserStore, caller: &CallerContext) -> Result<(), Response> {
    match users.get_by_email(caller.email()).await {
        Ok(user) if user.role.is_admin() => Ok(()),
        Ok(_) | Err(StoreError::NotFound) => Err(errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "admin role required",
        )),
        Err(e) => Err(errors::store_error_to_response(e)),
    }
}
