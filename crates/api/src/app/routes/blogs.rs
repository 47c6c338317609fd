use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use lifedrop_core::BlogId;
use lifedrop_store::NewBlog;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::CallerContext;

/// POST /add-blog: no token required; new posts always start as drafts.
pub async fn add_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Json(blog): Json<NewBlog>,
) -> axum::response::Response {
    match services.blogs.create(blog).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /get-blogs: all posts, any authenticated caller.
pub async fn get_blogs(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.blogs.list_all().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /get-blogs-public: published posts only, no token.
pub async fn get_blogs_public(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.blogs.list_public_published().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /blog-details/:id
pub async fn blog_details(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BlogId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid blog id"),
    };

    match services.blogs.get_by_id(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// PATCH /update-blog-status: admin-only publish/unpublish.
pub async fn update_blog_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::UpdateBlogStatusRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&*services.users, &caller).await {
        return resp;
    }

    let id: BlogId = match body.id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid blog id"),
    };

    match services.blogs.set_status(id, body.status).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": id.to_string(),
                "status": body.status,
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// DELETE /delete-blog/:id
pub async fn delete_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BlogId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid blog id"),
    };

    match services.blogs.delete_by_id(id).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "deleted": true }))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
