//! Route tree. Paths are flat (no prefix nesting); the split below is by
//! auth tier, matching the platform's route table.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

pub mod blogs;
pub mod donations;
pub mod donors;
pub mod regions;
pub mod system;
pub mod users;

/// Routes that require no token.
pub fn public_router() -> Router {
    Router::new()
        .route("/add-user", post(users::add_user))
        .route("/create-donation-request", post(donations::create_donation_request))
        .route("/all-donation-requests-public", get(donations::all_donation_requests_public))
        .route("/delete-request/:id", delete(donations::delete_request))
        .route("/add-donor", post(donors::add_donor))
        .route("/add-blog", post(blogs::add_blog))
        .route("/get-blogs-public", get(blogs::get_blogs_public))
        .route("/districts", get(regions::districts))
        .route("/upazilas", get(regions::upazilas))
}

/// Routes behind the bearer middleware. Admin-only routes additionally pass
/// through the role gate inside their handlers.
pub fn protected_router() -> Router {
    Router::new()
        .route("/get-user-role", get(users::get_user_role))
        .route("/get-user", get(users::get_user))
        .route("/update-user/:id", patch(users::update_user))
        .route("/get-users", get(users::get_users))
        .route("/update-role", patch(users::update_role))
        .route("/update-status", patch(users::update_status))
        .route("/my-donation-request", get(donations::my_donation_request))
        .route("/all-donation-requests", get(donations::all_donation_requests))
        .route("/details/:id", get(donations::details))
        .route("/donation-status", patch(donations::donation_status))
        .route("/update-donation-request/:id", put(donations::update_donation_request))
        .route("/find-donor", get(donors::find_donor))
        .route("/get-blogs", get(blogs::get_blogs))
        .route("/blog-details/:id", get(blogs::blog_details))
        .route("/update-blog-status", patch(blogs::update_blog_status))
        .route("/delete-blog/:id", delete(blogs::delete_blog))
}
