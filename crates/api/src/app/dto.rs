//! Request DTOs and query parameter types.
//!
//! Record identifiers arrive as opaque strings and are parsed in the
//! handlers, so a malformed id becomes a 400 before any store call.

use serde::Deserialize;

use lifedrop_auth::Role;
use lifedrop_store::{BlogStatus, DonationRequestFields, DonationStatus, UserStatus};

#[derive(Debug, Deserialize)]
pub struct CreateDonationRequestBody {
    #[serde(flatten)]
    pub fields: DonationRequestFields,
    /// Defaults to `pending` when omitted.
    pub donation_status: Option<DonationStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub email: String,
    pub status: UserStatus,
}

#[derive(Debug, Deserialize)]
pub struct DonationStatusRequest {
    pub id: String,
    pub donation_status: DonationStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlogStatusRequest {
    pub id: String,
    pub status: BlogStatus,
}

#[derive(Debug, Deserialize)]
pub struct AddDonorRequest {
    pub donation_id: String,
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FindDonorQuery {
    pub donation_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpazilaQuery {
    pub district_id: Option<i64>,
}
