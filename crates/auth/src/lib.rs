//! `lifedrop-auth`: pure authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how
//! to turn a bearer token into verified identity claims, nothing else.

pub mod claims;
pub mod roles;
pub mod verifier;

pub use claims::{validate_claims, IdentityClaims, TokenValidationError};
pub use roles::Role;
pub use verifier::{Hs256TokenVerifier, TokenError, TokenVerifier};
