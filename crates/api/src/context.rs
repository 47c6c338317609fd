/// Caller context for a request (verified identity).
///
/// Inserted by the auth middleware; present on all bearer-gated routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    email: String,
    sub: String,
}

impl CallerContext {
    pub fn new(email: String, sub: String) -> Self {
        Self { email, sub }
    }

    /// Verified email of the caller; the key every store lookup uses.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Identity-provider subject id.
    pub fn sub(&self) -> &str {
        &self.sub
    }
}
