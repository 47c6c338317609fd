use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role stored per user (e.g. "admin", "donor", "volunteer").
///
/// Roles are intentionally opaque strings at this layer; the only role with
/// special meaning to the platform is `admin`, which gates privileged routes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Default role assigned on first login.
    pub fn donor() -> Self {
        Self(Cow::Borrowed("donor"))
    }

    pub fn admin() -> Self {
        Self(Cow::Borrowed("admin"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        self.0 == "admin"
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_is_admin() {
        assert!(Role::admin().is_admin());
        assert!(!Role::donor().is_admin());
        assert!(!Role::new("volunteer").is_admin());
    }
}
