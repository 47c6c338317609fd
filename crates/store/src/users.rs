//! User collection: one record per email, carrying role and status.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lifedrop_auth::Role;
use lifedrop_core::{DomainError, UserId};

use crate::error::StoreError;

/// Account status. Blocked users keep their record but are flagged.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Blocked,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Blocked => "blocked",
        }
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            other => Err(DomainError::validation(format!("unknown user status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub blood_group: Option<String>,
    pub district_id: Option<i64>,
    pub upazila_id: Option<i64>,
    pub role: Role,
    pub status: UserStatus,
    pub login_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Profile supplied on login. Role and status are never caller-controlled:
/// first login always lands as an active donor.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub blood_group: Option<String>,
    pub district_id: Option<i64>,
    pub upazila_id: Option<i64>,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub blood_group: Option<String>,
    pub district_id: Option<i64>,
    pub upazila_id: Option<i64>,
}

/// Result of the atomic upsert-on-login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// First login: a fresh record was inserted with `login_count == 1`.
    Created(UserRecord),
    /// Repeat login: the existing record's counter was incremented.
    AlreadyRegistered { login_count: i64 },
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Atomic find-or-insert with conditional increment. There is no
    /// check-then-act window: both implementations do this in one step.
    async fn upsert_on_login(&self, profile: NewUser) -> Result<LoginOutcome, StoreError>;

    async fn get_by_email(&self, email: &str) -> Result<UserRecord, StoreError>;

    /// Partial-projection read of the status field only.
    async fn status_of(&self, email: &str) -> Result<UserStatus, StoreError>;

    /// All users except the given email (admin listing excludes the caller).
    async fn list_excluding(&self, email: &str) -> Result<Vec<UserRecord>, StoreError>;

    async fn update_by_id(&self, id: UserId, update: UserUpdate) -> Result<UserRecord, StoreError>;

    async fn set_role(&self, email: &str, role: Role) -> Result<(), StoreError>;

    async fn set_status(&self, email: &str, status: UserStatus) -> Result<(), StoreError>;
}

/// In-memory user store for dev/test.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn upsert_on_login(&self, profile: NewUser) -> Result<LoginOutcome, StoreError> {
        // Single write-lock critical section: the exists-check and the
        // increment/insert cannot interleave with another login.
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("user store lock poisoned"))?;

        if let Some(existing) = map.values_mut().find(|u| u.email == profile.email) {
            existing.login_count += 1;
            return Ok(LoginOutcome::AlreadyRegistered {
                login_count: existing.login_count,
            });
        }

        let record = UserRecord {
            id: UserId::new(),
            email: profile.email,
            name: profile.name,
            avatar_url: profile.avatar_url,
            blood_group: profile.blood_group,
            district_id: profile.district_id,
            upazila_id: profile.upazila_id,
            role: Role::donor(),
            status: UserStatus::Active,
            login_count: 1,
            created_at: Utc::now(),
        };
        map.insert(record.id, record.clone());
        Ok(LoginOutcome::Created(record))
    }

    async fn get_by_email(&self, email: &str) -> Result<UserRecord, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::backend("user store lock poisoned"))?;
        map.values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn status_of(&self, email: &str) -> Result<UserStatus, StoreError> {
        self.get_by_email(email).await.map(|u| u.status)
    }

    async fn list_excluding(&self, email: &str) -> Result<Vec<UserRecord>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::backend("user store lock poisoned"))?;
        Ok(map.values().filter(|u| u.email != email).cloned().collect())
    }

    async fn update_by_id(&self, id: UserId, update: UserUpdate) -> Result<UserRecord, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("user store lock poisoned"))?;
        let record = map.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(avatar_url) = update.avatar_url {
            record.avatar_url = Some(avatar_url);
        }
        if let Some(blood_group) = update.blood_group {
            record.blood_group = Some(blood_group);
        }
        if let Some(district_id) = update.district_id {
            record.district_id = Some(district_id);
        }
        if let Some(upazila_id) = update.upazila_id {
            record.upazila_id = Some(upazila_id);
        }

        Ok(record.clone())
    }

    async fn set_role(&self, email: &str, role: Role) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("user store lock poisoned"))?;
        let record = map
            .values_mut()
            .find(|u| u.email == email)
            .ok_or(StoreError::NotFound)?;
        record.role = role;
        Ok(())
    }

    async fn set_status(&self, email: &str, status: UserStatus) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("user store lock poisoned"))?;
        let record = map
            .values_mut()
            .find(|u| u.email == email)
            .ok_or(StoreError::NotFound)?;
        record.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Test Donor".to_string(),
            avatar_url: None,
            blood_group: Some("B+".to_string()),
            district_id: Some(1),
            upazila_id: None,
        }
    }

    #[tokio::test]
    async fn first_login_creates_record_with_count_one() {
        let store = InMemoryUserStore::new();
        match store.upsert_on_login(profile("a@x.com")).await.unwrap() {
            LoginOutcome::Created(rec) => {
                assert_eq!(rec.login_count, 1);
                assert_eq!(rec.role, Role::donor());
                assert_eq!(rec.status, UserStatus::Active);
            }
            other => panic!("expected Created, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn repeat_login_increments_and_keeps_one_record() {
        let store = InMemoryUserStore::new();
        store.upsert_on_login(profile("a@x.com")).await.unwrap();

        match store.upsert_on_login(profile("a@x.com")).await.unwrap() {
            LoginOutcome::AlreadyRegistered { login_count } => assert_eq!(login_count, 2),
            other => panic!("expected AlreadyRegistered, got {other:?}"),
        }

        // Exactly one record survives.
        assert_eq!(store.list_excluding("nobody@x.com").await.unwrap().len(), 1);
        assert_eq!(store.get_by_email("a@x.com").await.unwrap().login_count, 2);
    }

    #[tokio::test]
    async fn list_excluding_omits_the_given_email() {
        let store = InMemoryUserStore::new();
        store.upsert_on_login(profile("a@x.com")).await.unwrap();
        store.upsert_on_login(profile("b@x.com")).await.unwrap();

        let others = store.list_excluding("a@x.com").await.unwrap();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].email, "b@x.com");
    }

    #[tokio::test]
    async fn partial_update_merges_fields() {
        let store = InMemoryUserStore::new();
        let rec = match store.upsert_on_login(profile("a@x.com")).await.unwrap() {
            LoginOutcome::Created(rec) => rec,
            other => panic!("expected Created, got {other:?}"),
        };

        let updated = store
            .update_by_id(
                rec.id,
                UserUpdate {
                    name: Some("Renamed".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.blood_group.as_deref(), Some("B+"));
    }

    #[tokio::test]
    async fn set_role_and_status_require_existing_record() {
        let store = InMemoryUserStore::new();
        assert!(matches!(
            store.set_role("ghost@x.com", Role::admin()).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.set_status("ghost@x.com", UserStatus::Blocked).await,
            Err(StoreError::NotFound)
        ));

        store.upsert_on_login(profile("a@x.com")).await.unwrap();
        store.set_role("a@x.com", Role::admin()).await.unwrap();
        store.set_status("a@x.com", UserStatus::Blocked).await.unwrap();

        let rec = store.get_by_email("a@x.com").await.unwrap();
        assert!(rec.role.is_admin());
        assert_eq!(rec.status, UserStatus::Blocked);
        assert_eq!(store.status_of("a@x.com").await.unwrap(), UserStatus::Blocked);
    }
}
