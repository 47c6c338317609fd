//! Donation request collection.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lifedrop_core::{DomainError, RequestId};

use crate::error::StoreError;

/// Lifecycle status of a donation request. Only `pending` requests are
/// visible on the public listing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    Inprogress,
    Done,
    Canceled,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Inprogress => "inprogress",
            Self::Done => "done",
            Self::Canceled => "canceled",
        }
    }
}

impl FromStr for DonationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "inprogress" => Ok(Self::Inprogress),
            "done" => Ok(Self::Done),
            "canceled" => Ok(Self::Canceled),
            other => Err(DomainError::validation(format!(
                "unknown donation status: {other}"
            ))),
        }
    }
}

/// Mutable fields of a donation request. Used both on create and on the
/// full-document replace (`PUT /update-donation-request/:id`).
///
/// Date and time are carried as client-formatted strings; the platform never
/// computes with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRequestFields {
    pub requester_email: String,
    pub requester_name: String,
    pub recipient_name: String,
    pub recipient_district_id: Option<i64>,
    pub recipient_upazila_id: Option<i64>,
    pub hospital_name: String,
    pub full_address: String,
    pub blood_group: String,
    pub donation_date: String,
    pub donation_time: String,
    pub request_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRequestRecord {
    pub id: RequestId,
    #[serde(flatten)]
    pub fields: DonationRequestFields,
    pub donation_status: DonationStatus,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait DonationRequestStore: Send + Sync {
    async fn create(
        &self,
        fields: DonationRequestFields,
        status: DonationStatus,
    ) -> Result<DonationRequestRecord, StoreError>;

    /// All requests owned by the given requester email.
    async fn list_by_requester(&self, email: &str)
        -> Result<Vec<DonationRequestRecord>, StoreError>;

    /// Unrestricted listing (authenticated callers only at the HTTP layer).
    async fn list_all(&self) -> Result<Vec<DonationRequestRecord>, StoreError>;

    /// Public listing: pending requests only.
    async fn list_public_pending(&self) -> Result<Vec<DonationRequestRecord>, StoreError>;

    async fn get_by_id(&self, id: RequestId) -> Result<DonationRequestRecord, StoreError>;

    async fn update_status(&self, id: RequestId, status: DonationStatus)
        -> Result<(), StoreError>;

    /// Full-document field replace; status and created_at are preserved.
    async fn replace_fields(
        &self,
        id: RequestId,
        fields: DonationRequestFields,
    ) -> Result<(), StoreError>;

    async fn delete_by_id(&self, id: RequestId) -> Result<(), StoreError>;
}

/// In-memory donation request store for dev/test.
#[derive(Debug, Default)]
pub struct InMemoryDonationRequestStore {
    inner: RwLock<HashMap<RequestId, DonationRequestRecord>>,
}

impl InMemoryDonationRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<RequestId, DonationRequestRecord>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::backend("donation store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<RequestId, DonationRequestRecord>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::backend("donation store lock poisoned"))
    }
}

#[async_trait]
impl DonationRequestStore for InMemoryDonationRequestStore {
    async fn create(
        &self,
        fields: DonationRequestFields,
        status: DonationStatus,
    ) -> Result<DonationRequestRecord, StoreError> {
        let record = DonationRequestRecord {
            id: RequestId::new(),
            fields,
            donation_status: status,
            created_at: Utc::now(),
        };
        self.write()?.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_by_requester(
        &self,
        email: &str,
    ) -> Result<Vec<DonationRequestRecord>, StoreError> {
        Ok(self
            .read()?
            .values()
            .filter(|r| r.fields.requester_email == email)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<DonationRequestRecord>, StoreError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn list_public_pending(&self) -> Result<Vec<DonationRequestRecord>, StoreError> {
        Ok(self
            .read()?
            .values()
            .filter(|r| r.donation_status == DonationStatus::Pending)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: RequestId) -> Result<DonationRequestRecord, StoreError> {
        self.read()?.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update_status(
        &self,
        id: RequestId,
        status: DonationStatus,
    ) -> Result<(), StoreError> {
        let mut map = self.write()?;
        let record = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.donation_status = status;
        Ok(())
    }

    async fn replace_fields(
        &self,
        id: RequestId,
        fields: DonationRequestFields,
    ) -> Result<(), StoreError> {
        let mut map = self.write()?;
        let record = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.fields = fields;
        Ok(())
    }

    async fn delete_by_id(&self, id: RequestId) -> Result<(), StoreError> {
        self.write()?.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(email: &str) -> DonationRequestFields {
        DonationRequestFields {
            requester_email: email.to_string(),
            requester_name: "Requester".to_string(),
            recipient_name: "Patient".to_string(),
            recipient_district_id: Some(1),
            recipient_upazila_id: Some(3),
            hospital_name: "General Hospital".to_string(),
            full_address: "Ward 4".to_string(),
            blood_group: "O-".to_string(),
            donation_date: "2026-09-01".to_string(),
            donation_time: "10:30".to_string(),
            request_message: "urgent".to_string(),
        }
    }

    #[tokio::test]
    async fn public_listing_only_ever_shows_pending() {
        let store = InMemoryDonationRequestStore::new();
        let pending = store
            .create(fields("a@x.com"), DonationStatus::Pending)
            .await
            .unwrap();
        let done = store
            .create(fields("b@x.com"), DonationStatus::Done)
            .await
            .unwrap();

        let public = store.list_public_pending().await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, pending.id);

        // Flipping the pending one away removes it from the public view.
        store
            .update_status(pending.id, DonationStatus::Inprogress)
            .await
            .unwrap();
        assert!(store.list_public_pending().await.unwrap().is_empty());

        // Everything is still visible on the unrestricted listing.
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|r| r.id == done.id));
    }

    #[tokio::test]
    async fn list_by_requester_scopes_to_owner() {
        let store = InMemoryDonationRequestStore::new();
        store.create(fields("a@x.com"), DonationStatus::Pending).await.unwrap();
        store.create(fields("a@x.com"), DonationStatus::Pending).await.unwrap();
        store.create(fields("b@x.com"), DonationStatus::Pending).await.unwrap();

        assert_eq!(store.list_by_requester("a@x.com").await.unwrap().len(), 2);
        assert_eq!(store.list_by_requester("b@x.com").await.unwrap().len(), 1);
        assert!(store.list_by_requester("c@x.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_fields_preserves_status_and_created_at() {
        let store = InMemoryDonationRequestStore::new();
        let rec = store
            .create(fields("a@x.com"), DonationStatus::Inprogress)
            .await
            .unwrap();

        let mut new_fields = fields("a@x.com");
        new_fields.hospital_name = "District Clinic".to_string();
        store.replace_fields(rec.id, new_fields).await.unwrap();

        let after = store.get_by_id(rec.id).await.unwrap();
        assert_eq!(after.fields.hospital_name, "District Clinic");
        assert_eq!(after.donation_status, DonationStatus::Inprogress);
        assert_eq!(after.created_at, rec.created_at);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_record() {
        let store = InMemoryDonationRequestStore::new();
        let rec = store.create(fields("a@x.com"), DonationStatus::Pending).await.unwrap();

        store.delete_by_id(rec.id).await.unwrap();
        assert!(matches!(store.get_by_id(rec.id).await, Err(StoreError::NotFound)));
        assert!(matches!(store.delete_by_id(rec.id).await, Err(StoreError::NotFound)));
    }
}
