//! Donor response collection, keyed by the donation request it answers.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lifedrop_core::{DonorInfoId, RequestId};

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorInfoRecord {
    pub id: DonorInfoId,
    /// Logical foreign key to the donation request being answered.
    pub donation_id: RequestId,
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDonorInfo {
    pub donation_id: RequestId,
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: Option<String>,
}

#[async_trait]
pub trait DonorInfoStore: Send + Sync {
    async fn create(&self, info: NewDonorInfo) -> Result<DonorInfoRecord, StoreError>;

    /// All donor responses for the given donation request.
    async fn find_by_donation_id(
        &self,
        donation_id: RequestId,
    ) -> Result<Vec<DonorInfoRecord>, StoreError>;
}

/// In-memory donor info store for dev/test.
#[derive(Debug, Default)]
pub struct InMemoryDonorInfoStore {
    inner: RwLock<Vec<DonorInfoRecord>>,
}

impl InMemoryDonorInfoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DonorInfoStore for InMemoryDonorInfoStore {
    async fn create(&self, info: NewDonorInfo) -> Result<DonorInfoRecord, StoreError> {
        let record = DonorInfoRecord {
            id: DonorInfoId::new(),
            donation_id: info.donation_id,
            donor_name: info.donor_name,
            donor_email: info.donor_email,
            donor_phone: info.donor_phone,
            created_at: Utc::now(),
        };
        self.inner
            .write()
            .map_err(|_| StoreError::backend("donor store lock poisoned"))?
            .push(record.clone());
        Ok(record)
    }

    async fn find_by_donation_id(
        &self,
        donation_id: RequestId,
    ) -> Result<Vec<DonorInfoRecord>, StoreError> {
        Ok(self
            .inner
            .read()
            .map_err(|_| StoreError::backend("donor store lock poisoned"))?
            .iter()
            .filter(|d| d.donation_id == donation_id)
            .cloned()
            .collect())
    }
}
