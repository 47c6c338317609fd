//! Static region reference data: districts and their upazilas.
//!
//! Read-only. The in-memory store carries a small seed slice of the dataset
//! for dev/test; persistent deployments load the full reference tables
//! out-of-band.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: i64,
    pub name: String,
    pub bn_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upazila {
    pub id: i64,
    /// Logical foreign key to [`District::id`].
    pub district_id: i64,
    pub name: String,
    pub bn_name: Option<String>,
}

#[async_trait]
pub trait RegionStore: Send + Sync {
    async fn list_districts(&self) -> Result<Vec<District>, StoreError>;

    /// Upazilas, filtered by district when a district id is given.
    async fn list_upazilas(&self, district_id: Option<i64>) -> Result<Vec<Upazila>, StoreError>;
}

/// In-memory region store, seeded with a slice of the reference dataset.
#[derive(Debug)]
pub struct InMemoryRegionStore {
    districts: Vec<District>,
    upazilas: Vec<Upazila>,
}

impl InMemoryRegionStore {
    pub fn new(districts: Vec<District>, upazilas: Vec<Upazila>) -> Self {
        Self { districts, upazilas }
    }

    /// Dev/test seed: a handful of districts with their upazilas.
    pub fn seeded() -> Self {
        let districts = vec![
            District { id: 1, name: "Dhaka".into(), bn_name: Some("ঢাকা".into()) },
            District { id: 2, name: "Chattogram".into(), bn_name: Some("চট্টগ্রাম".into()) },
            District { id: 3, name: "Sylhet".into(), bn_name: Some("সিলেট".into()) },
        ];
        let upazilas = vec![
            Upazila { id: 1, district_id: 1, name: "Savar".into(), bn_name: Some("সাভার".into()) },
            Upazila { id: 2, district_id: 1, name: "Dhamrai".into(), bn_name: Some("ধামরাই".into()) },
            Upazila { id: 3, district_id: 1, name: "Keraniganj".into(), bn_name: Some("কেরানীগঞ্জ".into()) },
            Upazila { id: 4, district_id: 2, name: "Patiya".into(), bn_name: Some("পটিয়া".into()) },
            Upazila { id: 5, district_id: 2, name: "Sandwip".into(), bn_name: Some("সন্দ্বীপ".into()) },
            Upazila { id: 6, district_id: 3, name: "Beanibazar".into(), bn_name: Some("বিয়ানীবাজার".into()) },
        ];
        Self::new(districts, upazilas)
    }
}

#[async_trait]
impl RegionStore for InMemoryRegionStore {
    async fn list_districts(&self) -> Result<Vec<District>, StoreError> {
        Ok(self.districts.clone())
    }

    async fn list_upazilas(&self, district_id: Option<i64>) -> Result<Vec<Upazila>, StoreError> {
        Ok(match district_id {
            Some(id) => self
                .upazilas
                .iter()
                .filter(|u| u.district_id == id)
                .cloned()
                .collect(),
            None => self.upazilas.clone(),
        })
    }
}
