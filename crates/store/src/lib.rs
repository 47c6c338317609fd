//! `lifedrop-store`: persistent collections behind per-collection traits.
//!
//! Each collection owns its records exclusively; there are no cross-store
//! transactions. Every trait has two implementations: an in-memory one
//! (dev/test) and a Postgres one (`postgres` module, sqlx-backed). Stores are
//! constructed once at startup and injected into the router as `Arc`-shared
//! trait objects.
//!
//! Cross-references (`DonorInfoRecord::donation_id`,
//! `Upazila::district_id`) are logical foreign keys; referential integrity is
//! not enforced here.

pub mod blogs;
pub mod donations;
pub mod donors;
pub mod error;
pub mod postgres;
pub mod regions;
pub mod users;

pub use blogs::{BlogRecord, BlogStatus, BlogStore, InMemoryBlogStore, NewBlog};
pub use donations::{
    DonationRequestFields, DonationRequestRecord, DonationRequestStore, DonationStatus,
    InMemoryDonationRequestStore,
};
pub use donors::{DonorInfoRecord, DonorInfoStore, InMemoryDonorInfoStore, NewDonorInfo};
pub use error::StoreError;
pub use regions::{District, InMemoryRegionStore, RegionStore, Upazila};
pub use users::{
    InMemoryUserStore, LoginOutcome, NewUser, UserRecord, UserStatus, UserStore, UserUpdate,
};
