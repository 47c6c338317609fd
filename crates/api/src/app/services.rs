//! Store wiring: in-memory for dev/test, Postgres when configured.

use std::sync::Arc;

use sqlx::PgPool;

use lifedrop_store::postgres::{
    PgBlogStore, PgDonationRequestStore, PgDonorInfoStore, PgRegionStore, PgUserStore,
};
use lifedrop_store::{
    BlogStore, DonationRequestStore, DonorInfoStore, InMemoryBlogStore,
    InMemoryDonationRequestStore, InMemoryDonorInfoStore, InMemoryRegionStore, InMemoryUserStore,
    RegionStore, UserStore,
};

/// Explicitly constructed stores, injected into the router and shared for the
/// lifetime of the process. No global mutable state.
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<dyn UserStore>,
    pub donations: Arc<dyn DonationRequestStore>,
    pub donors: Arc<dyn DonorInfoStore>,
    pub blogs: Arc<dyn BlogStore>,
    pub regions: Arc<dyn RegionStore>,
}

pub async fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        return build_persistent_services().await;
    }

    build_in_memory_services()
}

pub fn build_in_memory_services() -> AppServices {
    AppServices {
        users: Arc::new(InMemoryUserStore::new()),
        donations: Arc::new(InMemoryDonationRequestStore::new()),
        donors: Arc::new(InMemoryDonorInfoStore::new()),
        blogs: Arc::new(InMemoryBlogStore::new()),
        regions: Arc::new(InMemoryRegionStore::seeded()),
    }
}

async fn build_persistent_services() -> AppServices {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("failed to connect to Postgres");

    AppServices {
        users: Arc::new(PgUserStore::new(pool.clone())),
        donations: Arc::new(PgDonationRequestStore::new(pool.clone())),
        donors: Arc::new(PgDonorInfoStore::new(pool.clone())),
        blogs: Arc::new(PgBlogStore::new(pool.clone())),
        regions: Arc::new(PgRegionStore::new(pool)),
    }
}
