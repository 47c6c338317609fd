//! Postgres-backed store implementations.
//!
//! All operations are single statements against the sqlx connection pool;
//! there are no explicit transactions. The upsert-on-login is one
//! `INSERT ... ON CONFLICT ... DO UPDATE ... RETURNING` statement, so the
//! exists-check and the increment cannot interleave.
//!
//! Expected schema lives in `crates/store/schema.sql`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use lifedrop_auth::Role;
use lifedrop_core::{BlogId, DonorInfoId, RequestId, UserId};

use crate::blogs::{BlogRecord, BlogStatus, BlogStore, NewBlog};
use crate::donations::{
    DonationRequestFields, DonationRequestRecord, DonationRequestStore, DonationStatus,
};
use crate::donors::{DonorInfoRecord, DonorInfoStore, NewDonorInfo};
use crate::error::StoreError;
use crate::regions::{District, RegionStore, Upazila};
use crate::users::{LoginOutcome, NewUser, UserRecord, UserStatus, UserStore, UserUpdate};

fn parse_status<T: std::str::FromStr<Err = lifedrop_core::DomainError>>(
    raw: String,
) -> Result<T, StoreError> {
    raw.parse().map_err(|e: lifedrop_core::DomainError| StoreError::backend(e.to_string()))
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, email, name, avatar_url, blood_group, district_id, upazila_id, \
                            role, status, login_count, created_at";

fn user_from_row(row: &PgRow) -> Result<UserRecord, StoreError> {
    Ok(UserRecord {
        id: UserId::from_uuid(row.try_get("id")?),
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        avatar_url: row.try_get("avatar_url")?,
        blood_group: row.try_get("blood_group")?,
        district_id: row.try_get("district_id")?,
        upazila_id: row.try_get("upazila_id")?,
        role: Role::from(row.try_get::<String, _>("role")?),
        status: parse_status(row.try_get::<String, _>("status")?)?,
        login_count: row.try_get("login_count")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn upsert_on_login(&self, profile: NewUser) -> Result<LoginOutcome, StoreError> {
        // Single statement: no check-then-act window between the exists-check
        // and the insert/increment. `xmax = 0` distinguishes a fresh insert
        // from a conflict-update.
        let row = sqlx::query(
            "INSERT INTO users \
               (id, email, name, avatar_url, blood_group, district_id, upazila_id, \
                role, status, login_count, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'donor', 'active', 1, now()) \
             ON CONFLICT (email) DO UPDATE SET login_count = users.login_count + 1 \
             RETURNING (xmax = 0) AS inserted, id, email, name, avatar_url, blood_group, \
                       district_id, upazila_id, role, status, login_count, created_at",
        )
        .bind(*UserId::new().as_uuid())
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.avatar_url)
        .bind(&profile.blood_group)
        .bind(profile.district_id)
        .bind(profile.upazila_id)
        .fetch_one(&self.pool)
        .await?;

        let record = user_from_row(&row)?;
        if row.try_get::<bool, _>("inserted")? {
            Ok(LoginOutcome::Created(record))
        } else {
            Ok(LoginOutcome::AlreadyRegistered {
                login_count: record.login_count,
            })
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<UserRecord, StoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        user_from_row(&row)
    }

    async fn status_of(&self, email: &str) -> Result<UserStatus, StoreError> {
        let row = sqlx::query("SELECT status FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        parse_status(row.try_get::<String, _>("status")?)
    }

    async fn list_excluding(&self, email: &str) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email <> $1 ORDER BY created_at"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn update_by_id(&self, id: UserId, update: UserUpdate) -> Result<UserRecord, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE users SET \
               name = COALESCE($2, name), \
               avatar_url = COALESCE($3, avatar_url), \
               blood_group = COALESCE($4, blood_group), \
               district_id = COALESCE($5, district_id), \
               upazila_id = COALESCE($6, upazila_id) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(*id.as_uuid())
        .bind(&update.name)
        .bind(&update.avatar_url)
        .bind(&update.blood_group)
        .bind(update.district_id)
        .bind(update.upazila_id)
        .fetch_one(&self.pool)
        .await?;
        user_from_row(&row)
    }

    async fn set_role(&self, email: &str, role: Role) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE email = $1")
            .bind(email)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn set_status(&self, email: &str, status: UserStatus) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE users SET status = $2 WHERE email = $1")
            .bind(email)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ─── Donation requests ───────────────────────────────────────────────────────

pub struct PgDonationRequestStore {
    pool: PgPool,
}

impl PgDonationRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const DONATION_COLUMNS: &str = "id, requester_email, requester_name, recipient_name, \
                                recipient_district_id, recipient_upazila_id, hospital_name, \
                                full_address, blood_group, donation_date, donation_time, \
                                request_message, donation_status, created_at";

fn donation_from_row(row: &PgRow) -> Result<DonationRequestRecord, StoreError> {
    Ok(DonationRequestRecord {
        id: RequestId::from_uuid(row.try_get("id")?),
        fields: DonationRequestFields {
            requester_email: row.try_get("requester_email")?,
            requester_name: row.try_get("requester_name")?,
            recipient_name: row.try_get("recipient_name")?,
            recipient_district_id: row.try_get("recipient_district_id")?,
            recipient_upazila_id: row.try_get("recipient_upazila_id")?,
            hospital_name: row.try_get("hospital_name")?,
            full_address: row.try_get("full_address")?,
            blood_group: row.try_get("blood_group")?,
            donation_date: row.try_get("donation_date")?,
            donation_time: row.try_get("donation_time")?,
            request_message: row.try_get("request_message")?,
        },
        donation_status: parse_status(row.try_get::<String, _>("donation_status")?)?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl DonationRequestStore for PgDonationRequestStore {
    async fn create(
        &self,
        fields: DonationRequestFields,
        status: DonationStatus,
    ) -> Result<DonationRequestRecord, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO donation_requests \
               (id, requester_email, requester_name, recipient_name, recipient_district_id, \
                recipient_upazila_id, hospital_name, full_address, blood_group, donation_date, \
                donation_time, request_message, donation_status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, now()) \
             RETURNING {DONATION_COLUMNS}"
        ))
        .bind(*RequestId::new().as_uuid())
        .bind(&fields.requester_email)
        .bind(&fields.requester_name)
        .bind(&fields.recipient_name)
        .bind(fields.recipient_district_id)
        .bind(fields.recipient_upazila_id)
        .bind(&fields.hospital_name)
        .bind(&fields.full_address)
        .bind(&fields.blood_group)
        .bind(&fields.donation_date)
        .bind(&fields.donation_time)
        .bind(&fields.request_message)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;
        donation_from_row(&row)
    }

    async fn list_by_requester(
        &self,
        email: &str,
    ) -> Result<Vec<DonationRequestRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {DONATION_COLUMNS} FROM donation_requests \
             WHERE requester_email = $1 ORDER BY created_at DESC"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(donation_from_row).collect()
    }

    async fn list_all(&self) -> Result<Vec<DonationRequestRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {DONATION_COLUMNS} FROM donation_requests ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(donation_from_row).collect()
    }

    async fn list_public_pending(&self) -> Result<Vec<DonationRequestRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {DONATION_COLUMNS} FROM donation_requests \
             WHERE donation_status = 'pending' ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(donation_from_row).collect()
    }

    async fn get_by_id(&self, id: RequestId) -> Result<DonationRequestRecord, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {DONATION_COLUMNS} FROM donation_requests WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_one(&self.pool)
        .await?;
        donation_from_row(&row)
    }

    async fn update_status(
        &self,
        id: RequestId,
        status: DonationStatus,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE donation_requests SET donation_status = $2 WHERE id = $1")
            .bind(*id.as_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn replace_fields(
        &self,
        id: RequestId,
        fields: DonationRequestFields,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE donation_requests SET \
               requester_email = $2, requester_name = $3, recipient_name = $4, \
               recipient_district_id = $5, recipient_upazila_id = $6, hospital_name = $7, \
               full_address = $8, blood_group = $9, donation_date = $10, donation_time = $11, \
               request_message = $12 \
             WHERE id = $1",
        )
        .bind(*id.as_uuid())
        .bind(&fields.requester_email)
        .bind(&fields.requester_name)
        .bind(&fields.recipient_name)
        .bind(fields.recipient_district_id)
        .bind(fields.recipient_upazila_id)
        .bind(&fields.hospital_name)
        .bind(&fields.full_address)
        .bind(&fields.blood_group)
        .bind(&fields.donation_date)
        .bind(&fields.donation_time)
        .bind(&fields.request_message)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: RequestId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM donation_requests WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ─── Donor responses ─────────────────────────────────────────────────────────

pub struct PgDonorInfoStore {
    pool: PgPool,
}

impl PgDonorInfoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn donor_from_row(row: &PgRow) -> Result<DonorInfoRecord, StoreError> {
    Ok(DonorInfoRecord {
        id: DonorInfoId::from_uuid(row.try_get("id")?),
        donation_id: RequestId::from_uuid(row.try_get("donation_id")?),
        donor_name: row.try_get("donor_name")?,
        donor_email: row.try_get("donor_email")?,
        donor_phone: row.try_get("donor_phone")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl DonorInfoStore for PgDonorInfoStore {
    async fn create(&self, info: NewDonorInfo) -> Result<DonorInfoRecord, StoreError> {
        let row = sqlx::query(
            "INSERT INTO donor_info (id, donation_id, donor_name, donor_email, donor_phone, created_at) \
             VALUES ($1, $2, $3, $4, $5, now()) \
             RETURNING id, donation_id, donor_name, donor_email, donor_phone, created_at",
        )
        .bind(*DonorInfoId::new().as_uuid())
        .bind(*info.donation_id.as_uuid())
        .bind(&info.donor_name)
        .bind(&info.donor_email)
        .bind(&info.donor_phone)
        .fetch_one(&self.pool)
        .await?;
        donor_from_row(&row)
    }

    async fn find_by_donation_id(
        &self,
        donation_id: RequestId,
    ) -> Result<Vec<DonorInfoRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, donation_id, donor_name, donor_email, donor_phone, created_at \
             FROM donor_info WHERE donation_id = $1 ORDER BY created_at",
        )
        .bind(*donation_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(donor_from_row).collect()
    }
}

// ─── Blogs ───────────────────────────────────────────────────────────────────

pub struct PgBlogStore {
    pool: PgPool,
}

impl PgBlogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const BLOG_COLUMNS: &str = "id, title, thumbnail_url, content, author_email, status, created_at";

fn blog_from_row(row: &PgRow) -> Result<BlogRecord, StoreError> {
    Ok(BlogRecord {
        id: BlogId::from_uuid(row.try_get("id")?),
        title: row.try_get("title")?,
        thumbnail_url: row.try_get("thumbnail_url")?,
        content: row.try_get("content")?,
        author_email: row.try_get("author_email")?,
        status: parse_status(row.try_get::<String, _>("status")?)?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl BlogStore for PgBlogStore {
    async fn create(&self, blog: NewBlog) -> Result<BlogRecord, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO blogs (id, title, thumbnail_url, content, author_email, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, 'draft', now()) \
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(*BlogId::new().as_uuid())
        .bind(&blog.title)
        .bind(&blog.thumbnail_url)
        .bind(&blog.content)
        .bind(&blog.author_email)
        .fetch_one(&self.pool)
        .await?;
        blog_from_row(&row)
    }

    async fn list_all(&self) -> Result<Vec<BlogRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(blog_from_row).collect()
    }

    async fn list_public_published(&self) -> Result<Vec<BlogRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE status = 'published' ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(blog_from_row).collect()
    }

    async fn get_by_id(&self, id: BlogId) -> Result<BlogRecord, StoreError> {
        let row = sqlx::query(&format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"))
            .bind(*id.as_uuid())
            .fetch_one(&self.pool)
            .await?;
        blog_from_row(&row)
    }

    async fn set_status(&self, id: BlogId, status: BlogStatus) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE blogs SET status = $2 WHERE id = $1")
            .bind(*id.as_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: BlogId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ─── Regions ─────────────────────────────────────────────────────────────────

pub struct PgRegionStore {
    pool: PgPool,
}

impl PgRegionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegionStore for PgRegionStore {
    async fn list_districts(&self) -> Result<Vec<District>, StoreError> {
        let rows = sqlx::query("SELECT id, name, bn_name FROM districts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| {
                Ok(District {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    bn_name: row.try_get("bn_name")?,
                })
            })
            .collect()
    }

    async fn list_upazilas(&self, district_id: Option<i64>) -> Result<Vec<Upazila>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, district_id, name, bn_name FROM upazilas \
             WHERE $1::bigint IS NULL OR district_id = $1 ORDER BY id",
        )
        .bind(district_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| {
                Ok(Upazila {
                    id: row.try_get("id")?,
                    district_id: row.try_get("district_id")?,
                    name: row.try_get("name")?,
                    bn_name: row.try_get("bn_name")?,
                })
            })
            .collect()
    }
}
