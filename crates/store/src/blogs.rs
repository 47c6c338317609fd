//! Blog post collection. Only published posts are publicly visible.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lifedrop_core::{BlogId, DomainError};

use crate::error::StoreError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    Published,
}

impl BlogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl FromStr for BlogStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(DomainError::validation(format!("unknown blog status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecord {
    pub id: BlogId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub content: String,
    pub author_email: Option<String>,
    pub status: BlogStatus,
    pub created_at: DateTime<Utc>,
}

/// New posts always start as drafts; publication is an admin status flip.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBlog {
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub content: String,
    pub author_email: Option<String>,
}

#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn create(&self, blog: NewBlog) -> Result<BlogRecord, StoreError>;

    async fn list_all(&self) -> Result<Vec<BlogRecord>, StoreError>;

    /// Public listing: published posts only.
    async fn list_public_published(&self) -> Result<Vec<BlogRecord>, StoreError>;

    async fn get_by_id(&self, id: BlogId) -> Result<BlogRecord, StoreError>;

    async fn set_status(&self, id: BlogId, status: BlogStatus) -> Result<(), StoreError>;

    async fn delete_by_id(&self, id: BlogId) -> Result<(), StoreError>;
}

/// In-memory blog store for dev/test.
#[derive(Debug, Default)]
pub struct InMemoryBlogStore {
    inner: RwLock<HashMap<BlogId, BlogRecord>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<BlogId, BlogRecord>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::backend("blog store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<BlogId, BlogRecord>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::backend("blog store lock poisoned"))
    }
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn create(&self, blog: NewBlog) -> Result<BlogRecord, StoreError> {
        let record = BlogRecord {
            id: BlogId::new(),
            title: blog.title,
            thumbnail_url: blog.thumbnail_url,
            content: blog.content,
            author_email: blog.author_email,
            status: BlogStatus::Draft,
            created_at: Utc::now(),
        };
        self.write()?.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<BlogRecord>, StoreError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn list_public_published(&self) -> Result<Vec<BlogRecord>, StoreError> {
        Ok(self
            .read()?
            .values()
            .filter(|b| b.status == BlogStatus::Published)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: BlogId) -> Result<BlogRecord, StoreError> {
        self.read()?.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn set_status(&self, id: BlogId, status: BlogStatus) -> Result<(), StoreError> {
        let mut map = self.write()?;
        let record = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.status = status;
        Ok(())
    }

    async fn delete_by_id(&self, id: BlogId) -> Result<(), StoreError> {
        self.write()?.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> NewBlog {
        NewBlog {
            title: title.to_string(),
            thumbnail_url: None,
            content: "body".to_string(),
            author_email: Some("author@x.com".to_string()),
        }
    }

    #[tokio::test]
    async fn new_posts_are_drafts_and_hidden_from_public() {
        let store = InMemoryBlogStore::new();
        let rec = store.create(post("Why donate")).await.unwrap();

        assert_eq!(rec.status, BlogStatus::Draft);
        assert!(store.list_public_published().await.unwrap().is_empty());
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn publishing_makes_a_post_publicly_visible() {
        let store = InMemoryBlogStore::new();
        let rec = store.create(post("Why donate")).await.unwrap();

        store.set_status(rec.id, BlogStatus::Published).await.unwrap();
        let public = store.list_public_published().await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, rec.id);

        store.set_status(rec.id, BlogStatus::Draft).await.unwrap();
        assert!(store.list_public_published().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_post_is_not_found() {
        let store = InMemoryBlogStore::new();
        assert!(matches!(
            store.delete_by_id(BlogId::new()).await,
            Err(StoreError::NotFound)
        ));
    }
}
