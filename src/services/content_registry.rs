//! Source of the content types that receive the hreflang edit section.

use crate::errors::StoreResult;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

#[async_trait]
pub trait ContentTypeRegistry: Send + Sync {
    async fn public_content_types(&self) -> StoreResult<Vec<String>>;
}

/// Reads the host's `content_types` table.
#[derive(Clone)]
pub struct SqliteContentTypeRegistry {
    db: Arc<SqlitePool>,
}

impl SqliteContentTypeRegistry {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentTypeRegistry for SqliteContentTypeRegistry {
    async fn public_content_types(&self) -> StoreResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM content_types WHERE public = 1 ORDER BY name",
        )
        .fetch_all(&*self.db)
        .await?;
        Ok(names)
    }
}

/// Fixed list from configuration, used instead of querying the host.
#[derive(Clone, Debug)]
pub struct StaticContentTypes(pub Vec<String>);

#[async_trait]
impl ContentTypeRegistry for StaticContentTypes {
    async fn public_content_types(&self) -> StoreResult<Vec<String>> {
        Ok(self.0.clone())
    }
}
