//! Host lookups the HTTP adapter needs: who is calling, and what is being
//! edited or viewed.

use crate::{
    errors::{StoreError, StoreResult},
    models::{
        actor::Actor,
        content::{ContentItem, Term},
        owner::OwnerRef,
    },
};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct HostService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl HostService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Resolve a bearer token to an actor. Unknown tokens are anonymous.
    pub async fn actor_for_token(&self, token: &str) -> StoreResult<Option<Actor>> {
        let actor = sqlx::query_as::<_, Actor>(
            "SELECT id, name, role FROM actors WHERE api_token = ?",
        )
        .bind(token)
        .fetch_optional(&*self.db)
        .await?;
        Ok(actor)
    }

    pub async fn fetch_item(&self, id: i64) -> StoreResult<ContentItem> {
        sqlx::query_as::<_, ContentItem>(
            "SELECT content_type, title FROM content_items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(StoreError::OwnerNotFound(OwnerRef::item(id)))
    }

    pub async fn fetch_term(&self, id: i64) -> StoreResult<Term> {
        sqlx::query_as::<_, Term>("SELECT taxonomy, name FROM terms WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.db)
            .await?
            .ok_or(StoreError::OwnerNotFound(OwnerRef::term(id)))
    }
}
