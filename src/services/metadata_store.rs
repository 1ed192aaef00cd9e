//! Key-value metadata keyed by (owner kind, owner id, meta key).

use crate::{
    errors::StoreResult,
    models::owner::{HreflangMetadata, Locale, OwnerRef},
};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Host metadata store. One value per owner and key.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn get(&self, owner: OwnerRef, key: &str) -> StoreResult<Option<String>>;

    /// Insert or overwrite the value stored under `key`.
    async fn update(&self, owner: OwnerRef, key: &str, value: &str) -> StoreResult<()>;
}

/// Read both hreflang fields for `owner`.
pub async fn load_hreflang(
    store: &dyn MetadataStore,
    owner: OwnerRef,
) -> StoreResult<HreflangMetadata> {
    let mut meta = HreflangMetadata::empty(owner);
    for locale in Locale::ALL {
        meta.set(locale, store.get(owner, locale.meta_key()).await?);
    }
    Ok(meta)
}

#[derive(Clone)]
pub struct SqliteMetadataStore {
    db: Arc<SqlitePool>,
}

impl SqliteMetadataStore {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MetadataStore for SqliteMetadataStore {
    async fn get(&self, owner: OwnerRef, key: &str) -> StoreResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT meta_value FROM owner_meta
             WHERE owner_kind = ? AND owner_id = ? AND meta_key = ?",
        )
        .bind(owner.kind.as_str())
        .bind(owner.id)
        .bind(key)
        .fetch_optional(&*self.db)
        .await?;
        Ok(value)
    }

    async fn update(&self, owner: OwnerRef, key: &str, value: &str) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO owner_meta (owner_kind, owner_id, meta_key, meta_value)
             VALUES (?, ?, ?, ?)
             ON CONFLICT (owner_kind, owner_id, meta_key)
             DO UPDATE SET meta_value = excluded.meta_value",
        )
        .bind(owner.kind.as_str())
        .bind(owner.id)
        .bind(key)
        .bind(value)
        .execute(&*self.db)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[tokio::test]
    async fn missing_values_read_as_none() {
        let store = SqliteMetadataStore::new(memory_pool().await);
        assert_eq!(
            store.get(OwnerRef::item(1), "_hreflang_en").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn update_overwrites_single_value() {
        let store = SqliteMetadataStore::new(memory_pool().await);
        let owner = OwnerRef::item(1);

        store.update(owner, "_hreflang_en", "https://a.example/").await.unwrap();
        store.update(owner, "_hreflang_en", "https://b.example/").await.unwrap();

        assert_eq!(
            store.get(owner, "_hreflang_en").await.unwrap().as_deref(),
            Some("https://b.example/")
        );
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM owner_meta")
            .fetch_one(&*store.db)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn items_and_terms_with_same_id_are_separate() {
        let store = SqliteMetadataStore::new(memory_pool().await);
        store
            .update(OwnerRef::item(5), "_hreflang_id", "https://item.example/")
            .await
            .unwrap();
        store
            .update(OwnerRef::term(5), "_hreflang_id", "https://term.example/")
            .await
            .unwrap();

        let item = load_hreflang(&store, OwnerRef::item(5)).await.unwrap();
        let term = load_hreflang(&store, OwnerRef::term(5)).await.unwrap();
        assert_eq!(item.indonesian_url.as_deref(), Some("https://item.example/"));
        assert_eq!(term.indonesian_url.as_deref(), Some("https://term.example/"));
        assert_eq!(term.english_url, None);
    }
}
