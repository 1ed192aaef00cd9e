use crate::{
    config::AppConfig,
    errors::{StoreError, StoreResult},
    services::{
        authorization::SqliteAuthorizer,
        content_registry::{ContentTypeRegistry, SqliteContentTypeRegistry, StaticContentTypes},
        head_links::HeadLinkEmitter,
        host_service::HostService,
        hreflang_editor::MetadataEditor,
        metadata_store::SqliteMetadataStore,
        nonce_service::SqliteNonceService,
    },
};
use chrono::Duration;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub host: HostService,
    pub editor: MetadataEditor,
    pub emitter: HeadLinkEmitter,
}

impl AppState {
    /// Wire the SQLite-backed collaborators into the editor and emitter.
    ///
    /// With `content_types` set, the section is attached to exactly those
    /// types; otherwise the host's registry is asked once.
    pub async fn build(
        db: Arc<SqlitePool>,
        content_types: Option<Vec<String>>,
        nonce_ttl: Duration,
    ) -> StoreResult<Self> {
        let store = Arc::new(SqliteMetadataStore::new(db.clone()));
        let registry: Box<dyn ContentTypeRegistry> = match content_types {
            Some(types) => Box::new(StaticContentTypes(types)),
            None => Box::new(SqliteContentTypeRegistry::new(db.clone())),
        };

        let editor = MetadataEditor::register(
            registry.as_ref(),
            store.clone(),
            Arc::new(SqliteAuthorizer::new(db.clone())),
            Arc::new(SqliteNonceService::new(db.clone(), nonce_ttl)),
        )
        .await?;

        Ok(Self {
            host: HostService::new(db),
            editor,
            emitter: HeadLinkEmitter::new(store),
        })
    }

    pub async fn from_config(db: Arc<SqlitePool>, cfg: &AppConfig) -> StoreResult<Self> {
        let ttl = Duration::try_seconds(cfg.nonce_ttl_secs)
            .ok_or(StoreError::InvalidTokenLifetime(cfg.nonce_ttl_secs))?;
        Self::build(db, cfg.content_types.clone(), ttl).await
    }
}
