//! Hreflang editor and emitter, plus the host collaborators they depend on.

pub mod authorization;
pub mod content_registry;
pub mod head_links;
pub mod host_service;
pub mod hreflang_editor;
pub mod metadata_store;
pub mod nonce_service;

/// In-memory stand-ins for the host collaborators.
#[cfg(test)]
pub(crate) mod testing {
    use crate::{
        errors::{StoreError, StoreResult},
        models::{actor::Actor, owner::OwnerRef},
        services::{
            authorization::Authorizer, metadata_store::MetadataStore, nonce_service::NonceService,
        },
    };
    use async_trait::async_trait;
    use std::{
        collections::HashMap,
        sync::{
            Mutex,
            atomic::{AtomicU64, Ordering},
        },
    };

    #[derive(Default)]
    pub struct MemoryMetadataStore {
        values: Mutex<HashMap<(OwnerRef, String), String>>,
    }

    impl MemoryMetadataStore {
        pub fn is_empty(&self) -> bool {
            self.values.lock().unwrap().is_empty()
        }
    }

    #[async_trait]
    impl MetadataStore for MemoryMetadataStore {
        async fn get(&self, owner: OwnerRef, key: &str) -> StoreResult<Option<String>> {
            Ok(self
                .values
                .lock()
                .unwrap()
                .get(&(owner, key.to_string()))
                .cloned())
        }

        async fn update(&self, owner: OwnerRef, key: &str, value: &str) -> StoreResult<()> {
            self.values
                .lock()
                .unwrap()
                .insert((owner, key.to_string()), value.to_string());
            Ok(())
        }
    }

    pub struct FailingStore;

    #[async_trait]
    impl MetadataStore for FailingStore {
        async fn get(&self, _owner: OwnerRef, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Sqlx(sqlx::Error::PoolClosed))
        }

        async fn update(&self, _owner: OwnerRef, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Sqlx(sqlx::Error::PoolClosed))
        }
    }

    /// Tokens are `nonce-1`, `nonce-2`, ...; each verifies once.
    #[derive(Default)]
    pub struct MemoryNonces {
        next: AtomicU64,
        issued: Mutex<HashMap<String, (String, Option<i64>)>>,
    }

    #[async_trait]
    impl NonceService for MemoryNonces {
        async fn issue(&self, action: &str, actor: Option<&Actor>) -> StoreResult<String> {
            let token = format!("nonce-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1);
            self.issued
                .lock()
                .unwrap()
                .insert(token.clone(), (action.to_string(), actor.map(|a| a.id)));
            Ok(token)
        }

        async fn verify(
            &self,
            token: &str,
            action: &str,
            actor: Option<&Actor>,
        ) -> StoreResult<bool> {
            Ok(match self.issued.lock().unwrap().remove(token) {
                Some((issued_for, actor_id)) => {
                    issued_for == action && actor_id == actor.map(|a| a.id)
                }
                None => false,
            })
        }
    }

    pub struct AllowAll;

    #[async_trait]
    impl Authorizer for AllowAll {
        async fn can_edit(&self, _actor: Option<&Actor>, _owner: OwnerRef) -> StoreResult<bool> {
            Ok(true)
        }
    }

    pub struct DenyAll;

    #[async_trait]
    impl Authorizer for DenyAll {
        async fn can_edit(&self, _actor: Option<&Actor>, _owner: OwnerRef) -> StoreResult<bool> {
            Ok(false)
        }
    }
}
