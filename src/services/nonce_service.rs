//! Single-use anti-forgery tokens scoped to an action and an actor.

use crate::{
    errors::{StoreError, StoreResult},
    models::actor::Actor,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

/// Action every hreflang form token is issued for.
pub const HREFLANG_NONCE_ACTION: &str = "save_hreflang_meta_box_data";

/// Hidden form field carrying the token.
pub const HREFLANG_NONCE_FIELD: &str = "hreflang_meta_box_nonce";

#[async_trait]
pub trait NonceService: Send + Sync {
    /// Issue a fresh token for `action` on behalf of `actor`.
    async fn issue(&self, action: &str, actor: Option<&Actor>) -> StoreResult<String>;

    /// Consume `token`. True only the first time, for the same action and
    /// actor it was issued to, and before it expires.
    async fn verify(&self, token: &str, action: &str, actor: Option<&Actor>) -> StoreResult<bool>;
}

#[derive(Clone)]
pub struct SqliteNonceService {
    db: Arc<SqlitePool>,
    ttl: Duration,
}

impl SqliteNonceService {
    pub fn new(db: Arc<SqlitePool>, ttl: Duration) -> Self {
        Self { db, ttl }
    }
}

#[async_trait]
impl NonceService for SqliteNonceService {
    async fn issue(&self, action: &str, actor: Option<&Actor>) -> StoreResult<String> {
        let now = Utc::now();

        // Opportunistic cleanup; verification re-checks expiry anyway.
        sqlx::query("DELETE FROM nonces WHERE expires_at < ?")
            .bind(now)
            .execute(&*self.db)
            .await?;

        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(StoreError::InvalidTokenLifetime(self.ttl.num_seconds()))?;

        let token = Uuid::new_v4().simple().to_string();
        sqlx::query("INSERT INTO nonces (token, action, actor_id, expires_at) VALUES (?, ?, ?, ?)")
            .bind(&token)
            .bind(action)
            .bind(actor.map(|a| a.id))
            .bind(expires_at)
            .execute(&*self.db)
            .await?;

        Ok(token)
    }

    async fn verify(&self, token: &str, action: &str, actor: Option<&Actor>) -> StoreResult<bool> {
        if token.is_empty() {
            return Ok(false);
        }

        let row = sqlx::query_as::<_, (Option<i64>, DateTime<Utc>)>(
            "DELETE FROM nonces WHERE token = ? AND action = ? RETURNING actor_id, expires_at",
        )
        .bind(token)
        .bind(action)
        .fetch_optional(&*self.db)
        .await?;

        Ok(match row {
            Some((actor_id, expires_at)) => {
                actor_id == actor.map(|a| a.id) && expires_at > Utc::now()
            }
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::memory_pool, models::actor::Role};

    fn editor(id: i64) -> Actor {
        Actor {
            id,
            name: format!("editor-{}", id),
            role: Role::Editor,
        }
    }

    #[tokio::test]
    async fn token_verifies_exactly_once() {
        let nonces = SqliteNonceService::new(memory_pool().await, Duration::hours(1));
        let actor = editor(1);

        let token = nonces.issue(HREFLANG_NONCE_ACTION, Some(&actor)).await.unwrap();
        assert!(nonces.verify(&token, HREFLANG_NONCE_ACTION, Some(&actor)).await.unwrap());
        assert!(!nonces.verify(&token, HREFLANG_NONCE_ACTION, Some(&actor)).await.unwrap());
    }

    #[tokio::test]
    async fn token_is_scoped_to_action_and_actor() {
        let nonces = SqliteNonceService::new(memory_pool().await, Duration::hours(1));
        let (alice, bob) = (editor(1), editor(2));

        let token = nonces.issue(HREFLANG_NONCE_ACTION, Some(&alice)).await.unwrap();
        assert!(!nonces.verify(&token, "delete_everything", Some(&alice)).await.unwrap());

        let token = nonces.issue(HREFLANG_NONCE_ACTION, Some(&alice)).await.unwrap();
        assert!(!nonces.verify(&token, HREFLANG_NONCE_ACTION, Some(&bob)).await.unwrap());

        let token = nonces.issue(HREFLANG_NONCE_ACTION, Some(&alice)).await.unwrap();
        assert!(!nonces.verify(&token, HREFLANG_NONCE_ACTION, None).await.unwrap());
    }

    #[tokio::test]
    async fn unrepresentable_expiry_is_an_error() {
        let nonces = SqliteNonceService::new(memory_pool().await, Duration::days(1_000_000_000));
        assert!(matches!(
            nonces.issue(HREFLANG_NONCE_ACTION, None).await,
            Err(StoreError::InvalidTokenLifetime(_))
        ));
    }

    #[tokio::test]
    async fn expired_and_unknown_tokens_fail() {
        let nonces = SqliteNonceService::new(memory_pool().await, Duration::seconds(-1));
        let actor = editor(1);

        let token = nonces.issue(HREFLANG_NONCE_ACTION, Some(&actor)).await.unwrap();
        assert!(!nonces.verify(&token, HREFLANG_NONCE_ACTION, Some(&actor)).await.unwrap());
        assert!(!nonces.verify("not-a-token", HREFLANG_NONCE_ACTION, Some(&actor)).await.unwrap());
        assert!(!nonces.verify("", HREFLANG_NONCE_ACTION, Some(&actor)).await.unwrap());
    }
}
