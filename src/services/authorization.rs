//! "Can this actor edit this owner" checks.

use crate::{
    errors::StoreResult,
    models::{
        actor::{Actor, Role},
        owner::{OwnerKind, OwnerRef},
    },
};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Anonymous actors (`None`) can never edit. Unknown owners are not editable.
    async fn can_edit(&self, actor: Option<&Actor>, owner: OwnerRef) -> StoreResult<bool>;
}

/// Role-based rules over the host tables:
/// - administrators and editors edit every item and term
/// - authors edit only items they wrote
/// - subscribers edit nothing
#[derive(Clone)]
pub struct SqliteAuthorizer {
    db: Arc<SqlitePool>,
}

impl SqliteAuthorizer {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Authorizer for SqliteAuthorizer {
    async fn can_edit(&self, actor: Option<&Actor>, owner: OwnerRef) -> StoreResult<bool> {
        let Some(actor) = actor else {
            return Ok(false);
        };
        if actor.role == Role::Subscriber {
            return Ok(false);
        }

        match owner.kind {
            OwnerKind::ContentItem => {
                let author = sqlx::query_scalar::<_, Option<i64>>(
                    "SELECT author_id FROM content_items WHERE id = ?",
                )
                .bind(owner.id)
                .fetch_optional(&*self.db)
                .await?;

                Ok(match author {
                    None => false,
                    Some(_) if actor.role.edits_others() => true,
                    Some(author_id) => author_id == Some(actor.id),
                })
            }
            OwnerKind::TaxonomyTerm => {
                if !actor.role.edits_others() {
                    return Ok(false);
                }
                let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM terms WHERE id = ?")
                    .bind(owner.id)
                    .fetch_optional(&*self.db)
                    .await?;
                Ok(exists.is_some())
            }
        }
    }
}
