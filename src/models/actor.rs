//! Actors known to the host and their roles.

use sqlx::FromRow;

/// Coarse role used by the host's capability checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Administrator,
    Editor,
    Author,
    Subscriber,
}

impl Role {
    /// Administrators and editors may edit everything.
    pub fn edits_others(&self) -> bool {
        matches!(self, Role::Administrator | Role::Editor)
    }
}

/// An authenticated user of the admin screens.
#[derive(Clone, FromRow, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub role: Role,
}
