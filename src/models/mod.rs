//! Core data models for the hreflang metadata service.
//!
//! Host entities map to database tables via `sqlx::FromRow`; the metadata
//! record itself is assembled from key-value rows by the metadata store.

pub mod actor;
pub mod content;
pub mod owner;
pub mod view;
