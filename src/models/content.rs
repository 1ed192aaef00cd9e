//! Host-owned entities the hreflang metadata is attached to.

use sqlx::FromRow;

/// A single piece of content (post, page, ...).
#[derive(Clone, FromRow, Debug)]
pub struct ContentItem {
    /// Registered content type name, e.g. "post".
    pub content_type: String,

    pub title: String,
}

/// A categorization entry with its own archive page.
#[derive(Clone, FromRow, Debug)]
pub struct Term {
    pub taxonomy: String,
    pub name: String,
}
