//! Binds the hreflang editor and emitter to HTTP routes.
//!
//! ## Structure
//! - **Admin endpoints** (bearer-token actor)
//!   - `GET  /admin/items/{id}/edit` — item edit screen with the hreflang section
//!   - `POST /admin/items/{id}`      — item save hook (`X-Autosave: true` for autosaves)
//!   - `GET  /admin/terms/{id}/edit` — term edit screen
//!   - `POST /admin/terms/{id}`      — term save hook
//!
//! - **Public endpoints**
//!   - `GET /`           — home page, no hreflang links
//!   - `GET /items/{id}` — single item, hreflang links in `<head>`
//!   - `GET /terms/{id}` — term archive, hreflang links in `<head>`

use crate::{
    handlers::{
        admin_handlers::{edit_item, edit_term, save_item, save_term},
        health_handlers::{healthz, readyz},
        public_handlers::{home, show_item, show_term},
    },
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build and return the router for the admin and public pages.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Admin edit screens and save hooks
        .route("/admin/items/{id}/edit", get(edit_item))
        .route("/admin/items/{id}", post(save_item))
        .route("/admin/terms/{id}/edit", get(edit_term))
        .route("/admin/terms/{id}", post(save_term))
        // Public pages
        .route("/", get(home))
        .route("/items/{id}", get(show_item))
        .route("/terms/{id}", get(show_term))
}
