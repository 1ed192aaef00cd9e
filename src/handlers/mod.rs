//! HTTP handlers: admin edit screens, public pages, health probes.

pub mod admin_handlers;
pub mod health_handlers;
pub mod public_handlers;
