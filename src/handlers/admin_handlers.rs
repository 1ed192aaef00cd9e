//! Edit screens for content items and terms, and their save hooks.
//!
//! Saves never report failure to the browser: whatever the editor decides,
//! the response is a redirect back to the edit screen.

use crate::{
    errors::{AppError, StoreResult},
    models::{actor::Actor, owner::OwnerRef},
    sanitize::esc_html,
    services::hreflang_editor::{HREFLANG_SECTION, SaveOutcome, SaveRequest, SectionSpec},
    state::AppState,
};
use axum::{
    Form,
    extract::{FromRequestParts, Path, State},
    http::{HeaderMap, header, request::Parts},
    response::{Html, Redirect},
};
use tracing::warn;

/// Header set by the editing UI on background autosave requests.
pub const AUTOSAVE_HEADER: &str = "x-autosave";

/// Actor resolved from `Authorization: Bearer <token>`; `None` when anonymous.
pub struct CurrentActor(pub Option<Actor>);

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let actor = match token {
            Some(token) => state.host.actor_for_token(token).await?,
            None => None,
        };
        Ok(CurrentActor(actor))
    }
}

/// `GET /admin/items/{id}/edit`
pub async fn edit_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentActor(actor): CurrentActor,
) -> Result<Html<String>, AppError> {
    let item = state.host.fetch_item(id).await?;
    let owner = OwnerRef::item(id);
    ensure_can_edit(&state, actor.as_ref(), owner).await?;

    let section = match state.editor.section_for(&item.content_type) {
        Some(spec) => {
            let body = state.editor.render_section(owner, actor.as_ref()).await?;
            render_section(spec, &body)
        }
        None => String::new(),
    };

    Ok(Html(edit_page(
        &format!("Edit {}: {}", item.content_type, item.title),
        &format!("/admin/items/{}", id),
        &section,
    )))
}

/// `POST /admin/items/{id}`
pub async fn save_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentActor(actor): CurrentActor,
    headers: HeaderMap,
    Form(mut request): Form<SaveRequest>,
) -> Result<Redirect, AppError> {
    state.host.fetch_item(id).await?;
    request.autosave = is_autosave(&headers);

    let outcome = state.editor.save_item(id, actor.as_ref(), &request).await;
    log_failure(OwnerRef::item(id), outcome);

    Ok(Redirect::to(&format!("/admin/items/{}/edit", id)))
}

/// `GET /admin/terms/{id}/edit`
pub async fn edit_term(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentActor(actor): CurrentActor,
) -> Result<Html<String>, AppError> {
    let term = state.host.fetch_term(id).await?;
    let owner = OwnerRef::term(id);
    ensure_can_edit(&state, actor.as_ref(), owner).await?;

    let body = state.editor.render_section(owner, actor.as_ref()).await?;
    Ok(Html(edit_page(
        &format!("Edit {}: {}", term.taxonomy, term.name),
        &format!("/admin/terms/{}", id),
        &render_section(HREFLANG_SECTION, &body),
    )))
}

/// `POST /admin/terms/{id}`
pub async fn save_term(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentActor(actor): CurrentActor,
    Form(request): Form<SaveRequest>,
) -> Result<Redirect, AppError> {
    state.host.fetch_term(id).await?;

    let outcome = state.editor.save_term(id, actor.as_ref(), &request).await;
    log_failure(OwnerRef::term(id), outcome);

    Ok(Redirect::to(&format!("/admin/terms/{}/edit", id)))
}

async fn ensure_can_edit(
    state: &AppState,
    actor: Option<&Actor>,
    owner: OwnerRef,
) -> Result<(), AppError> {
    if state.editor.can_edit(actor, owner).await? {
        Ok(())
    } else {
        Err(AppError::forbidden(format!("not allowed to edit {}", owner)))
    }
}

fn is_autosave(headers: &HeaderMap) -> bool {
    headers
        .get(AUTOSAVE_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| matches!(v.trim(), "1" | "true"))
}

fn log_failure(owner: OwnerRef, outcome: StoreResult<SaveOutcome>) {
    if let Err(err) = outcome {
        warn!("Saving hreflang metadata for {} failed: {}", owner, err);
    }
}

fn render_section(spec: SectionSpec, body: &str) -> String {
    format!(
        "<div id=\"{id}\" class=\"postbox {context} priority-{priority}\">\n<h2>{title}</h2>\n<div class=\"inside\">\n{body}</div>\n</div>\n",
        id = spec.id,
        context = spec.context,
        priority = spec.priority,
        title = esc_html(spec.title),
        body = body,
    )
}

fn edit_page(heading: &str, action: &str, section: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>{heading}</title>\n</head>\n<body>\n<h1>{heading}</h1>\n<form method=\"post\" action=\"{action}\">\n{section}<button type=\"submit\">Update</button>\n</form>\n</body>\n</html>\n",
        heading = esc_html(heading),
        action = action,
        section = section,
    )
}
