//! Public pages. Only the document head matters here: it carries the
//! hreflang links for the queried item or term.

use crate::{errors::AppError, models::view::QueriedView, sanitize::esc_html, state::AppState};
use axum::{
    extract::{Path, State},
    response::Html,
};

/// `GET /`
pub async fn home(State(state): State<AppState>) -> Html<String> {
    let head = state.emitter.render(&QueriedView::Other).await;
    Html(page("Home", &head, "<h1>Home</h1>\n"))
}

/// `GET /items/{id}`
pub async fn show_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let item = state.host.fetch_item(id).await?;
    let head = state.emitter.render(&QueriedView::SingleItem(id)).await;

    let title = esc_html(&item.title);
    Ok(Html(page(
        &item.title,
        &head,
        &format!("<article>\n<h1>{}</h1>\n</article>\n", title),
    )))
}

/// `GET /terms/{id}`
pub async fn show_term(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let term = state.host.fetch_term(id).await?;
    let head = state.emitter.render(&QueriedView::TermArchive(id)).await;

    Ok(Html(page(
        &term.name,
        &head,
        &format!(
            "<h1>{}: {}</h1>\n",
            esc_html(&term.taxonomy),
            esc_html(&term.name)
        ),
    )))
}

fn page(title: &str, head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>{}</title>\n{}</head>\n<body>\n{}</body>\n</html>\n",
        esc_html(title),
        head,
        body
    )
}
