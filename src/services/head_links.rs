//! Alternate-language `<link>` tags for the public document head.

use crate::{
    models::{
        owner::{Locale, OwnerRef},
        view::QueriedView,
    },
    sanitize::esc_url,
    services::metadata_store::MetadataStore,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fallback code emitted alongside the English URL.
pub const X_DEFAULT: &str = "x-default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HreflangLink {
    pub hreflang: &'static str,
    pub href: String,
}

impl HreflangLink {
    pub fn to_html(&self) -> String {
        format!(
            "<link rel=\"alternate\" href=\"{}\" hreflang=\"{}\" />\n",
            esc_url(&self.href),
            self.hreflang
        )
    }
}

#[derive(Clone)]
pub struct HeadLinkEmitter {
    store: Arc<dyn MetadataStore>,
}

impl HeadLinkEmitter {
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self { store }
    }

    /// Links for `view`, ordered x-default, en, id. Empty for anything other
    /// than a single item or a term archive.
    pub async fn links(&self, view: &QueriedView) -> Vec<HreflangLink> {
        let Some(owner) = view.owner() else {
            return Vec::new();
        };

        let mut links = Vec::with_capacity(3);
        if let Some(en) = self.read(owner, Locale::En).await {
            links.push(HreflangLink {
                hreflang: X_DEFAULT,
                href: en.clone(),
            });
            links.push(HreflangLink {
                hreflang: Locale::En.code(),
                href: en,
            });
        }
        if let Some(id) = self.read(owner, Locale::Id).await {
            links.push(HreflangLink {
                hreflang: Locale::Id.code(),
                href: id,
            });
        }

        debug!("Emitting {} hreflang links for {}", links.len(), owner);
        links
    }

    /// Markup to splice into `<head>`.
    pub async fn render(&self, view: &QueriedView) -> String {
        self.links(view)
            .await
            .iter()
            .map(HreflangLink::to_html)
            .collect()
    }

    // Read failures degrade to "no value" so a broken store never breaks the page.
    async fn read(&self, owner: OwnerRef, locale: Locale) -> Option<String> {
        match self.store.get(owner, locale.meta_key()).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) => {
                warn!("Failed to read {} for {}: {}", locale.meta_key(), owner, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{FailingStore, MemoryMetadataStore};

    async fn emitter_with(owner: OwnerRef, en: Option<&str>, id: Option<&str>) -> HeadLinkEmitter {
        let store = MemoryMetadataStore::default();
        if let Some(en) = en {
            store.update(owner, "_hreflang_en", en).await.unwrap();
        }
        if let Some(id) = id {
            store.update(owner, "_hreflang_id", id).await.unwrap();
        }
        HeadLinkEmitter::new(Arc::new(store))
    }

    fn codes(links: &[HreflangLink]) -> Vec<&str> {
        links.iter().map(|l| l.hreflang).collect()
    }

    #[tokio::test]
    async fn no_metadata_emits_nothing() {
        let emitter = emitter_with(OwnerRef::item(1), None, None).await;
        assert!(emitter.links(&QueriedView::SingleItem(1)).await.is_empty());
        assert_eq!(emitter.render(&QueriedView::SingleItem(1)).await, "");
    }

    #[tokio::test]
    async fn english_only_emits_default_and_en() {
        let emitter = emitter_with(OwnerRef::item(1), Some("https://example.com/"), None).await;
        let links = emitter.links(&QueriedView::SingleItem(1)).await;

        assert_eq!(codes(&links), vec!["x-default", "en"]);
        assert!(links.iter().all(|l| l.href == "https://example.com/"));
    }

    #[tokio::test]
    async fn indonesian_only_emits_id() {
        let emitter = emitter_with(OwnerRef::term(2), None, Some("https://example.id/")).await;
        let links = emitter.links(&QueriedView::TermArchive(2)).await;

        assert_eq!(
            links,
            vec![HreflangLink {
                hreflang: "id",
                href: "https://example.id/".into()
            }]
        );
    }

    #[tokio::test]
    async fn both_emit_three_links_in_fixed_order() {
        let emitter = emitter_with(
            OwnerRef::item(3),
            Some("https://example.com/"),
            Some("https://example.id/"),
        )
        .await;

        let html = emitter.render(&QueriedView::SingleItem(3)).await;
        assert_eq!(
            html,
            concat!(
                "<link rel=\"alternate\" href=\"https://example.com/\" hreflang=\"x-default\" />\n",
                "<link rel=\"alternate\" href=\"https://example.com/\" hreflang=\"en\" />\n",
                "<link rel=\"alternate\" href=\"https://example.id/\" hreflang=\"id\" />\n",
            )
        );
    }

    #[tokio::test]
    async fn other_views_and_other_owners_emit_nothing() {
        let emitter = emitter_with(OwnerRef::item(4), Some("https://example.com/"), None).await;

        assert!(emitter.links(&QueriedView::Other).await.is_empty());
        // Term 4 is a different owner than item 4.
        assert!(emitter.links(&QueriedView::TermArchive(4)).await.is_empty());
    }

    #[tokio::test]
    async fn href_is_escaped_in_markup() {
        let emitter = emitter_with(
            OwnerRef::item(5),
            Some("https://example.com/?a=1&b=2\"><script>"),
            None,
        )
        .await;

        let html = emitter.render(&QueriedView::SingleItem(5)).await;
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"href="https://example.com/?a=1&#038;b=2script""#));
    }

    #[tokio::test]
    async fn store_failures_emit_nothing() {
        let emitter = HeadLinkEmitter::new(Arc::new(FailingStore));
        assert!(emitter.links(&QueriedView::SingleItem(1)).await.is_empty());
    }
}
