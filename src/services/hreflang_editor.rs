//! The hreflang section of the item and term edit screens.
//!
//! Rendering pre-fills both URL inputs and embeds a fresh anti-forgery
//! token. Saving requires a token, skips autosaves (items only), checks the
//! actor's edit capability, and only then consumes the token. Nothing is
//! written unless every check passes, and a rejected save leaves the token
//! usable for the form's next submission.

use crate::{
    errors::StoreResult,
    models::{
        actor::Actor,
        owner::{Locale, OwnerKind, OwnerRef},
    },
    sanitize::{esc_attr, esc_url_raw},
    services::{
        authorization::Authorizer,
        content_registry::ContentTypeRegistry,
        metadata_store::{MetadataStore, load_hreflang},
        nonce_service::{HREFLANG_NONCE_ACTION, HREFLANG_NONCE_FIELD, NonceService},
    },
};
use serde::Deserialize;
use std::{collections::BTreeSet, sync::Arc};
use tracing::{debug, info};

/// Placement hints for a section on the host's edit screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub context: &'static str,
    pub priority: &'static str,
}

pub const HREFLANG_SECTION: SectionSpec = SectionSpec {
    id: "hreflang_meta_box",
    title: "Hreflang URLs",
    context: "normal",
    priority: "high",
};

/// Posted form fields. Fields left out of the body stay `None` and are not
/// touched on save.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveRequest {
    #[serde(rename = "hreflang_meta_box_nonce")]
    pub nonce: Option<String>,
    #[serde(rename = "hreflang_en")]
    pub english: Option<String>,
    #[serde(rename = "hreflang_id")]
    pub indonesian: Option<String>,
    /// Set by the adapter for background autosave requests.
    #[serde(skip)]
    pub autosave: bool,
}

impl SaveRequest {
    pub fn field(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::En => self.english.as_deref(),
            Locale::Id => self.indonesian.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingNonce,
    InvalidNonce,
    Autosave,
    Forbidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Locales whose value was written.
    Saved { fields: Vec<Locale> },
    Rejected(RejectReason),
}

#[derive(Clone)]
pub struct MetadataEditor {
    store: Arc<dyn MetadataStore>,
    authorizer: Arc<dyn Authorizer>,
    nonces: Arc<dyn NonceService>,
    content_types: Arc<BTreeSet<String>>,
}

impl MetadataEditor {
    pub fn new(
        store: Arc<dyn MetadataStore>,
        authorizer: Arc<dyn Authorizer>,
        nonces: Arc<dyn NonceService>,
        content_types: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            store,
            authorizer,
            nonces,
            content_types: Arc::new(content_types.into_iter().collect()),
        }
    }

    /// Build an editor whose section is attached to every public content
    /// type the registry reports. The registry is queried once, here.
    pub async fn register(
        registry: &dyn ContentTypeRegistry,
        store: Arc<dyn MetadataStore>,
        authorizer: Arc<dyn Authorizer>,
        nonces: Arc<dyn NonceService>,
    ) -> StoreResult<Self> {
        let types = registry.public_content_types().await?;
        info!(
            "Registering section `{}` for content types: {}",
            HREFLANG_SECTION.id,
            types.join(", ")
        );
        Ok(Self::new(store, authorizer, nonces, types))
    }

    /// Section shown on the edit screen of an item of `content_type`.
    pub fn section_for(&self, content_type: &str) -> Option<SectionSpec> {
        self.content_types
            .contains(content_type)
            .then_some(HREFLANG_SECTION)
    }

    /// Whether `actor` may edit `owner`, as the save hook would decide.
    pub async fn can_edit(&self, actor: Option<&Actor>, owner: OwnerRef) -> StoreResult<bool> {
        self.authorizer.can_edit(actor, owner).await
    }

    /// Section body: hidden token plus one pre-filled input per locale.
    pub async fn render_section(&self, owner: OwnerRef, actor: Option<&Actor>) -> StoreResult<String> {
        let token = self.nonces.issue(HREFLANG_NONCE_ACTION, actor).await?;
        let meta = load_hreflang(self.store.as_ref(), owner).await?;

        let mut html = format!(
            "<input type=\"hidden\" id=\"{field}\" name=\"{field}\" value=\"{token}\" />\n",
            field = HREFLANG_NONCE_FIELD,
            token = esc_attr(&token),
        );
        for locale in Locale::ALL {
            html.push_str(&format!(
                concat!(
                    "<p>\n",
                    "    <label for=\"{field}\">{label}</label><br />\n",
                    "    <input\n",
                    "        type=\"text\"\n",
                    "        name=\"{field}\"\n",
                    "        id=\"{field}\"\n",
                    "        value=\"{value}\"\n",
                    "        style=\"width: 100%;\" />\n",
                    "</p>\n"
                ),
                field = locale.form_field(),
                label = locale.label(),
                value = esc_attr(meta.url(locale).unwrap_or("")),
            ));
        }
        Ok(html)
    }

    /// Save hook for content items.
    pub async fn save_item(
        &self,
        item_id: i64,
        actor: Option<&Actor>,
        request: &SaveRequest,
    ) -> StoreResult<SaveOutcome> {
        self.save(OwnerRef::item(item_id), actor, request).await
    }

    /// Save hook for taxonomy terms.
    pub async fn save_term(
        &self,
        term_id: i64,
        actor: Option<&Actor>,
        request: &SaveRequest,
    ) -> StoreResult<SaveOutcome> {
        self.save(OwnerRef::term(term_id), actor, request).await
    }

    async fn save(
        &self,
        owner: OwnerRef,
        actor: Option<&Actor>,
        request: &SaveRequest,
    ) -> StoreResult<SaveOutcome> {
        if let Some(reason) = self.check(owner, actor, request).await? {
            debug!("Ignoring hreflang save for {}: {:?}", owner, reason);
            return Ok(SaveOutcome::Rejected(reason));
        }

        let mut fields = Vec::new();
        for locale in Locale::ALL {
            let Some(raw) = request.field(locale) else {
                continue;
            };
            self.store
                .update(owner, locale.meta_key(), &esc_url_raw(raw))
                .await?;
            fields.push(locale);
        }

        info!(
            "Saved hreflang metadata for {} ({} fields) by {}",
            owner,
            fields.len(),
            actor.map(|a| a.name.as_str()).unwrap_or("anonymous")
        );
        Ok(SaveOutcome::Saved { fields })
    }

    async fn check(
        &self,
        owner: OwnerRef,
        actor: Option<&Actor>,
        request: &SaveRequest,
    ) -> StoreResult<Option<RejectReason>> {
        let Some(token) = request.nonce.as_deref() else {
            return Ok(Some(RejectReason::MissingNonce));
        };
        if owner.kind == OwnerKind::ContentItem && request.autosave {
            return Ok(Some(RejectReason::Autosave));
        }
        if !self.authorizer.can_edit(actor, owner).await? {
            return Ok(Some(RejectReason::Forbidden));
        }
        // Verification consumes the token, so it runs last.
        if !self.nonces.verify(token, HREFLANG_NONCE_ACTION, actor).await? {
            return Ok(Some(RejectReason::InvalidNonce));
        }
        Ok(None)
    }
}
