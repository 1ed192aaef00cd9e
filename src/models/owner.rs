//! Owners of hreflang metadata and the metadata record itself.

use std::fmt;

/// What kind of host entity a metadata record hangs off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    ContentItem,
    TaxonomyTerm,
}

impl OwnerKind {
    /// Column value used by the metadata store.
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::ContentItem => "content_item",
            OwnerKind::TaxonomyTerm => "taxonomy_term",
        }
    }
}

/// Address of a content item or taxonomy term. Ids are assigned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OwnerRef {
    pub kind: OwnerKind,
    pub id: i64,
}

impl OwnerRef {
    pub fn item(id: i64) -> Self {
        Self {
            kind: OwnerKind::ContentItem,
            id,
        }
    }

    pub fn term(id: i64) -> Self {
        Self {
            kind: OwnerKind::TaxonomyTerm,
            id,
        }
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.as_str(), self.id)
    }
}

/// One of the two alternate languages an owner can point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    Id,
}

impl Locale {
    /// Both locales, in emission order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Id];

    /// Key under which the URL is persisted in the metadata store.
    pub fn meta_key(&self) -> &'static str {
        match self {
            Locale::En => "_hreflang_en",
            Locale::Id => "_hreflang_id",
        }
    }

    /// Name of the posted form field (also the input's DOM id).
    pub fn form_field(&self) -> &'static str {
        match self {
            Locale::En => "hreflang_en",
            Locale::Id => "hreflang_id",
        }
    }

    /// Value of the `hreflang` attribute.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Locale::En => r#"English URL (hreflang="en"):"#,
            Locale::Id => r#"Indonesian URL (hreflang="id"):"#,
        }
    }
}

/// Alternate-language URLs stored against a single owner.
///
/// Absence of a value is a valid state; empty stored strings load as `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HreflangMetadata {
    pub owner: OwnerRef,
    pub english_url: Option<String>,
    pub indonesian_url: Option<String>,
}

impl HreflangMetadata {
    pub fn empty(owner: OwnerRef) -> Self {
        Self {
            owner,
            english_url: None,
            indonesian_url: None,
        }
    }

    pub fn url(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::En => self.english_url.as_deref(),
            Locale::Id => self.indonesian_url.as_deref(),
        }
    }

    pub fn set(&mut self, locale: Locale, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match locale {
            Locale::En => self.english_url = value,
            Locale::Id => self.indonesian_url = value,
        }
    }
}
