//! Article record shape produced by extraction and consumed by the store.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A normalized article, built once per extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    /// Clean paragraphs joined with a blank line.
    pub content: String,
    /// Static publisher name taken from the site profile.
    pub publisher: String,
    pub author: Option<String>,
    pub published_date: PublishedDate,
    pub source_url: String,
}

/// Publication date after normalization.
///
/// `Raw` and `Unknown` mark records whose date could not be normalized but
/// which were still kept under the configured date policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PublishedDate {
    /// Canonical `YYYY-MM-DD`.
    Iso(String),
    /// Best-effort string as captured from the page.
    Raw(String),
    Unknown,
}

impl PublishedDate {
    /// Stored value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            PublishedDate::Iso(s) | PublishedDate::Raw(s) => Some(s),
            PublishedDate::Unknown => None,
        }
    }

    /// Stable discriminator used in the `published_date_kind` column.
    pub fn kind(&self) -> &'static str {
        match self {
            PublishedDate::Iso(_) => "iso",
            PublishedDate::Raw(_) => "raw",
            PublishedDate::Unknown => "unknown",
        }
    }

    /// Rebuild from the stored `(kind, value)` pair.
    ///
    /// Unknown kinds or a missing value degrade to [`PublishedDate::Unknown`].
    pub fn from_parts(kind: &str, value: Option<String>) -> Self {
        match (kind, value) {
            ("iso", Some(v)) => PublishedDate::Iso(v),
            ("raw", Some(v)) => PublishedDate::Raw(v),
            _ => PublishedDate::Unknown,
        }
    }
}

/// Citation for a single paragraph.
///
/// Serializes as the href string, or `null` for the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Citation {
    /// href of the first anchor in the paragraph.
    Link(String),
    /// The paragraph carries no citation.
    Absent,
}

impl Citation {
    pub fn href(&self) -> Option<&str> {
        match self {
            Citation::Link(href) => Some(href),
            Citation::Absent => None,
        }
    }
}

impl From<Option<String>> for Citation {
    fn from(href: Option<String>) -> Self {
        href.map_or(Citation::Absent, Citation::Link)
    }
}
