//! Extraction engine for broadsheet.
//!
//! This crate turns one HTML document plus a site profile into an
//! [`ArticleRecord`](broadsheet_core::ArticleRecord). It never fetches pages
//! and never touches storage; both belong to the caller.

pub mod extract;
pub mod profile;

pub use extract::{
    ArticleRequest, ExtractOptions, Extraction, Extractor, MonthNames, ProfileExtractor, clean, clean_fragment,
    extract_article, extract_citations, normalize_date,
};

pub use profile::{ProfileSet, ProfileSpec, SiteProfile};
