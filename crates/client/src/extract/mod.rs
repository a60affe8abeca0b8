//! Profile-driven article extraction.
//!
//! Provides a stable extraction abstraction over a parsed HTML document.
//!
//! ### Field Resolution
//! - `title`, `author`: first non-blank text of the profile selector's matches.
//! - `content`: outer HTML of every match, cleaned into paragraphs and joined
//!   with a blank line.
//! - `publisher`: the profile's own `name`, never read from the page.
//! - `published_date`: outer HTML of the first `published_time` match, captured
//!   with the profile regex and normalized to `YYYY-MM-DD`.
//!
//! ### Failure Policy
//! - Title, content and the raw date are required; a miss aborts the record.
//! - A missing author is `None` unless the profile or options require it.
//! - Date normalization failures follow [`DatePolicy`].
//!
//! The extractor holds no per-call state and can be shared across threads.

pub mod citations;
pub mod clean;
pub mod date;

pub use citations::extract_citations;
pub use clean::{clean, clean_fragment};
pub use date::{ENGLISH_MONTHS, MonthNames, capture_working_date, normalize_date, normalize_working_date};

use broadsheet_core::store::hash::compute_article_id;
use broadsheet_core::{AppConfig, ArticleRecord, Citation, DatePolicy, Error, PublishedDate};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::profile::SiteProfile;

/// Separator placed between clean paragraphs in `content`.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Caller policy for one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Handling of captured dates that fail normalization.
    pub date_policy: DatePolicy,
    /// Require an author for every site, on top of per-profile `require_author`.
    pub require_author: bool,
    /// Also extract the per-paragraph citation list.
    pub citations: bool,
}

impl From<&AppConfig> for ExtractOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            date_policy: config.date_policy,
            require_author: config.require_author,
            citations: config.extract_citations,
        }
    }
}

/// Identity of the article being extracted.
#[derive(Debug, Clone, Copy)]
pub struct ArticleRequest<'a> {
    /// Caller-assigned id; derived from `source_url` when absent.
    pub id: Option<&'a str>,
    pub source_url: &'a str,
}

impl<'a> ArticleRequest<'a> {
    pub fn new(source_url: &'a str) -> Self {
        Self { id: None, source_url }
    }

    pub fn with_id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

/// Result of one extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub record: ArticleRecord,
    /// Clean paragraphs, in reading order.
    pub paragraphs: Vec<String>,
    /// One entry per paragraph, when citation extraction was requested.
    pub citations: Option<Vec<Citation>>,
}

/// Stable extractor trait for article extraction.
///
/// This allows swapping the extraction engine later without changing tool code.
pub trait Extractor: Send + Sync {
    /// Extract an article from a parsed document using a site profile.
    fn extract(
        &self, document: &Html, profile: &SiteProfile, request: ArticleRequest<'_>,
    ) -> Result<Extraction, Error>;
}

/// Selector-based extractor driven entirely by the site profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileExtractor {
    options: ExtractOptions,
}

impl ProfileExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    fn resolve_date(&self, raw: &str, profile: &SiteProfile) -> Result<PublishedDate, Error> {
        let working = capture_working_date(raw, &profile.published_time_regex)?;

        match normalize_working_date(working, &profile.months) {
            Ok(date) => Ok(PublishedDate::Iso(date)),
            Err(e) if e.is_date_error() => match self.options.date_policy {
                DatePolicy::Strict => Err(e),
                DatePolicy::KeepRaw => {
                    tracing::warn!(profile = %profile.id, working, error = %e, "keeping raw published date");
                    Ok(PublishedDate::Raw(working.to_string()))
                }
                DatePolicy::Unknown => {
                    tracing::warn!(profile = %profile.id, working, error = %e, "published date unknown");
                    Ok(PublishedDate::Unknown)
                }
            },
            Err(e) => Err(e),
        }
    }
}

impl Extractor for ProfileExtractor {
    fn extract(
        &self, document: &Html, profile: &SiteProfile, request: ArticleRequest<'_>,
    ) -> Result<Extraction, Error> {
        let source_url = request.source_url.trim();
        Url::parse(source_url).map_err(|e| Error::InvalidUrl(format!("{source_url}: {e}")))?;

        let title = first_text(document, &profile.title).ok_or_else(|| Error::Extraction("article_title".into()))?;

        let fragments: Vec<String> = document.select(&profile.content).map(|e| e.html()).collect();
        if fragments.is_empty() {
            return Err(Error::Extraction("article_content".into()));
        }

        let author = first_text(document, &profile.author);
        if author.is_none() {
            if profile.require_author || self.options.require_author {
                return Err(Error::Extraction("author_name".into()));
            }
            tracing::debug!(profile = %profile.id, source_url, "no author found");
        }

        let raw_date = document
            .select(&profile.published_time)
            .next()
            .map(|e| e.html())
            .ok_or_else(|| Error::Extraction("published_time".into()))?;
        let published_date = self.resolve_date(&raw_date, profile)?;

        // Citations are taken from the fragments that survive cleaning so both
        // sequences stay aligned.
        let (paragraphs, kept): (Vec<String>, Vec<&str>) = fragments
            .iter()
            .filter_map(|f| clean_fragment(f).map(|p| (p, f.as_str())))
            .unzip();
        let citations = self.options.citations.then(|| extract_citations(&kept));

        if paragraphs.is_empty() {
            tracing::warn!(profile = %profile.id, source_url, fragments = fragments.len(), "content cleaned to nothing");
        }

        let id = request.id.map_or_else(|| compute_article_id(source_url), str::to_string);
        let record = ArticleRecord {
            id,
            title,
            content: paragraphs.join(PARAGRAPH_SEPARATOR),
            publisher: profile.name.clone(),
            author,
            published_date,
            source_url: source_url.to_string(),
        };

        tracing::debug!(
            profile = %profile.id,
            id = %record.id,
            paragraphs = paragraphs.len(),
            date_kind = record.published_date.kind(),
            "extracted article"
        );

        Ok(Extraction { record, paragraphs, citations })
    }
}

/// Extract an article from raw HTML with the given options.
///
/// This is a convenience function that parses the document and runs a
/// [`ProfileExtractor`].
pub fn extract_article(
    html: &str, profile: &SiteProfile, request: ArticleRequest<'_>, options: ExtractOptions,
) -> Result<Extraction, Error> {
    let document = Html::parse_document(html);
    ProfileExtractor::new(options).extract(&document, profile, request)
}

/// First non-blank text among the selector's matches, whitespace collapsed.
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).map(element_text).find(|t| !t.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
