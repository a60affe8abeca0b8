//! article_extract tool implementation.
//!
//! Runs the profile-driven extractor over caller-supplied HTML and, unless
//! told otherwise, hands the record to the article store.
//! No network I/O is performed.

use broadsheet_client::{ArticleRequest, ExtractOptions, ProfileSet, extract_article};
use broadsheet_core::{ArticleDb, ArticleRecord, Citation, Error};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for article_extract tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArticleExtractParams {
    /// The raw HTML of the article page.
    pub html: String,

    /// Id of the site profile to extract with (see profile_list).
    pub profile: String,

    /// URL the HTML was fetched from.
    pub source_url: String,

    /// Article id. Derived from source_url when omitted.
    #[serde(default)]
    pub id: Option<String>,

    /// Extract per-paragraph citations. Defaults to the server setting.
    #[serde(default)]
    pub citations: Option<bool>,

    /// Persist the record, replacing any citations stored under the same id.
    #[serde(default = "default_true")]
    pub store: bool,
}

fn default_true() -> bool {
    true
}

/// Output structure for article_extract tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArticleExtractOutput {
    /// The normalized article record.
    pub article: ArticleRecord,
    /// Number of clean paragraphs in the content.
    pub paragraph_count: usize,
    /// First citation of each paragraph, `null` where there is none.
    pub citations: Option<Vec<Citation>>,
    /// Whether the record was written to the store.
    pub stored: bool,
}

/// Implementation of the article_extract tool.
pub async fn extract_impl(
    db: &ArticleDb, profiles: &ProfileSet, defaults: ExtractOptions, params: ArticleExtractParams,
) -> Result<CallToolResult, McpError> {
    if params.html.trim().is_empty() {
        return Err(Error::InvalidInput("html cannot be empty".into()).into());
    }

    let profile = profiles.get(&params.profile)?;
    let options = ExtractOptions { citations: params.citations.unwrap_or(defaults.citations), ..defaults };
    let mut request = ArticleRequest::new(&params.source_url);
    if let Some(id) = params.id.as_deref() {
        request = request.with_id(id);
    }

    let extraction = extract_article(&params.html, profile, request, options)?;

    if params.store {
        let citations = extraction
            .citations
            .as_deref()
            .map(|citations| (extraction.paragraphs.as_slice(), citations));
        db.store_article(&extraction.record, citations).await?;
        tracing::info!(id = %extraction.record.id, profile = %profile.id, "stored article");
    }

    let output = ArticleExtractOutput {
        paragraph_count: extraction.paragraphs.len(),
        article: extraction.record,
        citations: extraction.citations,
        stored: params.store,
    };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize article: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use broadsheet_core::{DatePolicy, PublishedDate};

    const PROFILES: &str = r#"
        [profiles.example]
        name = "Example Times"
        article_title = "h1"
        article_content = "article p"
        author_name = ".byline"
        published_time = ".dateline"
        published_time_regex = '>Published: (.*?)<'
    "#;

    const TEST_HTML: &str = r#"
        <html>
        <body>
            <h1>Harbor Reopens</h1>
            <p class="byline">Sam Reporter</p>
            <p class="dateline">Published: November 27th 2020</p>
            <article>
                <p>The harbor reopened on Friday.</p>
                <p>Officials cited <a href="https://example.com/report">a new report</a>.</p>
            </article>
        </body>
        </html>
    "#;

    fn params(html: &str) -> ArticleExtractParams {
        ArticleExtractParams {
            html: html.into(),
            profile: "example".into(),
            source_url: "https://example.com/harbor".into(),
            id: Some("harbor-1".into()),
            citations: Some(true),
            store: true,
        }
    }

    #[tokio::test]
    async fn test_extract_and_store() {
        let db = ArticleDb::open_in_memory().await.unwrap();
        let profiles = ProfileSet::from_toml_str(PROFILES).unwrap();

        let result = extract_impl(&db, &profiles, ExtractOptions::default(), params(TEST_HTML)).await;
        assert!(result.is_ok(), "extraction should succeed");
        assert!(!result.unwrap().is_error.unwrap_or(false));

        let stored = db.get_article("harbor-1").await.unwrap().unwrap();
        assert_eq!(stored.record.title, "Harbor Reopens");
        assert_eq!(stored.record.author.as_deref(), Some("Sam Reporter"));
        assert_eq!(stored.record.published_date, PublishedDate::Iso("2020-11-27".into()));
        assert_eq!(
            stored.record.content,
            "The harbor reopened on Friday.\n\nOfficials cited a new report."
        );

        let citations = db.get_citations("harbor-1").await.unwrap();
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0].citation, Citation::Absent);
        assert_eq!(citations[1].citation, Citation::Link("https://example.com/report".into()));
    }

    #[tokio::test]
    async fn test_extract_without_store() {
        let db = ArticleDb::open_in_memory().await.unwrap();
        let profiles = ProfileSet::from_toml_str(PROFILES).unwrap();

        let result = extract_impl(
            &db,
            &profiles,
            ExtractOptions::default(),
            ArticleExtractParams { store: false, ..params(TEST_HTML) },
        )
        .await;
        assert!(result.is_ok());
        assert!(db.get_article("harbor-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_extract_empty_html_fails() {
        let db = ArticleDb::open_in_memory().await.unwrap();
        let profiles = ProfileSet::from_toml_str(PROFILES).unwrap();

        let result = extract_impl(&db, &profiles, ExtractOptions::default(), params("  ")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_extract_unknown_profile_fails() {
        let db = ArticleDb::open_in_memory().await.unwrap();
        let profiles = ProfileSet::from_toml_str(PROFILES).unwrap();

        let params = ArticleExtractParams { profile: "nope".into(), ..params(TEST_HTML) };
        let err = extract_impl(&db, &profiles, ExtractOptions::default(), params).await.unwrap_err();
        assert!(err.message.contains("PROFILE_NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_missing_title_stores_nothing() {
        let db = ArticleDb::open_in_memory().await.unwrap();
        let profiles = ProfileSet::from_toml_str(PROFILES).unwrap();

        let html = TEST_HTML.replace("<h1>Harbor Reopens</h1>", "");
        let err = extract_impl(&db, &profiles, ExtractOptions::default(), params(&html)).await.unwrap_err();
        assert!(err.message.contains("EXTRACTION_ERROR"));
        assert!(db.get_article("harbor-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_strict_policy_from_server_defaults() {
        let db = ArticleDb::open_in_memory().await.unwrap();
        let profiles = ProfileSet::from_toml_str(PROFILES).unwrap();
        let defaults = ExtractOptions { date_policy: DatePolicy::Strict, ..Default::default() };

        let html = TEST_HTML.replace("November 27th 2020", "April 31st 2021");
        let err = extract_impl(&db, &profiles, defaults, params(&html)).await.unwrap_err();
        assert!(err.message.contains("DATE_FORMAT_ERROR"));
    }

    #[tokio::test]
    async fn test_reextract_without_citations_drops_stale_rows() {
        let db = ArticleDb::open_in_memory().await.unwrap();
        let profiles = ProfileSet::from_toml_str(PROFILES).unwrap();

        extract_impl(&db, &profiles, ExtractOptions::default(), params(TEST_HTML))
            .await
            .unwrap();
        assert_eq!(db.get_citations("harbor-1").await.unwrap().len(), 2);

        let html = TEST_HTML.replace(
            r#"<p>The harbor reopened on Friday.</p>
                <p>Officials cited <a href="https://example.com/report">a new report</a>.</p>"#,
            "<p>Brand new text</p>",
        );
        assert_ne!(html, TEST_HTML);
        let params = ArticleExtractParams { citations: Some(false), ..params(&html) };
        extract_impl(&db, &profiles, ExtractOptions::default(), params).await.unwrap();

        let stored = db.get_article("harbor-1").await.unwrap().unwrap();
        assert_eq!(stored.record.content, "Brand new text");
        assert!(db.get_citations("harbor-1").await.unwrap().is_empty());
    }
}
