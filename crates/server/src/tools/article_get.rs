//! article_get tool implementation.
//!
//! Retrieves a stored article by id.

use broadsheet_core::{ArticleDb, Error, StoredArticle, StoredCitation};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the article_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArticleGetParams {
    /// The id of the stored article.
    pub id: String,
}

/// Output from the article_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArticleGetOutput {
    pub article: StoredArticle,
    /// Paragraph citations, empty if none were stored.
    pub citations: Vec<StoredCitation>,
}

/// Implementation of the article_get tool.
pub async fn get_impl(db: &ArticleDb, params: ArticleGetParams) -> Result<CallToolResult, McpError> {
    let article = db
        .get_article(&params.id)
        .await?
        .ok_or_else(|| Error::ArticleNotFound(params.id.clone()))?;
    let citations = db.get_citations(&params.id).await?;

    let output = ArticleGetOutput { article, citations };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize article: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
