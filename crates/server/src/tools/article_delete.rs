//! article_delete tool implementation.
//!
//! Removes a stored article together with its citations.

use broadsheet_core::{ArticleDb, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the article_delete tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArticleDeleteParams {
    /// The id of the stored article.
    pub id: String,
}

/// Output from the article_delete tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArticleDeleteOutput {
    /// Whether a stored article was removed.
    pub deleted: bool,
}

/// Implementation of the article_delete tool.
pub async fn delete_impl(db: &ArticleDb, params: ArticleDeleteParams) -> Result<CallToolResult, McpError> {
    if params.id.trim().is_empty() {
        return Err(Error::InvalidInput("id cannot be empty".into()).into());
    }

    let deleted = db.delete_article(&params.id).await?;
    let output = ArticleDeleteOutput { deleted };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
