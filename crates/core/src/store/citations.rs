//! Paragraph/citation pairs for stored articles.

use super::connection::ArticleDb;
use crate::{Citation, Error};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// One clean paragraph with the citation found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StoredCitation {
    /// Zero-based reading-order position within the article.
    pub position: i64,
    pub paragraph: String,
    pub citation: Citation,
}

pub(super) type CitationRow = (String, Option<String>);

/// Pair paragraphs with their citation hrefs, rejecting misaligned input.
pub(super) fn citation_rows(
    article_id: &str, paragraphs: &[String], citations: &[Citation],
) -> Result<Vec<CitationRow>, Error> {
    if paragraphs.len() != citations.len() {
        return Err(Error::InvalidInput(format!(
            "{} paragraphs but {} citations for article {article_id}",
            paragraphs.len(),
            citations.len()
        )));
    }

    Ok(paragraphs
        .iter()
        .cloned()
        .zip(citations.iter().map(|c| c.href().map(str::to_string)))
        .collect())
}

/// Delete an article's citations and insert `rows` in their place.
pub(super) fn replace_citations(
    conn: &rusqlite::Connection, article_id: &str, rows: &[CitationRow],
) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM citations WHERE article_id = ?1", params![article_id])?;
    let mut stmt =
        conn.prepare("INSERT INTO citations (article_id, position, paragraph, href) VALUES (?1, ?2, ?3, ?4)")?;
    for (position, (paragraph, href)) in rows.iter().enumerate() {
        stmt.execute(params![article_id, position as i64, paragraph, href])?;
    }
    Ok(())
}

impl ArticleDb {
    /// Citations for an article in reading order.
    ///
    /// Empty when the article was stored without citation extraction.
    pub async fn get_citations(&self, article_id: &str) -> Result<Vec<StoredCitation>, Error> {
        let article_id = article_id.to_string();
        self.conn
            .call(move |conn| -> Result<Vec<StoredCitation>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT position, paragraph, href FROM citations WHERE article_id = ?1 ORDER BY position",
                )?;
                let citations = stmt
                    .query_map(params![article_id], |row| {
                        Ok(StoredCitation {
                            position: row.get(0)?,
                            paragraph: row.get(1)?,
                            citation: Citation::from(row.get::<_, Option<String>>(2)?),
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(citations)
            })
            .await
            .map_err(Error::from)
    }
}
