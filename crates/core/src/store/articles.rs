//! Article CRUD operations.

use super::citations::{citation_rows, replace_citations};
use super::connection::ArticleDb;
use crate::{ArticleRecord, Citation, Error, PublishedDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, Row};

/// An article as read back from the store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StoredArticle {
    #[serde(flatten)]
    pub record: ArticleRecord,
    /// RFC 3339 timestamp of the last write.
    pub stored_at: String,
}

const SELECT_COLUMNS: &str = "SELECT id, title, content, publisher, author, published_date,
        published_date_kind, source_url, stored_at
    FROM articles";

fn row_to_article(row: &Row<'_>) -> rusqlite::Result<StoredArticle> {
    let kind: String = row.get(6)?;
    Ok(StoredArticle {
        record: ArticleRecord {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            publisher: row.get(3)?,
            author: row.get(4)?,
            published_date: PublishedDate::from_parts(&kind, row.get(5)?),
            source_url: row.get(7)?,
        },
        stored_at: row.get(8)?,
    })
}

fn upsert_article(
    conn: &rusqlite::Connection, record: &ArticleRecord, stored_at: &str,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO articles (
            id, title, content, publisher, author,
            published_date, published_date_kind, source_url, stored_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            content = excluded.content,
            publisher = excluded.publisher,
            author = excluded.author,
            published_date = excluded.published_date,
            published_date_kind = excluded.published_date_kind,
            source_url = excluded.source_url,
            stored_at = excluded.stored_at",
        params![
            &record.id,
            &record.title,
            &record.content,
            &record.publisher,
            &record.author,
            record.published_date.value(),
            record.published_date.kind(),
            &record.source_url,
            stored_at,
        ],
    )?;
    Ok(())
}

impl ArticleDb {
    /// Persist one extracted article.
    ///
    /// Upserts the record keyed by id and replaces its stored citations in a
    /// single transaction. With `citations` set to `None` any earlier
    /// citations are removed, so stored pairs always describe the current
    /// `content`. Misaligned paragraphs/citations are rejected before
    /// anything is written.
    pub async fn store_article(
        &self, record: &ArticleRecord, citations: Option<(&[String], &[Citation])>,
    ) -> Result<(), Error> {
        let rows = match citations {
            Some((paragraphs, citations)) => citation_rows(&record.id, paragraphs, citations)?,
            None => Vec::new(),
        };
        let record = record.clone();
        let stored_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                upsert_article(&tx, &record, &stored_at)?;
                replace_citations(&tx, &record.id, &rows)?;
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Get an article by id.
    ///
    /// Returns None if no article is stored under the id.
    pub async fn get_article(&self, id: &str) -> Result<Option<StoredArticle>, Error> {
        let id = id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<StoredArticle>, Error> {
                let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
                match stmt.query_row(params![id], row_to_article) {
                    Ok(article) => Ok(Some(article)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Delete an article and, through the foreign key, its citations.
    ///
    /// Returns whether a row was removed.
    pub async fn delete_article(&self, id: &str) -> Result<bool, Error> {
        let id = id.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let count = conn.execute("DELETE FROM articles WHERE id = ?1", params![id])?;
                Ok(count > 0)
            })
            .await
            .map_err(Error::from)
    }
}
