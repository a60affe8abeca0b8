//! SQLite-backed store for extracted articles and their citations.
//!
//! This is the persistence collaborator behind `store_article`. It uses
//! tokio-rusqlite so the async callers never block on disk I/O, and supports:
//!
//! - Upsert of article records keyed by id
//! - Paragraph/citation pairs stored alongside their article
//! - Automatic schema migrations
//! - WAL mode for concurrent access

pub mod articles;
pub mod citations;
pub mod connection;
pub mod hash;
pub mod migrations;

pub use crate::Error;

pub use articles::StoredArticle;
pub use citations::StoredCitation;
pub use connection::ArticleDb;
