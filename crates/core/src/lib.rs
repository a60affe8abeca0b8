//! Core types and shared functionality for broadsheet.
//!
//! This crate provides:
//! - The article record shape handed to storage
//! - Unified error types
//! - Configuration structures
//! - The SQLite-backed article store

pub mod article;
pub mod config;
pub mod error;
pub mod store;

pub use article::{ArticleRecord, Citation, PublishedDate};
pub use config::{AppConfig, ConfigError, DatePolicy};
pub use error::Error;
pub use store::{ArticleDb, StoredArticle, StoredCitation};
