//! Unified error types for broadsheet.
//!
//! Every variant renders with an upper-case code prefix so callers can match
//! on the message alone.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for extraction, profiles, and storage.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty HTML).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// A required profile selector or pattern matched nothing in the document.
    #[error("EXTRACTION_ERROR: no match for required field `{0}`")]
    Extraction(String),

    /// A date was recognized structurally but is not a valid calendar date.
    #[error("DATE_FORMAT_ERROR: {0}")]
    DateFormat(String),

    /// No known date shape matched the working date string.
    #[error("UNRECOGNIZED_DATE_FORMAT: {0}")]
    UnrecognizedDateFormat(String),

    /// A site profile is missing a key or carries a malformed selector/pattern.
    #[error("INVALID_PROFILE: {profile}: {reason}")]
    InvalidProfile { profile: String, reason: String },

    /// No profile is registered under the requested id.
    #[error("PROFILE_NOT_FOUND: {0}")]
    ProfileNotFound(String),

    /// Invalid source URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// No stored article for the given id.
    #[error("ARTICLE_NOT_FOUND: {0}")]
    ArticleNotFound(String),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),
}

impl Error {
    /// Shorthand for building an [`Error::InvalidProfile`].
    pub fn invalid_profile(profile: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidProfile { profile: profile.into(), reason: reason.into() }
    }

    /// Whether this error came out of date normalization rather than field lookup.
    pub fn is_date_error(&self) -> bool {
        matches!(self, Error::DateFormat(_) | Error::UnrecognizedDateFormat(_))
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::Extraction(_) => -32000,
            Error::DateFormat(_) => -32001,
            Error::UnrecognizedDateFormat(_) => -32002,
            Error::InvalidProfile { .. } => -32003,
            Error::ProfileNotFound(_) => -32004,
            Error::InvalidUrl(_) => -32005,
            Error::ArticleNotFound(_) => -32006,
            Error::Database(_) | Error::MigrationFailed(_) => -32007,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
