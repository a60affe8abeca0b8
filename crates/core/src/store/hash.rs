//! Derived article ids.

use sha2::{Digest, Sha256};

/// Compute a stable article id from its source URL.
///
/// Used when the caller does not supply an id of its own, so re-extracting
/// the same page overwrites the earlier record.
pub fn compute_article_id(source_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_url.trim().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_stability() {
        let id1 = compute_article_id("https://example.com/story");
        let id2 = compute_article_id("https://example.com/story");
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_id_ignores_surrounding_whitespace() {
        assert_eq!(compute_article_id(" https://example.com/story\n"), compute_article_id("https://example.com/story"));
    }

    #[test]
    fn test_id_different_url() {
        assert_ne!(compute_article_id("https://example.com/a"), compute_article_id("https://example.com/b"));
    }

    #[test]
    fn test_id_format() {
        let id = compute_article_id("https://example.com");
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
