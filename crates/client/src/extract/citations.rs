//! Inline citation extraction.
//!
//! Each paragraph contributes one entry: the href of its first anchor, or
//! [`Citation::Absent`]. Later anchors in the same paragraph are ignored.

use std::sync::LazyLock;

use broadsheet_core::Citation;
use regex::Regex;

use super::clean::decode_entities;

static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a.*?href="(.*?)".*?>.*?</a>"#).expect("invalid regex"));

/// One citation per paragraph, in paragraph order.
///
/// The output always has the same length as the input.
pub fn extract_citations<S: AsRef<str>>(paragraphs: &[S]) -> Vec<Citation> {
    paragraphs.iter().map(|p| first_citation(p.as_ref())).collect()
}

fn first_citation(paragraph: &str) -> Citation {
    ANCHOR
        .captures(paragraph)
        .and_then(|caps| caps.get(1))
        .map(|href| decode_entities(href.as_str()))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_citations_basic() {
        let citations = extract_citations(&["no link here", "<a href=\"http://x.com\">cite</a> text"]);
        assert_eq!(citations, vec![Citation::Absent, Citation::Link("http://x.com".to_string())]);
    }

    #[test]
    fn test_extract_citations_first_only() {
        let paragraph = r#"<p>See <a href="https://a.example">one</a> and <a href="https://b.example">two</a>.</p>"#;
        let citations = extract_citations(&[paragraph]);
        assert_eq!(citations, vec![Citation::Link("https://a.example".to_string())]);
    }

    #[test]
    fn test_extract_citations_with_other_attributes() {
        let paragraph = r#"<p><a class="ref" href="/notes/1" target="_blank" rel="noopener">[1]</a></p>"#;
        assert_eq!(extract_citations(&[paragraph]), vec![Citation::Link("/notes/1".to_string())]);
    }

    #[test]
    fn test_extract_citations_decodes_query_ampersands() {
        let paragraph = r#"<a href="https://x.com/?a=1&amp;b=2">q</a>"#;
        assert_eq!(extract_citations(&[paragraph]), vec![Citation::Link("https://x.com/?a=1&b=2".to_string())]);
    }

    #[test]
    fn test_extract_citations_ignores_anchor_without_href() {
        let citations = extract_citations(&[r#"<a name="top">top</a>"#, r#"<a href='single'>quoted</a>"#]);
        assert_eq!(citations, vec![Citation::Absent, Citation::Absent]);
    }

    #[test]
    fn test_extract_citations_length_invariant() {
        let inputs: Vec<String> = vec![
            String::new(),
            "<".into(),
            "<a href=\"x\">".into(),
            "plain".into(),
            "<a href=\"y\">ok</a>".into(),
        ];
        assert_eq!(extract_citations(&inputs).len(), inputs.len());
        assert!(extract_citations::<&str>(&[]).is_empty());
    }
}
