//! HTML fragment cleaning.
//!
//! Turns the outer HTML of matched content elements into plain paragraphs.
//! Tag stripping is regex based and best-effort: malformed markup degrades to
//! passed-through text, it never fails.

use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br.*?>").expect("invalid regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("invalid regex"));

/// Clean a sequence of fragments, dropping the ones left empty.
///
/// Surviving paragraphs keep their input order.
pub fn clean<S: AsRef<str>>(fragments: &[S]) -> Vec<String> {
    fragments.iter().filter_map(|f| clean_fragment(f.as_ref())).collect()
}

/// Clean one fragment.
///
/// `<br>` variants become newlines, every other tag is removed, the result is
/// trimmed and non-breaking spaces become ordinary spaces. Returns `None` when
/// nothing is left.
pub fn clean_fragment(fragment: &str) -> Option<String> {
    let text = LINE_BREAK.replace_all(fragment, "\n");
    let text = TAG.replace_all(text.trim(), "");
    let text = decode_entities(text.trim()).replace('\u{a0}', " ");
    let text = text.trim();

    if text.is_empty() { None } else { Some(text.to_string()) }
}

/// Decode the entities an HTML serializer emits for text and attribute values.
///
/// `&amp;` goes last so `&amp;lt;` stays a literal `&lt;`.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
