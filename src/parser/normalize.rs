use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^\w\s.,;:!?\-()\[\]{}"'/\\]"#).unwrap());

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?;]+").unwrap());

/// Prepares free text for parsing: trims it, collapses whitespace runs to a
/// single space and drops every character that is neither a word character,
/// whitespace nor common punctuation.
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text.trim(), " ");
    DISALLOWED.replace_all(&collapsed, "").into_owned()
}

/// Splits on runs of `.`, `!`, `?` and `;`, trimming each piece and dropping
/// the empty ones.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
