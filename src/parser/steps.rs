use super::normalize::split_sentences;
use regex::Regex;
use std::sync::LazyLock;

/// A phrase marker and the text that ends the phrase it introduces.
struct StepPattern {
    marker: Regex,
    stop: Regex,
}

static STEP_PATTERNS: LazyLock<Vec<StepPattern>> = LazyLock::new(|| {
    [
        (r"(?i)(?:шаг|step)\s*\d+[:.]?\s*", r"(?i)шаг|step|\."),
        (
            r"(?i)(?:затем|then|далее|next)[:\s]+",
            r"(?i)затем|then|далее|next|\.",
        ),
        (r"(?i)(?:выполнить|execute|сделать|do)[:\s]+", r"\."),
    ]
    .into_iter()
    .map(|(marker, stop)| StepPattern {
        marker: Regex::new(marker).unwrap(),
        stop: Regex::new(stop).unwrap(),
    })
    .collect()
});

/// Pulls out step phrases ("step 1: ...", "then ...", "execute ...").
///
/// Each pattern is applied over the whole text in turn, so the result lists
/// all numbered steps first, then all "then" phrases, then all "execute"
/// phrases. Text with no step phrases falls back to its sentences.
pub fn extract_steps(text: &str) -> Vec<String> {
    let mut steps = Vec::new();
    for pattern in STEP_PATTERNS.iter() {
        for marker in pattern.marker.find_iter(text) {
            let rest = &text[marker.end()..];
            let end = pattern.stop.find(rest).map_or(rest.len(), |m| m.start());
            let step = rest[..end].trim();
            if !step.is_empty() {
                steps.push(step.to_string());
            }
        }
    }

    if steps.is_empty() {
        steps = split_sentences(text).into_iter().map(String::from).collect();
    }
    steps
}
