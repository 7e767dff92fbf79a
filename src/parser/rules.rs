use crate::keywords::keyword_table;

/// How a sentence is turned into graph structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceRule {
    Start,
    End,
    Condition,
}

keyword_table! {
    /// Sentence rules in evaluation order. A sentence matching none of them
    /// becomes a `process` node.
    SENTENCE_RULES: SentenceRule {
        Start => ["начало", "start", "старт", "begin"],
        End => ["конец", "end", "финиш", "finish", "stop", "завершение"],
        Condition => ["если", "if", "условие", "condition", "проверить", "check", "?"],
    }
}

/// Built-in condition templates, tried in order. Three capture groups mean
/// condition, positive branch and negative branch; one group is the
/// condition alone.
pub const CONDITION_TEMPLATES: &[&str] = &[
    r"если\s+(.+?)\s*,?\s*то\s+(.+?)(?:иначе|else)\s+(.+)$",
    r"if\s+(.+?)\s*then\s+(.+?)else\s+(.+)$",
    r"проверить\s+(.+)$",
    r"check\s+(.+)$",
    r"условие[:\s]+(.+)$",
    r"condition[:\s]+(.+)$",
];
