//! Ordered keyword rule tables shared by the text parser and the semantic
//! interpreter.

/// Rules are tried in order; the first rule with a keyword contained in the
/// lowercased text wins.
#[derive(Debug)]
pub struct KeywordTable<T: 'static> {
    rules: &'static [(T, &'static [&'static str])],
}

impl<T: Copy + PartialEq> KeywordTable<T> {
    pub const fn new(rules: &'static [(T, &'static [&'static str])]) -> Self {
        Self { rules }
    }

    pub fn classify(&self, text: &str) -> Option<T> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(rule, _)| *rule)
    }

    pub fn keywords(&self, rule: T) -> &'static [&'static str] {
        self.rules
            .iter()
            .find(|(r, _)| *r == rule)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }

    pub fn rules(&self) -> impl Iterator<Item = T> + '_ {
        self.rules.iter().map(|(rule, _)| *rule)
    }
}

/// Declares a `KeywordTable` constant from `Variant => [keywords]` rows.
macro_rules! keyword_table {
    ( $(#[$meta:meta])* $name:ident : $ty:ident { $( $variant:ident => [ $( $keyword:literal ),* $(,)? ] ),* $(,)? } ) => {
        $(#[$meta])*
        pub const $name: $crate::keywords::KeywordTable<$ty> =
            $crate::keywords::KeywordTable::<$ty>::new(&[ $( ($ty::$variant, &[ $( $keyword ),* ]), )* ]);
    };
}

pub(crate) use keyword_table;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum Color {
        Red,
        Blue,
    }

    keyword_table! {
        COLORS: Color {
            Red => ["red", "crimson"],
            Blue => ["blue", "red-ish blue"],
        }
    }

    #[test]
    fn first_matching_rule_wins() {
        assert_eq!(COLORS.classify("A Red-ish Blue sky"), Some(Color::Red));
        assert_eq!(COLORS.classify("BLUE"), Some(Color::Blue));
        assert_eq!(COLORS.classify("green"), None);
    }

    #[test]
    fn keywords_are_listed_per_rule() {
        assert_eq!(COLORS.keywords(Color::Red), &["red", "crimson"]);
        assert_eq!(COLORS.rules().collect::<Vec<_>>(), vec![Color::Red, Color::Blue]);
    }
}
