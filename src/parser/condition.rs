use crate::error::ParseError;
use regex::Regex;

/// What a condition template pulled out of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionMatch {
    /// "if X then Y else Z"
    Branches {
        condition: String,
        positive: String,
        negative: String,
    },
    /// "check X"
    Subject(String),
}

/// A compiled, case-insensitive condition pattern.
#[derive(Debug, Clone)]
pub struct ConditionTemplate {
    regex: Regex,
}

impl ConditionTemplate {
    pub fn new(pattern: &str) -> Result<Self, ParseError> {
        let regex = Regex::new(&format!("(?i){}", pattern)).map_err(|e| {
            ParseError::InvalidTemplate {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;
        let groups = regex.captures_len() - 1;
        if groups != 1 && groups != 3 {
            return Err(ParseError::TemplateGroups {
                pattern: pattern.to_string(),
                groups,
            });
        }
        Ok(Self { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Captured text is trimmed. A template with three groups always yields
    /// `Branches`, even when a branch captured only whitespace.
    pub fn extract(&self, sentence: &str) -> Option<ConditionMatch> {
        let caps = self.regex.captures(sentence)?;
        let group = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default()
        };
        if caps.len() == 4 {
            Some(ConditionMatch::Branches {
                condition: group(1),
                positive: group(2),
                negative: group(3),
            })
        } else {
            Some(ConditionMatch::Subject(group(1)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::rules::CONDITION_TEMPLATES;

    #[test]
    fn russian_if_then_else_is_case_insensitive() {
        let template = ConditionTemplate::new(CONDITION_TEMPLATES[0]).unwrap();
        assert_eq!(
            template.extract("ЕСЛИ баланс больше нуля, то списать иначе отказать"),
            Some(ConditionMatch::Branches {
                condition: "баланс больше нуля".to_string(),
                positive: "списать".to_string(),
                negative: "отказать".to_string(),
            })
        );
    }

    #[test]
    fn single_group_template_yields_subject() {
        let template = ConditionTemplate::new(CONDITION_TEMPLATES[3]).unwrap();
        assert_eq!(
            template.extract("Check the input"),
            Some(ConditionMatch::Subject("the input".to_string()))
        );
        assert_eq!(template.extract("nothing here"), None);
    }

    #[test]
    fn wrong_group_count_is_rejected() {
        let err = ConditionTemplate::new(r"(a)(b)").unwrap_err();
        assert!(matches!(err, ParseError::TemplateGroups { groups: 2, .. }));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = ConditionTemplate::new(r"(unclosed").unwrap_err();
        assert!(matches!(err, ParseError::InvalidTemplate { .. }));
    }
}
