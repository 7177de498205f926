use std::fmt::Debug;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::vocabulary::FieldKey;

fn any_label_fragment() -> String {
    FieldKey::ALL
        .iter()
        .map(|key| key.label_pattern())
        .collect::<Vec<_>>()
        .join("|")
}

/// Any recognised label immediately followed by a colon.
static LABEL_WITH_COLON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b\s*:", any_label_fragment()))
        .expect("label bank compiles")
});

/// Any recognised label followed by a colon or a copula, as dictated speech has it.
static LABEL_IN_PROSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{})\b(?:\s*:|\s+(?:is|was|of)\b)",
        any_label_fragment()
    ))
    .expect("label bank compiles")
});

static LINE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\s*[:=\-]\s*|\s+)").expect("separator compiles"));

static PROSE_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:\s*[:=\-]\s*|\s+)(?:(?:is|was|of)\s+)?").expect("separator compiles")
});

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.;!?](?:\s|$)").expect("sentence end compiles"));

/// Decides where a field value stops.
///
/// Implementations share the label vocabulary and differ only in which separators
/// they accept after a label and which markers end a value.
pub trait BoundaryPolicy: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    /// Length of the separator at the start of `after_label`, or `None` when the label
    /// is not followed by a usable separator.
    fn separator_len(&self, after_label: &str) -> Option<usize>;

    /// Byte offset in `value` where the value ends.
    fn value_end(&self, value: &str) -> usize;
}

/// Multi-line paste text: a value runs to the end of its line or to the next
/// capitalised `Label:`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineBoundary;

impl BoundaryPolicy for LineBoundary {
    fn name(&self) -> &'static str {
        "line"
    }

    fn separator_len(&self, after_label: &str) -> Option<usize> {
        LINE_SEPARATOR.find(after_label).map(|m| m.end())
    }

    fn value_end(&self, value: &str) -> usize {
        let newline = value.find('\n').unwrap_or(value.len());
        let next_label = LABEL_WITH_COLON
            .find_iter(value)
            .find(|m| starts_capitalised(m.as_str()))
            .map(|m| m.start())
            .unwrap_or(value.len());
        newline.min(next_label)
    }
}

/// Continuous dictated speech: a value runs to sentence punctuation, a newline, or
/// the next label introduced by a colon or a copula.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProseBoundary;

impl BoundaryPolicy for ProseBoundary {
    fn name(&self) -> &'static str {
        "prose"
    }

    fn separator_len(&self, after_label: &str) -> Option<usize> {
        PROSE_SEPARATOR.find(after_label).map(|m| m.end())
    }

    fn value_end(&self, value: &str) -> usize {
        let sentence = SENTENCE_END
            .find(value)
            .map(|m| m.start())
            .unwrap_or(value.len());
        let newline = value.find('\n').unwrap_or(value.len());
        let next_label = LABEL_IN_PROSE
            .find(value)
            .map(|m| m.start())
            .unwrap_or(value.len());
        sentence.min(newline).min(next_label)
    }
}

fn starts_capitalised(label: &str) -> bool {
    label
        .chars()
        .find(|ch| ch.is_alphanumeric())
        .map(|ch| ch.is_uppercase() || ch.is_ascii_digit())
        .unwrap_or(false)
}

/// Configuration-level selector for the built-in policies.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Paste text with one field per line.
    Line,
    /// Run-on dictation.
    #[default]
    Prose,
}

impl Dialect {
    pub fn policy(&self) -> Box<dyn BoundaryPolicy> {
        match self {
            Dialect::Line => Box::new(LineBoundary),
            Dialect::Prose => Box::new(ProseBoundary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_values_stop_at_newline() {
        let value = "Jane Doe\nAge: 34";
        assert_eq!(&value[..LineBoundary.value_end(value)], "Jane Doe");
    }

    #[test]
    fn line_values_ignore_lowercase_labels() {
        let value = "fever, plan: none. Age: 3";
        let end = LineBoundary.value_end(value);
        assert_eq!(&value[..end], "fever, plan: none. ");
    }

    #[test]
    fn prose_values_stop_at_sentences_but_not_decimals() {
        let value = "98.6 degrees. Pulse is 80";
        assert_eq!(&value[..ProseBoundary.value_end(value)], "98.6 degrees");
    }

    #[test]
    fn prose_values_stop_at_copula_labels() {
        let value = "120/80 and heart rate is 72";
        assert_eq!(&value[..ProseBoundary.value_end(value)], "120/80 and ");
    }

    #[test]
    fn separators() {
        assert_eq!(LineBoundary.separator_len(": 34"), Some(2));
        assert_eq!(LineBoundary.separator_len(" 34"), Some(1));
        assert_eq!(LineBoundary.separator_len("34"), None);
        assert_eq!(ProseBoundary.separator_len(" is 34"), Some(4));
        assert_eq!(ProseBoundary.separator_len(" of 34"), Some(4));
    }
}
