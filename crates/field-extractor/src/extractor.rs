use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use crate::boundary::{BoundaryPolicy, Dialect};
use crate::map::CanonicalFieldMap;
use crate::vocabulary::FieldKey;

struct LabelRule {
    key: FieldKey,
    label: Regex,
}

/// One compiled label per key, in vocabulary order. Shared by every dialect.
static LABEL_BANK: Lazy<Vec<LabelRule>> = Lazy::new(|| {
    FieldKey::ALL
        .iter()
        .map(|key| LabelRule {
            key: *key,
            label: Regex::new(&format!(r"(?i)\b(?:{})\b", key.label_pattern()))
                .expect("label pattern compiles"),
        })
        .collect()
});

/// Maps free-form clinical text to a [`CanonicalFieldMap`].
#[derive(Debug)]
pub struct FieldExtractor {
    boundary: Box<dyn BoundaryPolicy>,
}

impl FieldExtractor {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            boundary: dialect.policy(),
        }
    }

    pub fn with_policy(boundary: Box<dyn BoundaryPolicy>) -> Self {
        Self { boundary }
    }

    pub fn dialect_name(&self) -> &'static str {
        self.boundary.name()
    }

    #[instrument(skip_all, fields(dialect = self.boundary.name(), chars = text.len()))]
    pub fn extract(&self, text: &str) -> CanonicalFieldMap {
        let mut fields = CanonicalFieldMap::default();
        for rule in LABEL_BANK.iter() {
            if let Some(value) = self.first_value(&rule.label, text) {
                fields.insert_first(rule.key, value);
            }
        }
        debug!(found = fields.len(), "extraction finished");
        fields
    }

    /// First label occurrence that yields a non-empty value.
    fn first_value(&self, label: &Regex, text: &str) -> Option<String> {
        for found in label.find_iter(text) {
            let after_label = &text[found.end()..];
            let Some(separator) = self.boundary.separator_len(after_label) else {
                continue;
            };
            let rest = &after_label[separator..];
            let end = self.boundary.value_end(rest);
            let value = clean_value(&rest[..end]);
            if !value.is_empty() {
                return Some(value);
            }
        }
        None
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|ch: char| matches!(ch, ',' | ';' | ':') || ch.is_whitespace())
        .to_string()
}
