use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::vocabulary::FieldKey;

/// Result of one extraction pass: at most one trimmed value per canonical key.
///
/// Iteration follows vocabulary order. The map is only built by the extractor, so
/// callers receive it immutable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalFieldMap {
    fields: BTreeMap<FieldKey, String>,
}

impl CanonicalFieldMap {
    pub(crate) fn insert_first(&mut self, key: FieldKey, value: String) -> bool {
        if self.fields.contains_key(&key) {
            return false;
        }
        self.fields.insert(key, value);
        true
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.fields.get(&key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.fields.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.fields.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(FieldKey, String)> for CanonicalFieldMap {
    fn from_iter<T: IntoIterator<Item = (FieldKey, String)>>(iter: T) -> Self {
        let mut map = CanonicalFieldMap::default();
        for (key, value) in iter {
            let value = value.trim().to_string();
            if !value.is_empty() {
                map.insert_first(key, value);
            }
        }
        map
    }
}
