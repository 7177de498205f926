use serde::{Deserialize, Serialize};

/// How aggressively the surveyor drops controls that look hidden.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityMode {
    /// Drop zero-size, `visibility: hidden`, `display: none` and fully transparent controls.
    #[default]
    Strict,
    /// Drop only `display: none`, and not even that for allowlisted fields.
    Lenient,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyPolicy {
    pub visibility: VisibilityMode,
    /// Lower-case fragments of `name`/`id` attributes that are always surveyed in
    /// lenient mode.
    pub allowlist: Vec<String>,
    /// Longest container text still usable as a label.
    pub container_label_max_chars: usize,
}

impl SurveyPolicy {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self {
            visibility: VisibilityMode::Lenient,
            ..Self::default()
        }
    }

    pub(crate) fn allowlisted(&self, name: Option<&str>, dom_id: Option<&str>) -> bool {
        [name, dom_id].into_iter().flatten().any(|attr| {
            let attr = attr.to_lowercase();
            self.allowlist
                .iter()
                .any(|fragment| !fragment.is_empty() && attr.contains(fragment.as_str()))
        })
    }
}

impl Default for SurveyPolicy {
    fn default() -> Self {
        Self {
            visibility: VisibilityMode::Strict,
            allowlist: vec![
                "complaint".into(),
                "history".into(),
                "hpi".into(),
                "assessment".into(),
                "diagnosis".into(),
                "plan".into(),
            ],
            container_label_max_chars: 100,
        }
    }
}
