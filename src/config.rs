//! Deployment configuration, loaded from YAML.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use completion_detector::DetectorConfig;
use coordination_hub::CoordinationConfig;
use field_extractor::{Dialect, FieldKey};
use field_matcher::{MatchPolicy, SynonymTable};
use fill_executor::FillPolicy;
use form_surveyor::SurveyPolicy;

pub const SOURCE_ORIGIN_ENV: &str = "SCRIBEBRIDGE_SOURCE_ORIGIN";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub extractor: ExtractorSection,
    pub survey: SurveySection,
    pub matcher: MatcherSection,
    pub fill: FillPolicy,
    pub completion: DetectorConfig,
    pub coordination: CoordinationSection,
}

impl BridgeConfig {
    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Applies `SCRIBEBRIDGE_SOURCE_ORIGIN` when set and non-empty.
    pub fn apply_env(&mut self) {
        if let Ok(origin) = std::env::var(SOURCE_ORIGIN_ENV) {
            self.apply_source_origin(&origin);
        }
    }

    pub fn apply_source_origin(&mut self, origin: &str) {
        let origin = origin.trim();
        if !origin.is_empty() {
            self.coordination.source_origin = origin.to_string();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSection {
    /// Dialect for transcripts delivered from the dictation page.
    pub dictation: Dialect,
    /// Dialect for text pasted straight into a form.
    pub paste: Dialect,
}

impl Default for ExtractorSection {
    fn default() -> Self {
        Self {
            dictation: Dialect::Prose,
            paste: Dialect::Line,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveySection {
    pub destination: SurveyPolicy,
    pub paste: SurveyPolicy,
    /// Fillable controls a page needs before it counts as a form surface.
    pub min_form_controls: usize,
}

impl Default for SurveySection {
    fn default() -> Self {
        Self {
            destination: SurveyPolicy::lenient(),
            paste: SurveyPolicy::strict(),
            min_form_controls: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherSection {
    pub destination: MatchPolicy,
    pub paste: MatchPolicy,
    /// Replaces the built-in phrase list of individual keys.
    pub synonyms: BTreeMap<FieldKey, Vec<String>>,
}

impl MatcherSection {
    pub fn synonym_table(&self) -> SynonymTable {
        self.synonyms
            .iter()
            .fold(SynonymTable::builtin(), |table, (key, phrases)| {
                table.with_override(*key, phrases.clone())
            })
    }
}

impl Default for MatcherSection {
    fn default() -> Self {
        Self {
            destination: MatchPolicy::cross_context(),
            paste: MatchPolicy::paste_fill(),
            synonyms: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinationSection {
    #[serde(flatten)]
    pub delivery: CoordinationConfig,
    /// Origin of the dictation application; pages there run the source agent.
    pub source_origin: String,
}

impl Default for CoordinationSection {
    fn default() -> Self {
        Self {
            delivery: CoordinationConfig::default(),
            source_origin: "https://scribe.localhost".into(),
        }
    }
}
