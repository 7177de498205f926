use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, instrument, trace};

use field_extractor::{CanonicalFieldMap, FieldKey};
use form_surveyor::ControlDescriptor;
use scribebridge_core_types::{ControlId, WidgetKind};

use crate::policy::MatchPolicy;
use crate::scoring;
use crate::synonyms::SynonymTable;

/// One accepted (control, key, value) assignment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mapping {
    pub control: ControlDescriptor,
    pub key: FieldKey,
    pub value: String,
    pub confidence: f64,
}

#[derive(Clone, Debug, Default)]
pub struct FieldMatcher {
    policy: MatchPolicy,
    synonyms: SynonymTable,
}

impl FieldMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            synonyms: SynonymTable::builtin(),
        }
    }

    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = synonyms;
        self
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Assigns every extracted field to the best-scoring control that clears its
    /// threshold. Fields without such a control are left out.
    #[instrument(skip_all, fields(fields = fields.len(), controls = controls.len(), exclusive = self.policy.exclusive))]
    pub fn match_fields(
        &self,
        fields: &CanonicalFieldMap,
        controls: &[ControlDescriptor],
    ) -> Vec<Mapping> {
        let mut claimed: HashSet<ControlId> = HashSet::new();
        let mut mappings = Vec::new();

        for (key, value) in fields.iter() {
            let phrases = self.synonyms.phrases(key);
            let mut best: Option<(&ControlDescriptor, f64)> = None;

            for descriptor in controls {
                if !self.eligible(descriptor, value, &claimed) {
                    continue;
                }
                let confidence = scoring::score(&descriptor.identifier, &phrases);
                // strict comparison keeps the earliest control on ties
                if best.map_or(true, |(_, top)| confidence > top) {
                    best = Some((descriptor, confidence));
                }
            }

            let threshold = self.policy.thresholds.for_key(key);
            match best {
                Some((descriptor, confidence)) if confidence > 0.0 && confidence >= threshold => {
                    debug!(%key, control = %descriptor.control, confidence, "field matched");
                    if self.policy.exclusive {
                        claimed.insert(descriptor.control);
                    }
                    mappings.push(Mapping {
                        control: descriptor.clone(),
                        key,
                        value: value.to_string(),
                        confidence,
                    });
                }
                Some((_, confidence)) => {
                    trace!(%key, confidence, threshold, "best control below threshold");
                }
                None => trace!(%key, "no candidate control"),
            }
        }

        debug!(matched = mappings.len(), "matching finished");
        mappings
    }

    fn eligible(&self, descriptor: &ControlDescriptor, value: &str, claimed: &HashSet<ControlId>) -> bool {
        if !descriptor.flags.fillable() || claimed.contains(&descriptor.control) {
            return false;
        }
        !(descriptor.kind == WidgetKind::Checkbox
            && value.chars().count() > self.policy.checkbox_max_chars)
    }
}

/// Convenience wrapper using the built-in synonym table.
pub fn match_fields(
    fields: &CanonicalFieldMap,
    controls: &[ControlDescriptor],
    policy: &MatchPolicy,
) -> Vec<Mapping> {
    FieldMatcher::new(policy.clone()).match_fields(fields, controls)
}
