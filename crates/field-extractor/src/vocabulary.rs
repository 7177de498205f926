use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical clinical concepts a dictation can be split into.
///
/// Declaration order is extraction order, map order, and the order in which the
/// matcher claims controls.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    Age,
    Gender,
    DateOfBirth,
    BloodPressure,
    HeartRate,
    Temperature,
    RespiratoryRate,
    OxygenSaturation,
    Weight,
    Height,
    ChiefComplaint,
    HistoryOfPresentIllness,
    PastMedicalHistory,
    SurgicalHistory,
    FamilyHistory,
    SocialHistory,
    Medications,
    Allergies,
    ReviewOfSystems,
    PhysicalExam,
    Assessment,
    Diagnosis,
    Plan,
    FollowUp,
}

impl FieldKey {
    pub const ALL: [FieldKey; 25] = [
        FieldKey::Name,
        FieldKey::Age,
        FieldKey::Gender,
        FieldKey::DateOfBirth,
        FieldKey::BloodPressure,
        FieldKey::HeartRate,
        FieldKey::Temperature,
        FieldKey::RespiratoryRate,
        FieldKey::OxygenSaturation,
        FieldKey::Weight,
        FieldKey::Height,
        FieldKey::ChiefComplaint,
        FieldKey::HistoryOfPresentIllness,
        FieldKey::PastMedicalHistory,
        FieldKey::SurgicalHistory,
        FieldKey::FamilyHistory,
        FieldKey::SocialHistory,
        FieldKey::Medications,
        FieldKey::Allergies,
        FieldKey::ReviewOfSystems,
        FieldKey::PhysicalExam,
        FieldKey::Assessment,
        FieldKey::Diagnosis,
        FieldKey::Plan,
        FieldKey::FollowUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Age => "age",
            FieldKey::Gender => "gender",
            FieldKey::DateOfBirth => "dateOfBirth",
            FieldKey::BloodPressure => "bloodPressure",
            FieldKey::HeartRate => "heartRate",
            FieldKey::Temperature => "temperature",
            FieldKey::RespiratoryRate => "respiratoryRate",
            FieldKey::OxygenSaturation => "oxygenSaturation",
            FieldKey::Weight => "weight",
            FieldKey::Height => "height",
            FieldKey::ChiefComplaint => "chiefComplaint",
            FieldKey::HistoryOfPresentIllness => "historyOfPresentIllness",
            FieldKey::PastMedicalHistory => "pastMedicalHistory",
            FieldKey::SurgicalHistory => "surgicalHistory",
            FieldKey::FamilyHistory => "familyHistory",
            FieldKey::SocialHistory => "socialHistory",
            FieldKey::Medications => "medications",
            FieldKey::Allergies => "allergies",
            FieldKey::ReviewOfSystems => "reviewOfSystems",
            FieldKey::PhysicalExam => "physicalExam",
            FieldKey::Assessment => "assessment",
            FieldKey::Diagnosis => "diagnosis",
            FieldKey::Plan => "plan",
            FieldKey::FollowUp => "followUp",
        }
    }

    pub fn parse(raw: &str) -> Option<FieldKey> {
        FieldKey::ALL.into_iter().find(|key| key.as_str() == raw)
    }

    /// Label alternatives (regex fragments, no anchors) a dictation uses for the key.
    pub(crate) fn label_pattern(&self) -> &'static str {
        match self {
            FieldKey::Name => r"(?:patient(?:'s)?\s+)?(?:full\s+)?name",
            FieldKey::Age => r"age",
            FieldKey::Gender => r"gender|sex",
            FieldKey::DateOfBirth => r"date\s+of\s+birth|birth\s*date|dob",
            FieldKey::BloodPressure => r"blood\s+pressure|bp",
            FieldKey::HeartRate => r"heart\s+rate|pulse(?:\s+rate)?|hr",
            FieldKey::Temperature => r"temperature|temp",
            FieldKey::RespiratoryRate => r"respiratory\s+rate|resp(?:iration)?s?\s+rate|rr",
            FieldKey::OxygenSaturation => {
                r"oxygen\s+saturation|o2\s+sat(?:uration)?|spo2|sats"
            }
            FieldKey::Weight => r"weight|wt",
            FieldKey::Height => r"height|ht",
            FieldKey::ChiefComplaint => {
                r"chief\s+complaint|presenting\s+complaint|complaining\s+of|reason\s+for\s+visit|complaint|cc"
            }
            FieldKey::HistoryOfPresentIllness => {
                r"history\s+of\s+(?:the\s+)?present(?:ing)?\s+illness|present\s+illness|hpi"
            }
            FieldKey::PastMedicalHistory => r"past\s+medical\s+history|medical\s+history|pmh",
            FieldKey::SurgicalHistory => r"past\s+surgical\s+history|surgical\s+history|psh",
            FieldKey::FamilyHistory => r"family\s+history|fhx",
            FieldKey::SocialHistory => r"social\s+history|shx",
            FieldKey::Medications => r"current\s+medications|medications|medication|meds",
            FieldKey::Allergies => r"allergies|allergic\s+to|allergy",
            FieldKey::ReviewOfSystems => r"review\s+of\s+systems|ros",
            FieldKey::PhysicalExam => r"physical\s+exam(?:ination)?|on\s+exam(?:ination)?",
            FieldKey::Assessment => r"assessment|impression",
            FieldKey::Diagnosis => r"diagnosis|diagnoses|dx",
            FieldKey::Plan => r"treatment\s+plan|plan",
            FieldKey::FollowUp => r"follow[\s-]*up|return\s+visit",
        }
    }

    /// Keys that describe narrative history sections.
    pub fn is_history(&self) -> bool {
        matches!(
            self,
            FieldKey::HistoryOfPresentIllness
                | FieldKey::PastMedicalHistory
                | FieldKey::SurgicalHistory
                | FieldKey::FamilyHistory
                | FieldKey::SocialHistory
        )
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
