//! Phrases a destination form is likely to use for each canonical key.

use std::collections::HashMap;

use field_extractor::FieldKey;

fn builtin(key: FieldKey) -> &'static [&'static str] {
    match key {
        FieldKey::Name => &["name", "patient name", "full name", "patient"],
        FieldKey::Age => &["age", "patient age", "years old"],
        FieldKey::Gender => &["gender", "sex"],
        FieldKey::DateOfBirth => &["date of birth", "dob", "birth date", "birthdate", "birthday"],
        FieldKey::BloodPressure => &["blood pressure", "bp", "systolic", "diastolic"],
        FieldKey::HeartRate => &["heart rate", "pulse", "hr", "bpm"],
        FieldKey::Temperature => &["temperature", "temp"],
        FieldKey::RespiratoryRate => &["respiratory rate", "resp rate", "rr", "respirations"],
        FieldKey::OxygenSaturation => &["oxygen saturation", "spo2", "o2 sat", "saturation"],
        FieldKey::Weight => &["weight", "wt"],
        FieldKey::Height => &["height", "ht"],
        FieldKey::ChiefComplaint => &[
            "chief complaint",
            "presenting complaint",
            "complaint",
            "reason for visit",
            "presenting problem",
            "cc",
        ],
        FieldKey::HistoryOfPresentIllness => {
            &["history of present illness", "present illness", "hpi"]
        }
        FieldKey::PastMedicalHistory => &["past medical history", "medical history", "pmh"],
        FieldKey::SurgicalHistory => &["surgical history", "past surgical history", "psh"],
        FieldKey::FamilyHistory => &["family history", "fhx"],
        FieldKey::SocialHistory => &["social history", "shx"],
        FieldKey::Medications => &[
            "medications",
            "medication",
            "current medications",
            "meds",
            "prescriptions",
        ],
        FieldKey::Allergies => &["allergies", "allergy", "drug allergies"],
        FieldKey::ReviewOfSystems => &["review of systems", "ros"],
        FieldKey::PhysicalExam => &["physical exam", "physical examination", "examination", "exam"],
        FieldKey::Assessment => &["assessment", "impression", "clinical impression"],
        FieldKey::Diagnosis => &["diagnosis", "diagnoses", "dx"],
        FieldKey::Plan => &["plan", "treatment plan", "management plan"],
        FieldKey::FollowUp => &["follow up", "follow-up", "followup", "return visit"],
    }
}

/// Key → ordered lowercase phrases. Starts from the built-in table; deployments may
/// replace individual entries.
#[derive(Clone, Debug)]
pub struct SynonymTable {
    overrides: HashMap<FieldKey, Vec<String>>,
}

impl SynonymTable {
    pub fn builtin() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, key: FieldKey, phrases: Vec<String>) -> Self {
        let phrases = phrases
            .into_iter()
            .map(|phrase| phrase.trim().to_lowercase())
            .filter(|phrase| !phrase.is_empty())
            .collect();
        self.overrides.insert(key, phrases);
        self
    }

    pub fn phrases(&self, key: FieldKey) -> Vec<&str> {
        match self.overrides.get(&key) {
            Some(custom) => custom.iter().map(String::as_str).collect(),
            None => builtin(key).to_vec(),
        }
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::builtin()
    }
}
