//! Confidence-scored assignment of extracted fields to surveyed controls.

pub mod matcher;
pub mod policy;
pub mod scoring;
pub mod synonyms;

pub use matcher::{match_fields, FieldMatcher, Mapping};
pub use policy::{MatchPolicy, Thresholds};
pub use synonyms::SynonymTable;
