//! Field extraction for clinical dictation.
//!
//! A single label bank is shared by every deployment; the [`BoundaryPolicy`] decides
//! where a value ends, so multi-line paste text and run-on dictation are handled by
//! the same extractor with a different policy.

pub mod boundary;
pub mod extractor;
pub mod map;
pub mod vocabulary;

pub use boundary::{BoundaryPolicy, Dialect, LineBoundary, ProseBoundary};
pub use extractor::FieldExtractor;
pub use map::CanonicalFieldMap;
pub use vocabulary::FieldKey;
