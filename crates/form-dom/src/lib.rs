//! In-memory document platform shared by the surveyor and the fill executor.

pub mod document;
pub mod errors;
pub mod events;
pub mod model;

pub use document::{shared, FormDocument, SharedDocument};
pub use errors::DomError;
pub use events::{DomEvent, EventKind};
pub use model::{ComputedStyle, Control, ControlSpec, Geometry, LabelElement, SelectOption};
