pub mod judges;
pub mod model;
pub mod policy;
pub mod survey;

pub use model::{ControlDescriptor, ControlFlags, ControlMeta};
pub use policy::{SurveyPolicy, VisibilityMode};
pub use survey::{has_form_surface, resolve_label, survey};
