use form_dom::Control;

use crate::policy::{SurveyPolicy, VisibilityMode};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityReport {
    pub ok: bool,
    pub issues: Vec<&'static str>,
}

/// Judges whether a control should be surveyed under `policy`.
pub fn visible(control: &Control, policy: &SurveyPolicy) -> VisibilityReport {
    let mut issues = Vec::new();

    if control.style.display_none {
        issues.push("display_none");
    }
    if policy.visibility == VisibilityMode::Strict {
        if control.geometry.area() <= 0.0 {
            issues.push("zero_area");
        }
        if control.style.visibility_hidden {
            issues.push("visibility_hidden");
        }
        if control.style.opacity <= 0.0 {
            issues.push("opacity_zero");
        }
    } else if !issues.is_empty()
        && policy.allowlisted(control.name.as_deref(), control.dom_id.as_deref())
    {
        issues.clear();
    }

    VisibilityReport {
        ok: issues.is_empty(),
        issues,
    }
}
