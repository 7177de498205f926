use tracing::{debug, instrument, trace};

use form_dom::{Control, FormDocument};
use scribebridge_core_types::{ControlId, WidgetKind};

use crate::judges;
use crate::model::{ControlDescriptor, ControlFlags, ControlMeta};
use crate::policy::SurveyPolicy;

/// Enumerates every fillable control of `document` in document order.
///
/// Action controls and `exclude` (the paste source, when there is one) are skipped,
/// as is anything the visibility policy rejects.
#[instrument(skip_all, fields(mode = ?policy.visibility))]
pub fn survey(
    document: &FormDocument,
    exclude: Option<ControlId>,
    policy: &SurveyPolicy,
) -> Vec<ControlDescriptor> {
    let mut descriptors = Vec::new();
    for control in document.controls() {
        if control.kind.is_action() || Some(control.id) == exclude {
            continue;
        }
        let report = judges::visible(control, policy);
        if !report.ok {
            trace!(control = %control.id, issues = ?report.issues, "skipping hidden control");
            continue;
        }
        let meta = ControlMeta {
            name: control.name.clone(),
            dom_id: control.dom_id.clone(),
            placeholder: control.placeholder.clone(),
            aria_label: control.aria_label.clone(),
            label: resolve_label(document, control, policy),
        };
        let flags = ControlFlags {
            required: control.required,
            readonly: control.readonly,
            disabled: control.disabled,
        };
        descriptors.push(ControlDescriptor::new(control.id, control.kind, meta, flags));
    }
    debug!(count = descriptors.len(), "survey finished");
    descriptors
}

/// Human-readable label: external label, then wrapping label, then short container text.
pub fn resolve_label(document: &FormDocument, control: &Control, policy: &SurveyPolicy) -> String {
    if let Some(text) = document.external_label(control.id) {
        let text = normalise(text);
        if !text.is_empty() {
            return text;
        }
    }
    if let Some(text) = document.wrapping_label(control.id) {
        let text = normalise(&strip_value(text, control));
        if !text.is_empty() {
            return text;
        }
    }
    if let Some(text) = document.container_text(control.id) {
        let text = normalise(&strip_value(text, control));
        if text.chars().count() < policy.container_label_max_chars {
            return text;
        }
    }
    String::new()
}

/// Whether the document looks like a form worth filling.
pub fn has_form_surface(document: &FormDocument, policy: &SurveyPolicy, min_controls: usize) -> bool {
    survey(document, None, policy)
        .iter()
        .filter(|descriptor| descriptor.flags.fillable())
        .count()
        >= min_controls.max(1)
}

/// Removes the control's own text from a label, once.
///
/// A checkbox or radio value is a submission token, not visible text.
fn strip_value(text: &str, control: &Control) -> String {
    let value = control.value().trim();
    if value.is_empty() || matches!(control.kind, WidgetKind::Checkbox | WidgetKind::Radio) {
        text.to_string()
    } else {
        text.replacen(value, " ", 1)
    }
}

fn normalise(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_dom::{ComputedStyle, ControlSpec, Geometry};
    use pretty_assertions::assert_eq;

    fn sample() -> (FormDocument, Vec<ControlId>) {
        let mut doc = FormDocument::new();
        let ids = vec![
            doc.add(ControlSpec::new("text").id("pt-name").label("Patient Name"))
                .unwrap(),
            doc.add(
                ControlSpec::new("textarea")
                    .name("notes")
                    .wrapping_label("Clinical notes existing text")
                    .value("existing text"),
            )
            .unwrap(),
            doc.add(ControlSpec::new("text").container_text("Age 34").value("34"))
                .unwrap(),
            doc.add(ControlSpec::new("submit").name("save")).unwrap(),
            doc.add(
                ControlSpec::new("text")
                    .name("ghost")
                    .geometry(Geometry::sized(0.0, 0.0)),
            )
            .unwrap(),
        ];
        (doc, ids)
    }

    #[test]
    fn labels_resolve_in_priority_order() {
        let (doc, ids) = sample();
        let found = survey(&doc, None, &SurveyPolicy::strict());
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].identifier, "pt-name patient name");
        assert_eq!(found[1].meta.label, "Clinical notes");
        assert_eq!(found[2].meta.label, "Age");
        assert_eq!(found[2].control, ids[2]);
    }

    #[test]
    fn only_a_text_value_is_stripped_and_only_once() {
        let mut doc = FormDocument::new();
        let consent = doc
            .add(
                ControlSpec::new("checkbox")
                    .wrapping_label("Consent on file")
                    .value("on"),
            )
            .unwrap();
        let repeat = doc
            .add(
                ControlSpec::new("text")
                    .wrapping_label("Dose 10 every 10 hours")
                    .value("10"),
            )
            .unwrap();
        let policy = SurveyPolicy::strict();
        let label = |id| resolve_label(&doc, doc.control(id).unwrap(), &policy);
        assert_eq!(label(consent), "Consent on file");
        assert_eq!(label(repeat), "Dose every 10 hours");
    }

    #[test]
    fn excluded_and_action_controls_are_skipped() {
        let (doc, ids) = sample();
        let found = survey(&doc, Some(ids[0]), &SurveyPolicy::strict());
        assert!(found.iter().all(|d| d.control != ids[0] && d.control != ids[3]));
    }

    #[test]
    fn lenient_mode_keeps_collapsed_controls() {
        let (doc, ids) = sample();
        let found = survey(&doc, None, &SurveyPolicy::lenient());
        assert_eq!(found.len(), 4);
        assert_eq!(found[3].control, ids[4]);
    }

    #[test]
    fn long_container_text_is_not_a_label() {
        let mut doc = FormDocument::new();
        doc.add(ControlSpec::new("text").container_text("x".repeat(140)))
            .unwrap();
        let found = survey(&doc, None, &SurveyPolicy::strict());
        assert_eq!(found[0].meta.label, "");
        assert_eq!(found[0].identifier, "");
    }

    #[test]
    fn form_surface_needs_enough_fillable_controls() {
        let (doc, _) = sample();
        assert!(has_form_surface(&doc, &SurveyPolicy::strict(), 2));
        assert!(!has_form_surface(&doc, &SurveyPolicy::strict(), 5));

        let mut hidden = FormDocument::new();
        hidden
            .add(ControlSpec::new("text").style(ComputedStyle {
                display_none: true,
                ..ComputedStyle::default()
            }))
            .unwrap();
        assert!(!has_form_surface(&hidden, &SurveyPolicy::lenient(), 1));
    }
}
