use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use scribebridge_core_types::{ControlId, WidgetKind};

use crate::errors::DomError;
use crate::events::{DomEvent, EventKind};
use crate::model::{Control, ControlSpec, Geometry, LabelElement};

pub type SharedDocument = Arc<Mutex<FormDocument>>;

pub fn shared(document: FormDocument) -> SharedDocument {
    Arc::new(Mutex::new(document))
}

/// In-memory document holding the interactive controls of one browsing context.
///
/// Controls are kept in document order. Writes either go through the property
/// wrapper a reactive framework intercepts (`set_property_value`) or straight to the
/// underlying storage (`set_native_value`); a bound framework only learns about a
/// text change when an input/change event arrives and the stored value differs from
/// the value it last tracked.
#[derive(Debug, Default)]
pub struct FormDocument {
    controls: BTreeMap<ControlId, Control>,
    labels: Vec<LabelElement>,
    next_id: usize,
    events: Vec<DomEvent>,
    form_listener: Vec<DomEvent>,
    framework_state: HashMap<ControlId, String>,
}

impl FormDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: Vec<ControlSpec>) -> Result<Self, DomError> {
        let mut document = Self::new();
        for spec in specs {
            document.add(spec)?;
        }
        Ok(document)
    }

    /// Builds a document from a JSON array of control descriptions.
    pub fn from_json(raw: &str) -> Result<Self, DomError> {
        let specs: Vec<ControlSpec> =
            serde_json::from_str(raw).map_err(|err| DomError::InvalidSpec(err.to_string()))?;
        Self::from_specs(specs)
    }

    pub fn add(&mut self, spec: ControlSpec) -> Result<ControlId, DomError> {
        let kind = WidgetKind::parse(&spec.kind);
        if spec.label.is_some() && spec.id.is_none() {
            return Err(DomError::InvalidSpec(
                "an external label needs the control to carry an id".into(),
            ));
        }
        let id = ControlId(self.next_id);
        self.next_id += 1;

        if let (Some(text), Some(for_id)) = (&spec.label, &spec.id) {
            self.labels.push(LabelElement {
                for_id: for_id.clone(),
                text: text.clone(),
            });
        }

        let mut options = spec.options;
        let mut value = spec.value;
        if kind == WidgetKind::Select {
            if let Some(selected) = options.iter().find(|opt| opt.selected) {
                value = selected.value.clone();
            } else if let Some(first) = options.first_mut() {
                first.selected = true;
                value = first.value.clone();
            }
        }

        let tracked_value = spec.reactive.then(|| value.clone());
        if spec.reactive {
            self.framework_state.insert(id, value.clone());
        }

        self.controls.insert(
            id,
            Control {
                id,
                kind,
                name: spec.name,
                dom_id: spec.id,
                placeholder: spec.placeholder,
                aria_label: spec.aria_label,
                required: spec.required,
                readonly: spec.readonly,
                disabled: spec.disabled,
                geometry: spec.geometry.unwrap_or_else(|| Geometry::sized(200.0, 24.0)),
                style: spec.style,
                options,
                checked: spec.checked,
                in_view: false,
                wrapping_label: spec.wrapping_label,
                container_text: spec.container_text,
                value,
                tracked_value,
            },
        );
        Ok(id)
    }

    /// Removes a control, as a re-rendering framework might between survey and fill.
    pub fn detach(&mut self, id: ControlId) -> Option<Control> {
        self.controls.remove(&id)
    }

    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.values()
    }

    pub fn control(&self, id: ControlId) -> Result<&Control, DomError> {
        self.controls.get(&id).ok_or(DomError::ControlNotFound(id))
    }

    fn control_mut(&mut self, id: ControlId) -> Result<&mut Control, DomError> {
        self.controls
            .get_mut(&id)
            .ok_or(DomError::ControlNotFound(id))
    }

    pub fn find_by_dom_id(&self, dom_id: &str) -> Option<&Control> {
        self.controls
            .values()
            .find(|control| control.dom_id.as_deref() == Some(dom_id))
    }

    /// Text of the first label element whose `for` matches the control's id.
    pub fn external_label(&self, id: ControlId) -> Option<&str> {
        let control = self.controls.get(&id)?;
        let dom_id = control.dom_id.as_deref()?;
        self.labels
            .iter()
            .find(|label| label.for_id == dom_id)
            .map(|label| label.text.as_str())
    }

    pub fn wrapping_label(&self, id: ControlId) -> Option<&str> {
        self.controls.get(&id)?.wrapping_label.as_deref()
    }

    pub fn container_text(&self, id: ControlId) -> Option<&str> {
        self.controls.get(&id)?.container_text.as_deref()
    }

    /// Radios sharing `name`, in document order.
    pub fn radio_group(&self, name: &str) -> Vec<ControlId> {
        self.controls
            .values()
            .filter(|c| c.kind == WidgetKind::Radio && c.name.as_deref() == Some(name))
            .map(|c| c.id)
            .collect()
    }

    /// Write through the wrapper a framework intercepts; the framework's tracker follows.
    pub fn set_property_value(&mut self, id: ControlId, value: &str) -> Result<(), DomError> {
        let control = self.control_mut(id)?;
        control.value = value.to_string();
        if let Some(tracked) = control.tracked_value.as_mut() {
            *tracked = value.to_string();
        }
        Ok(())
    }

    /// Write to the underlying storage, leaving any framework tracker stale.
    pub fn set_native_value(&mut self, id: ControlId, value: &str) -> Result<(), DomError> {
        let control = self.control_mut(id)?;
        control.value = value.to_string();
        Ok(())
    }

    pub fn select_option(&mut self, id: ControlId, index: usize) -> Result<(), DomError> {
        let control = self.control_mut(id)?;
        if index >= control.options.len() {
            return Err(DomError::OptionOutOfRange { control: id, index });
        }
        for (idx, option) in control.options.iter_mut().enumerate() {
            option.selected = idx == index;
        }
        control.value = control.options[index].value.clone();
        Ok(())
    }

    /// Checking a radio unchecks the rest of its group.
    pub fn set_checked(&mut self, id: ControlId, checked: bool) -> Result<(), DomError> {
        let control = self.control_mut(id)?;
        control.checked = checked;
        if !(checked && control.kind == WidgetKind::Radio) {
            return Ok(());
        }
        if let Some(name) = control.name.clone() {
            for sibling in self.controls.values_mut() {
                if sibling.id != id
                    && sibling.kind == WidgetKind::Radio
                    && sibling.name.as_deref() == Some(name.as_str())
                {
                    sibling.checked = false;
                }
            }
        }
        Ok(())
    }

    pub fn scroll_into_view(&mut self, id: ControlId) -> Result<(), DomError> {
        self.control_mut(id)?.in_view = true;
        Ok(())
    }

    pub fn set_outline(&mut self, id: ControlId, outline: Option<String>) -> Result<(), DomError> {
        self.control_mut(id)?.style.outline = outline;
        Ok(())
    }

    /// Delivers an event to the target, its bound framework, and (when bubbling) the form.
    pub fn dispatch(&mut self, event: DomEvent) -> Result<(), DomError> {
        let control = self
            .controls
            .get_mut(&event.target)
            .ok_or(DomError::ControlNotFound(event.target))?;
        trace!(target_control = %event.target, kind = event.kind.as_str(), "dispatch");

        if let Some(tracked) = control.tracked_value.as_mut() {
            let observed = match control.kind {
                kind if kind.is_text_like() => {
                    matches!(event.kind, EventKind::Input | EventKind::Change)
                        && *tracked != control.value
                }
                _ => event.kind == EventKind::Change,
            };
            if observed {
                let snapshot = match control.kind {
                    WidgetKind::Checkbox | WidgetKind::Radio => control.checked.to_string(),
                    _ => control.value.clone(),
                };
                *tracked = control.value.clone();
                self.framework_state.insert(event.target, snapshot);
            }
        }

        if event.bubbles {
            self.form_listener.push(event.clone());
        }
        self.events.push(event);
        Ok(())
    }

    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    pub fn events_for(&self, id: ControlId) -> Vec<EventKind> {
        self.events
            .iter()
            .filter(|event| event.target == id)
            .map(|event| event.kind)
            .collect()
    }

    /// Events seen by a listener registered on the enclosing form.
    pub fn form_events(&self) -> &[DomEvent] {
        &self.form_listener
    }

    /// Value as last observed by a bound reactive framework.
    pub fn framework_value(&self, id: ControlId) -> Option<&str> {
        self.framework_state.get(&id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SelectOption;
    use pretty_assertions::assert_eq;

    fn reactive_text() -> (FormDocument, ControlId) {
        let mut doc = FormDocument::new();
        let id = doc
            .add(ControlSpec::new("text").id("age").label("Age").reactive())
            .unwrap();
        (doc, id)
    }

    #[test]
    fn property_writes_are_swallowed_by_the_framework() {
        let (mut doc, id) = reactive_text();
        doc.set_property_value(id, "34").unwrap();
        doc.dispatch(DomEvent::bubbling(id, EventKind::Input)).unwrap();
        assert_eq!(doc.control(id).unwrap().value(), "34");
        assert_eq!(doc.framework_value(id), Some(""));
    }

    #[test]
    fn native_writes_are_observed_on_input() {
        let (mut doc, id) = reactive_text();
        doc.set_native_value(id, "34").unwrap();
        assert_eq!(doc.framework_value(id), Some(""));
        doc.dispatch(DomEvent::bubbling(id, EventKind::Input)).unwrap();
        assert_eq!(doc.framework_value(id), Some("34"));
        assert_eq!(doc.form_events().len(), 1);
    }

    #[test]
    fn label_requires_id() {
        let mut doc = FormDocument::new();
        assert!(doc.add(ControlSpec::new("text").label("Age")).is_err());
    }

    #[test]
    fn select_defaults_to_first_option() {
        let mut doc = FormDocument::new();
        let id = doc
            .add(ControlSpec::new("select").options(vec![
                SelectOption::new("", "Choose"),
                SelectOption::new("m", "Male"),
            ]))
            .unwrap();
        assert_eq!(doc.control(id).unwrap().value(), "");
        doc.select_option(id, 1).unwrap();
        assert_eq!(doc.control(id).unwrap().value(), "m");
        assert!(doc.select_option(id, 5).is_err());
    }

    #[test]
    fn json_specs_build_documents() {
        let doc = FormDocument::from_json(
            r#"[{"type":"text","id":"bp","label":"Blood Pressure"},
                {"type":"radio","name":"sex","value":"female"},
                {"type":"radio","name":"sex","value":"male"}]"#,
        )
        .unwrap();
        assert_eq!(doc.controls().count(), 3);
        assert_eq!(doc.external_label(ControlId(0)), Some("Blood Pressure"));
        assert_eq!(doc.radio_group("sex"), vec![ControlId(1), ControlId(2)]);
    }

    #[test]
    fn checking_a_radio_clears_its_group() {
        let mut doc = FormDocument::new();
        let a = doc
            .add(ControlSpec::new("radio").name("sex").value("f").checked(true))
            .unwrap();
        let b = doc.add(ControlSpec::new("radio").name("sex").value("m")).unwrap();
        doc.set_checked(b, true).unwrap();
        assert!(!doc.control(a).unwrap().checked);
        assert!(doc.control(b).unwrap().checked);
    }
}
