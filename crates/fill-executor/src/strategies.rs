//! Per-widget-kind fill behaviour.

use form_dom::EventKind;
use scribebridge_core_types::ControlId;

use crate::errors::FillError;
use crate::model::{ControlSnapshot, FillOutcome, RadioChoice};
use crate::ports::FillPort;

const TRUTHY: [&str; 5] = ["yes", "true", "1", "checked", "on"];

/// Underlying write, then input, change, blur.
pub async fn fill_text(port: &dyn FillPort, control: ControlId, value: &str) -> Result<FillOutcome, FillError> {
    port.write_value(control, value).await?;
    for kind in [EventKind::Input, EventKind::Change, EventKind::Blur] {
        port.dispatch(control, kind).await?;
    }
    Ok(FillOutcome::Filled)
}

/// Exact value/text match first, then display-text containment either way.
pub async fn fill_select(
    port: &dyn FillPort,
    snapshot: &ControlSnapshot,
    value: &str,
) -> Result<FillOutcome, FillError> {
    let target = value.trim().to_lowercase();
    let options: Vec<(String, String)> = snapshot
        .options
        .iter()
        .map(|opt| (opt.value.trim().to_lowercase(), opt.text.trim().to_lowercase()))
        .collect();

    let exact = options
        .iter()
        .position(|(val, text)| *val == target || *text == target);
    let index = exact.or_else(|| {
        options.iter().position(|(_, text)| {
            !text.is_empty() && (text.contains(&target) || target.contains(text.as_str()))
        })
    });

    let Some(index) = index else {
        return Ok(FillOutcome::Skipped("no option matches"));
    };
    port.select_option(snapshot.control, index).await?;
    port.dispatch(snapshot.control, EventKind::Change).await?;
    Ok(FillOutcome::Filled)
}

/// Checks the first radio of the group whose value or label equals the target, else
/// the first that overlaps it.
pub async fn fill_radio(
    port: &dyn FillPort,
    snapshot: &ControlSnapshot,
    value: &str,
) -> Result<FillOutcome, FillError> {
    let target = value.trim().to_lowercase();
    if target.is_empty() {
        return Ok(FillOutcome::Skipped("empty value"));
    }
    let group = match snapshot.name.as_deref() {
        Some(name) if !name.is_empty() => port.radio_group(name).await?,
        _ => Vec::new(),
    };

    let candidates = |choice: &RadioChoice| {
        [choice.value.as_str(), choice.label.as_str()]
            .into_iter()
            .map(|candidate| candidate.trim().to_lowercase())
            .collect::<Vec<_>>()
    };
    // exact pass first so "male" never wins over "female"
    let hit = group
        .iter()
        .find(|choice| candidates(*choice).iter().any(|c| *c == target))
        .or_else(|| {
            group
                .iter()
                .find(|choice| candidates(*choice).iter().any(|c| overlaps(c, &target)))
        });
    let Some(choice) = hit else {
        return Ok(FillOutcome::Skipped("no radio matches"));
    };
    port.set_checked(choice.control, true).await?;
    port.dispatch(choice.control, EventKind::Change).await?;
    Ok(FillOutcome::Filled)
}

/// Toggles only when the desired state differs from the current one.
pub async fn fill_checkbox(
    port: &dyn FillPort,
    snapshot: &ControlSnapshot,
    value: &str,
) -> Result<FillOutcome, FillError> {
    let wanted = is_truthy(value);
    if snapshot.checked == wanted {
        return Ok(FillOutcome::Filled);
    }
    port.set_checked(snapshot.control, wanted).await?;
    port.dispatch(snapshot.control, EventKind::Change).await?;
    Ok(FillOutcome::Filled)
}

pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    TRUTHY.iter().any(|token| token.eq_ignore_ascii_case(value))
}

fn overlaps(candidate: &str, target: &str) -> bool {
    !candidate.is_empty()
        && (candidate == target || candidate.contains(target) || target.contains(candidate))
}
