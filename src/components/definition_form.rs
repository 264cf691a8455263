use leptos::prelude::*;

use crate::api::TestDefinition;

/// Check the form's field text and assemble the row to send.
/// Bounds are validated before anything goes on the wire; the backend
/// stores them as numbers and applies no checks of its own.
pub fn build_definition(
    id: Option<i64>,
    test_name: &str,
    category: &str,
    unit: &str,
    ref_min: &str,
    ref_max: &str,
    possible_names: &str,
) -> Result<TestDefinition, &'static str> {
    if test_name.trim().is_empty() {
        return Err("Test name is required.");
    }

    let ref_min =
        parse_bound(ref_min).map_err(|_| "Reference Min and Max must be valid numbers.")?;
    let ref_max =
        parse_bound(ref_max).map_err(|_| "Reference Min and Max must be valid numbers.")?;

    if let (Some(min), Some(max)) = (ref_min, ref_max) {
        if min >= max {
            return Err("Reference Max must be greater than Reference Min.");
        }
    }

    Ok(TestDefinition {
        id,
        test_name: test_name.trim().to_string(),
        category: opt_text(category),
        unit: opt_text(unit),
        ref_min,
        ref_max,
        possible_names: opt_text(possible_names),
    })
}

/// Empty text means "no bound"; anything else must be a finite number.
fn parse_bound(text: &str) -> Result<Option<f64>, ()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(()),
    }
}

fn opt_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Add/edit form shown in a modal. Validation failures and save failures
/// both surface inside the form; the caller owns the actual request.
#[component]
pub fn DefinitionForm(
    /// Row being edited, or None when adding a new one.
    existing: Option<TestDefinition>,
    #[prop(into)] on_save: Callback<TestDefinition>,
    #[prop(into)] on_cancel: Callback<()>,
    /// Failure from the save request, shown inside the form.
    #[prop(into)] save_error: Signal<Option<String>>,
    #[prop(into)] saving: Signal<bool>,
) -> impl IntoView {
    let editing = existing.is_some();
    let initial = existing.unwrap_or(TestDefinition {
        id: None,
        test_name: String::new(),
        category: None,
        unit: None,
        ref_min: None,
        ref_max: None,
        possible_names: None,
    });
    let id = initial.id;

    // Field state
    let (test_name, set_test_name) = signal(initial.test_name.clone());
    let (category, set_category) = signal(initial.category.clone().unwrap_or_default());
    let (unit, set_unit) = signal(initial.unit.clone().unwrap_or_default());
    let (ref_min, set_ref_min) =
        signal(initial.ref_min.map(|v| v.to_string()).unwrap_or_default());
    let (ref_max, set_ref_max) =
        signal(initial.ref_max.map(|v| v.to_string()).unwrap_or_default());
    let (possible_names, set_possible_names) =
        signal(initial.possible_names.clone().unwrap_or_default());
    let (field_error, set_field_error) = signal::<Option<&'static str>>(None);

    let do_save = move |_| {
        match build_definition(
            id,
            &test_name.get(),
            &category.get(),
            &unit.get(),
            &ref_min.get(),
            &ref_max.get(),
            &possible_names.get(),
        ) {
            Ok(definition) => {
                set_field_error.set(None);
                on_save.run(definition);
            }
            Err(message) => set_field_error.set(Some(message)),
        }
    };

    view! {
        <div class="modal-overlay">
            <div class="modal-content">
                <h2 class="modal-title">{if editing { "Edit Test" } else { "Add Test" }}</h2>
                <div class="definition-fields">
                    {definition_input("TEST NAME", test_name, set_test_name)}
                    {definition_input("CATEGORY", category, set_category)}
                    {definition_input("UNIT", unit, set_unit)}
                    {definition_input("REF MIN", ref_min, set_ref_min)}
                    {definition_input("REF MAX", ref_max, set_ref_max)}
                    {definition_input("POSSIBLE NAMES", possible_names, set_possible_names)}
                </div>
                {move || field_error.get().map(|message| view! {
                    <p class="form-error">{message}</p>
                })}
                {move || save_error.get().map(|message| view! {
                    <p class="form-error">{message}</p>
                })}
                <div class="modal-actions">
                    <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn-primary"
                        disabled=move || saving.get()
                        on:click=do_save
                    >
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

fn definition_input(
    placeholder: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <input
            type="text"
            class="input"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| set_value.set(event_target_value(&ev))
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(name: &str, min: &str, max: &str) -> Result<TestDefinition, &'static str> {
        build_definition(None, name, "Blood", "g/dL", min, max, "Hb, HGB")
    }

    #[test]
    fn test_valid_fields_build_a_row() {
        let definition = build("Hemoglobin", "13", "17").unwrap();
        assert_eq!(definition.test_name, "Hemoglobin");
        assert_eq!(definition.category.as_deref(), Some("Blood"));
        assert_eq!(definition.ref_min, Some(13.0));
        assert_eq!(definition.ref_max, Some(17.0));
    }

    #[test]
    fn test_name_is_required() {
        assert_eq!(build("", "13", "17"), Err("Test name is required."));
        assert_eq!(build("   ", "13", "17"), Err("Test name is required."));
    }

    #[test]
    fn test_bounds_must_be_numbers() {
        let message = "Reference Min and Max must be valid numbers.";
        assert_eq!(build("Hemoglobin", "abc", "17"), Err(message));
        assert_eq!(build("Hemoglobin", "13", "17x"), Err(message));
        // A lone malformed bound is still rejected.
        assert_eq!(build("Hemoglobin", "abc", ""), Err(message));
        assert_eq!(build("Hemoglobin", "NaN", "17"), Err(message));
    }

    #[test]
    fn test_max_must_exceed_min() {
        let message = "Reference Max must be greater than Reference Min.";
        assert_eq!(build("Glucose", "100", "70"), Err(message));
        assert_eq!(build("Glucose", "70", "70"), Err(message));
    }

    #[test]
    fn test_single_bound_is_allowed() {
        let definition = build("Vitamin D", "30", "").unwrap();
        assert_eq!(definition.ref_min, Some(30.0));
        assert_eq!(definition.ref_max, None);
    }

    #[test]
    fn test_empty_optional_fields_become_none() {
        let definition =
            build_definition(None, "  TSH  ", "", " ", "", "", "").unwrap();
        assert_eq!(definition.test_name, "TSH");
        assert!(definition.category.is_none());
        assert!(definition.unit.is_none());
        assert!(definition.possible_names.is_none());
    }

    #[test]
    fn test_id_is_kept_for_edits() {
        let definition =
            build_definition(Some(9), "Glucose", "", "", "70", "100", "").unwrap();
        assert_eq!(definition.id, Some(9));
    }
}
