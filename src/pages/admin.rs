use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, TestDefinition};
use crate::components::definition_form::DefinitionForm;
use crate::components::icons::{ArrowLeftIcon, PencilIcon, PlusIcon, TrashIcon};

/// Replace the matching row with the server's copy, or append a new one.
/// The server response is the canonical row; local edits never land as-is.
fn splice_saved(list: &mut Vec<TestDefinition>, saved: TestDefinition) {
    match list.iter().position(|d| d.id == saved.id) {
        Some(index) => list[index] = saved,
        None => list.push(saved),
    }
}

/// Drop the row the backend just deleted.
fn remove_by_id(list: &mut Vec<TestDefinition>, id: i64) {
    list.retain(|d| d.id != Some(id));
}

/// Catalog management: the table of recognized tests with add/edit/delete.
#[component]
pub fn AdminPage() -> impl IntoView {
    // Catalog list state
    let (definitions, set_definitions) = signal::<Vec<TestDefinition>>(vec![]);
    let (is_loading, set_is_loading) = signal(true);

    // Add/edit modal state
    let (show_form, set_show_form) = signal(false);
    let (editing, set_editing) = signal::<Option<TestDefinition>>(None);
    let (saving, set_saving) = signal(false);
    let (save_error, set_save_error) = signal::<Option<String>>(None);

    // Delete confirmation state
    let (pending_delete, set_pending_delete) = signal::<Option<TestDefinition>>(None);
    let (deleting, set_deleting) = signal(false);
    let (action_error, set_action_error) = signal::<Option<String>>(None);

    // Load the catalog on mount. A failed load is a console matter; the
    // page stays usable with an empty table and no retry.
    let load_definitions = move || {
        set_is_loading.set(true);
        spawn_local(async move {
            match api::list_tests().await {
                Ok(list) => {
                    let _ = set_definitions.try_set(list);
                }
                Err(e) => tracing::error!("fetching test definitions failed: {e}"),
            }
            let _ = set_is_loading.try_set(false);
        });
    };

    Effect::new(move |_| {
        load_definitions();
    });

    let open_add = move |_| {
        set_editing.set(None);
        set_save_error.set(None);
        set_action_error.set(None);
        set_show_form.set(true);
    };

    let open_edit = move |definition: TestDefinition| {
        set_editing.set(Some(definition));
        set_save_error.set(None);
        set_action_error.set(None);
        set_show_form.set(true);
    };

    let close_form = move |_: ()| {
        set_show_form.set(false);
        set_editing.set(None);
        set_save_error.set(None);
    };

    // Create or update, decided by the presence of an id. On success the
    // form closes and the list takes the server's row; on failure the form
    // stays open with the message and the list is untouched.
    let do_save = move |definition: TestDefinition| {
        if saving.get() {
            return;
        }
        set_saving.set(true);
        set_save_error.set(None);
        spawn_local(async move {
            let result = match definition.id {
                Some(id) => api::update_test(id, &definition).await,
                None => api::create_test(&definition).await,
            };
            match result {
                Ok(saved) => {
                    let _ = set_definitions.try_update(|list| splice_saved(list, saved));
                    let _ = set_show_form.try_set(false);
                    let _ = set_editing.try_set(None);
                }
                Err(e) => {
                    tracing::error!("saving test definition failed: {e}");
                    let _ = set_save_error
                        .try_set(Some("Something went wrong while saving. Check console.".to_string()));
                }
            }
            let _ = set_saving.try_set(false);
        });
    };

    let request_delete = move |definition: TestDefinition| {
        set_action_error.set(None);
        set_pending_delete.set(Some(definition));
    };

    let cancel_delete = move |_| set_pending_delete.set(None);

    let do_delete = move |_| {
        if deleting.get() {
            return;
        }
        let id = match pending_delete.get().and_then(|d| d.id) {
            Some(id) => id,
            None => {
                set_pending_delete.set(None);
                return;
            }
        };
        set_deleting.set(true);
        spawn_local(async move {
            match api::delete_test(id).await {
                Ok(()) => {
                    let _ = set_definitions.try_update(|list| remove_by_id(list, id));
                }
                Err(e) => {
                    tracing::error!("deleting test definition failed: {e}");
                    let _ = set_action_error
                        .try_set(Some("Something went wrong while deleting. Check console.".to_string()));
                }
            }
            let _ = set_pending_delete.try_set(None);
            let _ = set_deleting.try_set(false);
        });
    };

    let go_back = move |_| {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                let _ = history.back();
            }
        }
    };

    view! {
        <div class="page admin-page">
            <style>{include_str!("admin.css")}</style>

            <header class="report-header">
                <button class="header-icon" title="Go back" on:click=go_back>
                    <ArrowLeftIcon class="icon" />
                </button>
                <h1 class="report-title">"Hi Admin"</h1>
                <span class="header-spacer"></span>
            </header>

            <div class="admin-panel">
                {move || action_error.get().map(|message| view! {
                    <div class="page-error">{message}</div>
                })}

                <div class="admin-toolbar">
                    <button class="btn btn-primary" on:click=open_add>
                        <PlusIcon class="icon-sm" />
                        "Add Test"
                    </button>
                </div>

                <Show when=move || is_loading.get()>
                    <div class="admin-loading">"Loading tests..."</div>
                </Show>

                <div class="table-wrap">
                    <table class="definition-table">
                        <thead>
                            <tr>
                                <th>"Test Name"</th>
                                <th>"Category"</th>
                                <th>"Unit"</th>
                                <th>"Ref Min"</th>
                                <th>"Ref Max"</th>
                                <th>"Possible Names"</th>
                                <th class="actions-col">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || definitions.get()
                                key=|definition| definition.id
                                children=move |definition| {
                                    let edit_row = definition.clone();
                                    let delete_row = definition.clone();
                                    view! {
                                        <tr>
                                            <td>{definition.test_name.clone()}</td>
                                            <td>{definition.category.clone().unwrap_or_default()}</td>
                                            <td>{definition.unit.clone().unwrap_or_default()}</td>
                                            <td>
                                                {definition.ref_min.map(|v| v.to_string()).unwrap_or_default()}
                                            </td>
                                            <td>
                                                {definition.ref_max.map(|v| v.to_string()).unwrap_or_default()}
                                            </td>
                                            <td>{definition.possible_names.clone().unwrap_or_default()}</td>
                                            <td class="actions-col">
                                                <button
                                                    class="row-action edit"
                                                    title="Edit"
                                                    on:click=move |_| open_edit(edit_row.clone())
                                                >
                                                    <PencilIcon class="icon-sm" />
                                                </button>
                                                <button
                                                    class="row-action delete"
                                                    title="Delete"
                                                    on:click=move |_| request_delete(delete_row.clone())
                                                >
                                                    <TrashIcon class="icon-sm" />
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>

            {move || show_form.get().then(|| view! {
                <DefinitionForm
                    existing=editing.get()
                    on_save=do_save
                    on_cancel=close_form
                    save_error=save_error
                    saving=saving
                />
            })}

            <Show when=move || pending_delete.get().is_some()>
                <div class="modal-overlay" on:click=cancel_delete>
                    <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                        <h3>"Delete Test?"</h3>
                        <p>
                            "Are you sure you want to delete \""
                            {move || {
                                pending_delete.get().map(|d| d.test_name).unwrap_or_default()
                            }}
                            "\"?"
                        </p>
                        <div class="modal-actions">
                            <button class="btn btn-secondary" on:click=cancel_delete>
                                "Cancel"
                            </button>
                            <button
                                class="btn btn-danger"
                                disabled=move || deleting.get()
                                on:click=do_delete
                            >
                                {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(id: Option<i64>, name: &str) -> TestDefinition {
        TestDefinition {
            id,
            test_name: name.to_string(),
            category: None,
            unit: None,
            ref_min: None,
            ref_max: None,
            possible_names: None,
        }
    }

    #[test]
    fn test_splice_replaces_existing_row_by_id() {
        let mut list = vec![make_row(Some(1), "Glucose"), make_row(Some(2), "TSH")];
        splice_saved(&mut list, make_row(Some(2), "TSH (3rd gen)"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].test_name, "TSH (3rd gen)");
    }

    #[test]
    fn test_splice_appends_new_row() {
        let mut list = vec![make_row(Some(1), "Glucose")];
        splice_saved(&mut list, make_row(Some(7), "Ferritin"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].id, Some(7));
    }

    #[test]
    fn test_remove_by_id_keeps_other_rows() {
        let mut list = vec![
            make_row(Some(1), "Glucose"),
            make_row(Some(2), "TSH"),
            make_row(None, "Draft"),
        ];
        remove_by_id(&mut list, 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, Some(2));
        // Rows without an id are never the deletion target.
        assert_eq!(list[1].id, None);
    }

    #[test]
    fn test_remove_missing_id_is_a_no_op() {
        let mut list = vec![make_row(Some(1), "Glucose")];
        remove_by_id(&mut list, 99);
        assert_eq!(list.len(), 1);
    }
}
