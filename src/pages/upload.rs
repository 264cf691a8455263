use leptos::ev::SubmitEvent;
use leptos::html::Input;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::location::State;
use leptos_router::NavigateOptions;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ReportState};
use crate::components::icons::{LockClosedIcon, XMarkIcon};

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

/// Client-side gate for the /myadmin route. Not an access-control
/// mechanism: the backend applies no auth of its own.
fn admin_credentials_match(username: &str, password: &str) -> bool {
    username == ADMIN_USERNAME && password == ADMIN_PASSWORD
}

/// Pre-flight check: a name and a file are both required before any
/// request goes out. Returns the trimmed name to submit.
fn validate_submission(name: &str, has_file: bool) -> Result<String, &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() || !has_file {
        return Err("Please fill in all fields");
    }
    Ok(trimmed.to_string())
}

/// Landing page: report upload form plus the admin login gate.
#[component]
pub fn UploadPage() -> impl IntoView {
    let navigate = use_navigate();
    // The login modal rebuilds its view on every open, so handlers inside it
    // may only capture Copy values. The stored value keeps the navigate
    // handle usable there.
    let nav_admin = StoredValue::new_local(navigate.clone());

    // Form state
    let (name, set_name) = signal(String::new());
    let (file_name, set_file_name) = signal::<Option<String>>(None);
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let (uploading, set_uploading) = signal(false);
    let (drag_over, set_drag_over) = signal(false);
    let file_input = NodeRef::<Input>::new();

    // Admin login state
    let (show_login, set_show_login) = signal(false);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (login_error, set_login_error) = signal::<Option<&'static str>>(None);

    let selected_file = move || {
        file_input
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
    };

    let on_file_change = move |_| {
        set_file_name.set(selected_file().map(|file| file.name()));
    };

    // Dropped files land in the hidden input so submit has one place to look.
    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_drag_over.set(false);
        let files = match ev.data_transfer().and_then(|dt| dt.files()) {
            Some(files) => files,
            None => return,
        };
        let file = match files.get(0) {
            Some(file) => file,
            None => return,
        };
        if let Some(input) = file_input.get() {
            input.set_files(Some(&files));
        }
        set_file_name.set(Some(file.name()));
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if uploading.get() {
            return;
        }

        let file = selected_file();
        let user_name = match validate_submission(&name.get(), file.is_some()) {
            Ok(name) => name,
            Err(message) => {
                set_form_error.set(Some(message.to_string()));
                return;
            }
        };
        let file = match file {
            Some(file) => file,
            None => return,
        };

        set_form_error.set(None);
        set_uploading.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::analyze_report(&user_name, &file).await {
                Ok(results) => {
                    let report = ReportState { user_name, results };
                    let state = serde_wasm_bindgen::to_value(&report).ok();
                    navigate(
                        "/result",
                        NavigateOptions {
                            state: State::new(state),
                            ..Default::default()
                        },
                    );
                }
                Err(e) => {
                    tracing::error!("report analysis failed: {e}");
                    // try_set: the response may land after this page is gone.
                    let _ = set_form_error.try_set(Some(format!("Analysis failed: {e}")));
                    let _ = set_uploading.try_set(false);
                }
            }
        });
    };

    let close_login = move |_| {
        set_show_login.set(false);
        set_username.set(String::new());
        set_password.set(String::new());
        set_login_error.set(None);
    };

    let on_login = move |ev: SubmitEvent| {
        ev.prevent_default();
        if admin_credentials_match(&username.get(), &password.get()) {
            nav_admin.with_value(|nav| nav("/myadmin", NavigateOptions::default()));
        } else {
            set_login_error.set(Some("Invalid credentials"));
        }
    };

    view! {
        <div class="page upload-page">
            <style>{include_str!("upload.css")}</style>

            <button
                class="admin-lock"
                title="Admin Login"
                on:click=move |_| set_show_login.set(true)
            >
                <LockClosedIcon class="icon-lg" />
            </button>

            <section class="intro-panel">
                <h2>"Analyze Your Lab Report"</h2>
                <p>
                    "Discover what your lab test reveals about your overall health and wellness."
                </p>
                <p>
                    "Our smart analyzer highlights results using color-coded indicators, so you \
                     can easily understand what's within range and what needs attention."
                </p>
                <p>
                    "Ideal for tracking fitness goals, making lifestyle changes, or sharing \
                     insights with your coach or healthcare professional."
                </p>
            </section>

            <section class="upload-panel">
                <form class="upload-form" on:submit=on_submit>
                    <h1>"Upload Report"</h1>
                    <p class="form-hint">"Upload your medical PDF report to see results"</p>

                    <label class="field-label">"Name"</label>
                    <input
                        type="text"
                        class="input"
                        placeholder="Enter Your Good Name"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />

                    <label class="field-label">"Attach Document"</label>
                    <div
                        class="drop-zone"
                        class:drop-zone-active=move || drag_over.get()
                        on:dragover=move |ev: web_sys::DragEvent| {
                            ev.prevent_default();
                            set_drag_over.set(true);
                        }
                        on:dragleave=move |_| set_drag_over.set(false)
                        on:drop=on_drop
                    >
                        <input
                            type="file"
                            id="report-file-input"
                            accept=".pdf"
                            style="display: none"
                            node_ref=file_input
                            on:change=on_file_change
                        />
                        <label for="report-file-input" class="drop-zone-label">
                            {move || {
                                file_name.get().unwrap_or_else(|| {
                                    "Drag and drop or click to select a PDF file".to_string()
                                })
                            }}
                        </label>
                    </div>

                    {move || form_error.get().map(|message| view! {
                        <p class="form-error">{message}</p>
                    })}

                    <button
                        type="submit"
                        class="btn btn-primary btn-block"
                        disabled=move || uploading.get()
                    >
                        {move || if uploading.get() { "Analyzing..." } else { "Upload" }}
                    </button>
                </form>
            </section>

            <Show when=move || show_login.get()>
                <div class="modal-overlay">
                    <div class="modal-content login-modal">
                        <button class="modal-close" title="Close" on:click=close_login>
                            <XMarkIcon class="icon-sm" />
                        </button>
                        <h2 class="modal-title">"Admin Login"</h2>
                        <form on:submit=on_login>
                            <input
                                type="text"
                                class="input"
                                placeholder="Username"
                                prop:value=move || username.get()
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                            />
                            <input
                                type="password"
                                class="input"
                                placeholder="Password"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                            />
                            {move || login_error.get().map(|message| view! {
                                <p class="form-error">{message}</p>
                            })}
                            <button type="submit" class="btn btn-primary btn-block">
                                "Login"
                            </button>
                        </form>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_gate_compares_exact_literals() {
        assert!(admin_credentials_match("admin", "admin123"));
        assert!(!admin_credentials_match("admin", "admin1234"));
        assert!(!admin_credentials_match("Admin", "admin123"));
        assert!(!admin_credentials_match("", ""));
    }

    #[test]
    fn test_submission_requires_name_and_file() {
        assert_eq!(validate_submission("", true), Err("Please fill in all fields"));
        assert_eq!(validate_submission("   ", true), Err("Please fill in all fields"));
        assert_eq!(validate_submission("Maya", false), Err("Please fill in all fields"));
        assert_eq!(validate_submission(" Maya ", true), Ok("Maya".to_string()));
    }

    #[test]
    fn test_login_handler_stays_reusable_across_modal_opens() {
        // The modal hands its submit handler to the form anew on every open,
        // so giving the handler away must not consume it. That holds only
        // while everything it captures is Copy, which the stored navigate
        // handle guarantees.
        fn attach(handler: impl Fn(&'static str)) {
            handler("/myadmin");
        }

        let visited = StoredValue::new_local(Vec::<&'static str>::new());
        let on_login = move |path: &'static str| {
            visited.update_value(|paths| paths.push(path));
        };

        let open_modal = move || attach(on_login);
        open_modal();
        open_modal();
        assert_eq!(visited.with_value(|paths| paths.len()), 2);
    }
}
