use leptos::prelude::*;
use leptos_router::hooks::use_location;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ReportState};
use crate::components::icons::{
    ArrowDownTrayIcon, ArrowLeftIcon, ChevronDownIcon, ChevronUpIcon,
};
use crate::components::result_card::ResultCard;
use crate::report::{group_by_category, RangeTab, DOWNLOAD_FAILED_NOTICE};

/// Analyzed report, grouped by category with an in/out-of-range tab filter.
#[component]
pub fn ResultPage() -> impl IntoView {
    // The report arrives as router history state. Opening /result directly,
    // or with state this page cannot decode, shows the empty view.
    let state = use_location().state.get_untracked().to_js_value();
    let report: ReportState = serde_wasm_bindgen::from_value(state).unwrap_or_default();

    let groups = group_by_category(&report.results);
    let has_results = !report.results.is_empty();
    let title = format!("Hi {}, here is your detailed report", report.user_name);
    let report_for_download = StoredValue::new(report);

    let (active_tab, set_active_tab) = signal(RangeTab::default());
    let (expanded, set_expanded) = signal::<Vec<String>>(vec![]);
    let (downloading, set_downloading) = signal(false);
    let (download_error, set_download_error) = signal::<Option<&'static str>>(None);

    let toggle_category = move |category: String| {
        set_expanded.update(|open| {
            match open.iter().position(|c| c == &category) {
                Some(index) => {
                    open.remove(index);
                }
                None => open.push(category),
            }
        });
    };

    let go_back = move |_| {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                let _ = history.back();
            }
        }
    };

    let on_download = move |_| {
        if downloading.get() {
            return;
        }
        set_downloading.set(true);
        set_download_error.set(None);
        let report = report_for_download.get_value();
        spawn_local(async move {
            match api::download_pdf(&report).await {
                Ok(bytes) => {
                    if let Err(e) = save_pdf(&bytes) {
                        tracing::error!("saving PDF failed: {e}");
                        let _ = set_download_error.try_set(Some(DOWNLOAD_FAILED_NOTICE));
                    }
                }
                Err(e) => {
                    tracing::error!("PDF request failed: {e}");
                    let _ = set_download_error.try_set(Some(DOWNLOAD_FAILED_NOTICE));
                }
            }
            let _ = set_downloading.try_set(false);
        });
    };

    view! {
        <div class="page result-page">
            <style>{include_str!("results.css")}</style>

            <header class="report-header">
                <button class="header-icon" title="Go back" on:click=go_back>
                    <ArrowLeftIcon class="icon" />
                </button>
                <h1 class="report-title">{title}</h1>
                <button
                    class="header-icon"
                    title="Download report"
                    disabled=move || downloading.get()
                    on:click=on_download
                >
                    <ArrowDownTrayIcon class="icon" />
                </button>
            </header>

            {move || download_error.get().map(|message| view! {
                <div class="page-error">{message}</div>
            })}

            <Show when=move || !has_results>
                <div class="empty-report">
                    <p>"No test results found."</p>
                </div>
            </Show>

            <div class="report-body">
                <div class="tab-controller">
                    <button
                        class="tab tab-left"
                        class:tab-active=move || active_tab.get() == RangeTab::InRange
                        on:click=move |_| set_active_tab.set(RangeTab::InRange)
                    >
                        "In Range"
                    </button>
                    <button
                        class="tab tab-right"
                        class:tab-active=move || active_tab.get() == RangeTab::OutRange
                        on:click=move |_| set_active_tab.set(RangeTab::OutRange)
                    >
                        "Out of Range"
                    </button>
                </div>

                {groups
                    .into_iter()
                    .map(|group| {
                        let header = format!(
                            "{} ({} In Range / {} Out of Range)",
                            group.name,
                            group.in_range_count(),
                            group.out_of_range_count()
                        );
                        let category_toggle = group.name.clone();
                        let category_chevron = group.name.clone();
                        let category_show = group.name.clone();
                        let group_results = StoredValue::new(group);
                        view! {
                            <section class="category-section">
                                <button
                                    class="category-header"
                                    on:click=move |_| toggle_category(category_toggle.clone())
                                >
                                    <span>{header}</span>
                                    {move || {
                                        let open = expanded
                                            .get()
                                            .iter()
                                            .any(|c| c == &category_chevron);
                                        if open {
                                            view! { <ChevronUpIcon class="icon" /> }.into_any()
                                        } else {
                                            view! { <ChevronDownIcon class="icon" /> }.into_any()
                                        }
                                    }}
                                </button>
                                <Show when=move || {
                                    expanded.get().iter().any(|c| c == &category_show)
                                }>
                                    {move || {
                                        let tab = active_tab.get();
                                        let shown = group_results
                                            .with_value(|group| group.partition(tab));
                                        if shown.is_empty() {
                                            view! {
                                                <div class="category-empty">
                                                    {tab.empty_message()}
                                                </div>
                                            }
                                            .into_any()
                                        } else {
                                            view! {
                                                <div class="result-grid">
                                                    {shown
                                                        .into_iter()
                                                        .map(|result| view! {
                                                            <ResultCard result=result />
                                                        })
                                                        .collect::<Vec<_>>()}
                                                </div>
                                            }
                                            .into_any()
                                        }
                                    }}
                                </Show>
                            </section>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}

/// Hand the PDF bytes to the browser as a named download.
fn save_pdf(bytes: &[u8]) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "document is not available".to_string())?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).buffer());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = web_sys::Blob::new_with_buffer_source_sequence_and_options(&parts, &options)
        .map_err(|e| format!("{e:?}"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{e:?}"))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{e:?}"))?
        .dyn_into()
        .map_err(|_| "anchor element cast failed".to_string())?;
    anchor.set_href(&url);
    anchor.set_download("lab_report.pdf");
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(|e| format!("{e:?}"))?;
    Ok(())
}
