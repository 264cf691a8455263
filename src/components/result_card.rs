use leptos::prelude::*;

use crate::api::TestResult;
use crate::report::{ideal_range_text, is_in_range, range_bar_percent};

#[component]
pub fn ResultCard(result: TestResult) -> impl IntoView {
    let in_range = is_in_range(&result);
    let status_class = if in_range { "in-range" } else { "out-range" };
    let ideal = ideal_range_text(&result);
    let value_text = format!("{} {}", result.value, result.unit);

    // The fill bar only reads sensibly against a two-sided range.
    let range_bar = match (result.ref_min, result.ref_max) {
        (Some(min), Some(max)) => {
            let percent = range_bar_percent(result.value, min, max);
            Some(view! {
                <div class="range-track">
                    <div
                        class=format!("range-fill {}", status_class)
                        style=format!("width: {}%;", percent)
                    ></div>
                </div>
            })
        }
        _ => None,
    };

    view! {
        <div class=format!("result-card {}", status_class)>
            <h3 class="result-name">{result.name.clone()}</h3>
            <p class="result-ideal">"Ideal: " {ideal}</p>
            <p class=format!("result-value {}", status_class)>{value_text}</p>
            {range_bar}
        </div>
    }
}
