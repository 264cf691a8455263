use crate::api::TestResult;

/// Status literal the backend uses for values inside their reference range.
/// Any other status files as out of range.
pub const IN_RANGE_STATUS: &str = "In Range";

/// Display category for results the backend returned without one.
pub const FALLBACK_CATEGORY: &str = "Others";

/// Notice shown when requesting or saving the PDF report fails.
pub const DOWNLOAD_FAILED_NOTICE: &str = "Failed to download PDF.";

/// Which partition of each category the result page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeTab {
    InRange,
    #[default]
    OutRange,
}

impl RangeTab {
    /// Notice shown when the active tab has no results in a category.
    pub fn empty_message(self) -> &'static str {
        match self {
            RangeTab::InRange => "No in-range tests found in this category.",
            RangeTab::OutRange => "No out-of-range tests found in this category.",
        }
    }
}

pub fn is_in_range(result: &TestResult) -> bool {
    result.status == IN_RANGE_STATUS
}

pub fn display_category(result: &TestResult) -> &str {
    result.category.as_deref().unwrap_or(FALLBACK_CATEGORY)
}

/// One category's results, in the order the backend returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub name: String,
    pub results: Vec<TestResult>,
}

impl CategoryGroup {
    /// Results belonging to the given tab, in original order.
    pub fn partition(&self, tab: RangeTab) -> Vec<TestResult> {
        self.results
            .iter()
            .filter(|result| match tab {
                RangeTab::InRange => is_in_range(result),
                RangeTab::OutRange => !is_in_range(result),
            })
            .cloned()
            .collect()
    }

    pub fn in_range_count(&self) -> usize {
        self.results.iter().filter(|r| is_in_range(r)).count()
    }

    pub fn out_of_range_count(&self) -> usize {
        self.results.len() - self.in_range_count()
    }
}

/// Group results by display category. Categories appear in first-seen
/// order and each group keeps the original order of its results.
pub fn group_by_category(results: &[TestResult]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for result in results {
        let category = display_category(result);
        match groups.iter_mut().find(|group| group.name == category) {
            Some(group) => group.results.push(result.clone()),
            None => groups.push(CategoryGroup {
                name: category.to_string(),
                results: vec![result.clone()],
            }),
        }
    }
    groups
}

/// Human-readable reference range, e.g. "70 – 100 mg/dL" or "> 45 mg/dL".
pub fn ideal_range_text(result: &TestResult) -> String {
    match (result.ref_min, result.ref_max) {
        (Some(min), Some(max)) => format!("{} – {} {}", min, max, result.unit),
        (Some(min), None) => format!("> {} {}", min, result.unit),
        (None, Some(max)) => format!("< {} {}", max, result.unit),
        (None, None) => "-".to_string(),
    }
}

/// Fill percentage for the reference-range bar, clamped to [0, 100].
/// Degenerate ranges must not break rendering: the zero-width 0/0 case
/// maps to an empty bar, overflow clamps to the nearest end.
pub fn range_bar_percent(value: f64, ref_min: f64, ref_max: f64) -> f64 {
    let percent = (value - ref_min) / (ref_max - ref_min) * 100.0;
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(name: &str, category: Option<&str>, status: &str) -> TestResult {
        TestResult {
            name: name.to_string(),
            category: category.map(str::to_string),
            value: 50.0,
            unit: "mg/dL".to_string(),
            ref_min: Some(40.0),
            ref_max: Some(60.0),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_in_range_matches_exact_literal() {
        assert!(is_in_range(&make_result("Glucose", None, "In Range")));
        assert!(!is_in_range(&make_result("Glucose", None, "Out of Range")));
        // Comparison is exact: casing and unknown statuses file as out of range.
        assert!(!is_in_range(&make_result("Glucose", None, "in range")));
        assert!(!is_in_range(&make_result("Glucose", None, "Borderline")));
    }

    #[test]
    fn test_missing_category_displays_as_others() {
        assert_eq!(display_category(&make_result("TSH", None, "In Range")), "Others");
        assert_eq!(
            display_category(&make_result("TSH", Some("Thyroid"), "In Range")),
            "Thyroid"
        );
    }

    #[test]
    fn test_grouping_keeps_first_seen_order() {
        let results = vec![
            make_result("Hemoglobin", Some("Blood"), "In Range"),
            make_result("Vitamin D", None, "Out of Range"),
            make_result("RBC", Some("Blood"), "Out of Range"),
        ];
        let groups = group_by_category(&results);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Blood");
        assert_eq!(groups[1].name, "Others");
        // Within a category, the original order survives.
        assert_eq!(groups[0].results[0].name, "Hemoglobin");
        assert_eq!(groups[0].results[1].name, "RBC");
    }

    #[test]
    fn test_group_counts_sum_to_total() {
        let results = vec![
            make_result("A", Some("Blood"), "In Range"),
            make_result("B", Some("Blood"), "Out of Range"),
            make_result("C", Some("Blood"), "Borderline"),
            make_result("D", Some("Liver"), "In Range"),
            make_result("E", None, "Out of Range"),
        ];
        for group in group_by_category(&results) {
            assert_eq!(
                group.in_range_count() + group.out_of_range_count(),
                group.results.len(),
                "counts must sum to the group total for {}",
                group.name
            );
        }
    }

    #[test]
    fn test_partition_follows_tab() {
        let group = CategoryGroup {
            name: "Blood".to_string(),
            results: vec![
                make_result("A", Some("Blood"), "In Range"),
                make_result("B", Some("Blood"), "Out of Range"),
                make_result("C", Some("Blood"), "In Range"),
            ],
        };
        let in_range = group.partition(RangeTab::InRange);
        assert_eq!(in_range.len(), 2);
        assert_eq!(in_range[0].name, "A");
        assert_eq!(in_range[1].name, "C");
        assert_eq!(group.partition(RangeTab::OutRange).len(), 1);
    }

    #[test]
    fn test_default_tab_is_out_of_range() {
        assert_eq!(RangeTab::default(), RangeTab::OutRange);
    }

    #[test]
    fn test_empty_tab_messages() {
        assert_eq!(
            RangeTab::InRange.empty_message(),
            "No in-range tests found in this category."
        );
        assert_eq!(
            RangeTab::OutRange.empty_message(),
            "No out-of-range tests found in this category."
        );
    }

    #[test]
    fn test_download_failure_notice() {
        assert_eq!(DOWNLOAD_FAILED_NOTICE, "Failed to download PDF.");
    }

    #[test]
    fn test_ideal_text_covers_all_bound_shapes() {
        let mut result = make_result("Glucose", None, "In Range");
        result.ref_min = Some(70.0);
        result.ref_max = Some(100.0);
        assert_eq!(ideal_range_text(&result), "70 – 100 mg/dL");

        result.ref_max = None;
        assert_eq!(ideal_range_text(&result), "> 70 mg/dL");

        result.ref_min = None;
        result.ref_max = Some(100.0);
        assert_eq!(ideal_range_text(&result), "< 100 mg/dL");

        result.ref_max = None;
        assert_eq!(ideal_range_text(&result), "-");
    }

    #[test]
    fn test_ideal_text_keeps_fractional_bounds() {
        let mut result = make_result("TSH", None, "In Range");
        result.unit = "mIU/L".to_string();
        result.ref_min = Some(0.4);
        result.ref_max = Some(4.0);
        assert_eq!(ideal_range_text(&result), "0.4 – 4 mIU/L");
    }

    #[test]
    fn test_bar_percent_inside_range() {
        let percent = range_bar_percent(92.0, 70.0, 100.0);
        assert!((percent - 73.333).abs() < 0.01);
    }

    #[test]
    fn test_bar_percent_clamps_far_outside_values() {
        assert_eq!(range_bar_percent(-1_000.0, 70.0, 100.0), 0.0);
        assert_eq!(range_bar_percent(1_000_000.0, 70.0, 100.0), 100.0);
    }

    #[test]
    fn test_bar_percent_zero_width_range() {
        // value == min == max divides 0 by 0; render as empty, not NaN.
        assert_eq!(range_bar_percent(5.0, 5.0, 5.0), 0.0);
        // Off the degenerate point the division overflows and clamps.
        assert_eq!(range_bar_percent(9.0, 5.0, 5.0), 100.0);
        assert_eq!(range_bar_percent(1.0, 5.0, 5.0), 0.0);
    }

    #[test]
    fn test_bar_percent_inverted_range_stays_bounded() {
        for value in [-50.0, 0.0, 80.0, 100.0, 500.0] {
            let percent = range_bar_percent(value, 100.0, 70.0);
            assert!(
                (0.0..=100.0).contains(&percent),
                "value {} produced {}",
                value,
                percent
            );
        }
    }
}
