//! Table views for dashboard data display.
//!
//! Provides the summary table shown beneath the charts, recomputed from the
//! same filtered records as the scatter chart.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{
        PayloadRange, SiteFilter, payload_outcome_points, summarize_launches,
    },
    dataset::LaunchDataset,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_mass},
};

/// Renders a table summarizing the launches matched by the current controls.
///
/// Shows launch, success and failure counts, the success rate and the mean
/// payload mass. An empty filtered view renders dashes instead of numbers.
pub(super) fn launch_summary_table(
    dataset: &LaunchDataset,
    site_filter: &SiteFilter,
    range: PayloadRange,
) -> Markup {
    let points = payload_outcome_points(dataset.records(), site_filter, range);
    let summary = summarize_launches(&points);

    let success_rate = summary
        .success_rate()
        .map(|rate| format!("{:.0}%", rate * 100.0))
        .unwrap_or_else(|| "-".to_owned());
    let mean_payload = summary
        .mean_payload_kg
        .map(format_mass)
        .unwrap_or_else(|| "-".to_owned());

    html! {
        div class="w-full" {
            h3 class="text-xl font-semibold mb-4" { "Filtered Launch Summary" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Launches" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Successes" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Failures" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Success Rate" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Mean Payload" }
                        }
                    }
                    tbody {
                        tr class=(TABLE_ROW_STYLE) {
                            td class=(TABLE_CELL_STYLE) { (summary.launches) }
                            td class=(TABLE_CELL_STYLE) { (summary.successes) }
                            td class=(TABLE_CELL_STYLE) { (summary.failures) }
                            td class=(TABLE_CELL_STYLE) { (success_rate) }
                            td class=(TABLE_CELL_STYLE) { (mean_payload) }
                        }
                    }
                }
            }
        }
    }
}
