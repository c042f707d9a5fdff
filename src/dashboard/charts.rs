//! Chart generation and rendering for the dashboard.
//!
//! This module creates the two ECharts visualizations for launch data:
//! - **Success proportion chart**: successful launches per site, or the
//!   success/failure split within one site
//! - **Payload scatter chart**: payload mass against launch outcome for the
//!   filtered records, one series per booster version
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization
//! code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisType, Orient, Tooltip, Trigger},
    series::{Pie, Scatter},
};
use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{
        CorrelationPoint, PayloadRange, SiteFilter, outcome_counts_for_site,
        payload_outcome_points, success_counts_by_site,
    },
    dataset::{LaunchDataset, Outcome},
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Creates the pair of dashboard charts for the given control values.
///
/// The chart options are serialized to JSON for ECharts consumption.
pub(super) fn build_dashboard_charts(
    dataset: &LaunchDataset,
    site_filter: &SiteFilter,
    range: PayloadRange,
) -> [DashboardChart; 2] {
    let points = payload_outcome_points(dataset.records(), site_filter, range);

    [
        DashboardChart {
            id: "success-pie-chart",
            options: success_pie_chart(dataset, site_filter).to_string(),
        },
        DashboardChart {
            id: "success-payload-scatter-chart",
            options: payload_scatter_chart(&points, site_filter).to_string(),
        },
    ]
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
        {
            @for chart in charts {
                div
                    id=(chart.id)
                    class="min-h-[380px] rounded dark:bg-gray-100"
                {}
            }
        }
    )
}

/// Generates the JavaScript that initializes the dashboard charts.
///
/// Each chart gets an ECharts instance with dark mode support and responsive
/// resizing. The snippet assumes its container elements already exist, so it
/// must be rendered inline below them; this holds for the initial page load
/// and for every HTMX fragment swap.
pub(super) fn init_snippet(charts: &[DashboardChart]) -> String {
    charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn success_pie_chart(dataset: &LaunchDataset, site_filter: &SiteFilter) -> Chart {
    let (title, slices) = match site_filter {
        SiteFilter::All => {
            let counts = success_counts_by_site(dataset.records());
            let slices: Vec<(f64, String)> = counts
                .into_iter()
                .map(|entry| (f64::from(entry.successes), entry.site))
                .collect();

            ("Total Successful Launches by Site".to_owned(), slices)
        }
        SiteFilter::Site(site) => {
            let counts = outcome_counts_for_site(dataset.records(), site);
            // Both labels are always present; a zero count is a valid slice.
            let slices = vec![
                (f64::from(counts.successes), Outcome::Success.label().to_owned()),
                (f64::from(counts.failures), Outcome::Failure.label().to_owned()),
            ];

            (format!("Success vs. Failure for site {site}"), slices)
        }
    };

    Chart::new()
        .title(Title::new().text(title).left("center"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().orient(Orient::Vertical).left("left"))
        .series(
            Pie::new().name("Launches").radius("60%").data(
                slices
                    .iter()
                    .map(|(count, label)| (*count, label.as_str()))
                    .collect::<Vec<_>>(),
            ),
        )
}

fn payload_scatter_chart(points: &[CorrelationPoint], site_filter: &SiteFilter) -> Chart {
    let title = match site_filter {
        SiteFilter::All => "Payload vs. Outcome for All Sites".to_owned(),
        SiteFilter::Site(site) => format!("Payload vs. Outcome for site {site}"),
    };

    // One series per booster version, in first-appearance order, so the
    // chart colours points by hardware variant.
    let mut series_by_booster: Vec<(&str, Vec<Vec<f64>>)> = Vec::new();

    for point in points {
        let value = vec![point.payload_mass_kg, f64::from(point.outcome.as_flag())];

        match series_by_booster
            .iter_mut()
            .find(|(booster, _)| *booster == point.booster_version)
        {
            Some((_, data)) => data.push(value),
            None => series_by_booster.push((point.booster_version, vec![value])),
        }
    }

    let mut chart = Chart::new()
        .title(Title::new().text(title).left("center"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top(30))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(70)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("Payload Mass (kg)"),
        )
        .y_axis(Axis::new().type_(AxisType::Value).name("Launch Outcome"));

    for (booster, data) in series_by_booster {
        chart = chart.series(Scatter::new().name(booster).symbol_size(12).data(data));
    }

    chart
}
