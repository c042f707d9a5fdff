//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for displaying the dashboard and recomputing its charts
//! - HTML view functions for rendering the dashboard UI
//! - State and form types used by the handlers
//!
//! The controls form posts its values whenever a control changes; the
//! response fragment replaces the charts section in place, so the rest of the
//! page never reloads.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, PreEscaped, html};
use serde::Deserialize;

use crate::{
    AppState,
    dashboard::{
        aggregation::{PayloadRange, SiteFilter},
        charts::{DashboardChart, build_dashboard_charts, charts_view, init_snippet},
        tables::launch_summary_table,
    },
    dataset::LaunchDataset,
    endpoints,
    html::{FORM_LABEL_STYLE, FORM_RANGE_STYLE, FORM_SELECT_STYLE, HeadElement, base},
};

/// CDN URL for Apache ECharts, pinned to the version the init script targets.
const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// Upper bound of the payload range sliders, in kilograms.
const PAYLOAD_SLIDER_MAX_KG: f64 = 10_000.0;
/// Step size of the payload range sliders, in kilograms.
const PAYLOAD_STEP_KG: f64 = 1000.0;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The launch records loaded at startup.
    pub dataset: Arc<LaunchDataset>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            dataset: state.dataset.clone(),
        }
    }
}

/// Form data submitted by the dashboard controls.
#[derive(Debug, Deserialize)]
pub struct ControlsForm {
    /// The selected site option: "ALL" or a concrete site identifier.
    pub site: String,
    /// The lower payload bound in kilograms.
    pub payload_low: f64,
    /// The upper payload bound in kilograms.
    pub payload_high: f64,
}

/// Display the launch records dashboard with its default control values.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Response {
    let dataset = &state.dataset;

    // The range control starts at the observed payload bounds, so the first
    // render includes every record.
    let site_filter = SiteFilter::All;
    let range = PayloadRange::new(dataset.min_payload(), dataset.max_payload());

    let charts = build_dashboard_charts(dataset, &site_filter, range);

    dashboard_view(dataset, &site_filter, range, &charts).into_response()
}

/// Recompute the dashboard charts for the submitted control values.
///
/// Returns the charts section only; the controls form swaps it into the page
/// in place of the previous one.
pub async fn update_dashboard_charts(
    State(state): State<DashboardState>,
    Form(form): Form<ControlsForm>,
) -> Response {
    let dataset = &state.dataset;

    let site_filter = SiteFilter::from_control_value(&form.site);
    // Hand-crafted requests may reverse the bounds; treat them as the same
    // interval rather than rejecting the request.
    let range = PayloadRange::new(
        form.payload_low.min(form.payload_high),
        form.payload_low.max(form.payload_high),
    );

    tracing::debug!("Recomputing charts for {site_filter:?} over {range:?}");

    let charts = build_dashboard_charts(dataset, &site_filter, range);

    charts_section(dataset, &site_filter, range, &charts).into_response()
}

/// Renders the main dashboard page with its heading, controls and charts.
fn dashboard_view(
    dataset: &LaunchDataset,
    site_filter: &SiteFilter,
    range: PayloadRange,
    charts: &[DashboardChart],
) -> Markup {
    let content = html!(
        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            h1 class="text-3xl lg:text-4xl font-bold text-center my-4"
            {
                "SpaceX Launch Records"
            }

            (controls_form(dataset.sites(), site_filter, range))

            (charts_section(dataset, site_filter, range, charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_CDN.to_owned()),
        slider_sync_script(),
    ];

    base("Dashboard", &scripts, &content)
}

/// Renders the charts section: chart containers, the summary table and the
/// script that hydrates the charts.
///
/// This is both part of the full page and the response to a control change.
fn charts_section(
    dataset: &LaunchDataset,
    site_filter: &SiteFilter,
    range: PayloadRange,
    charts: &[DashboardChart],
) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            (charts_view(charts))

            (launch_summary_table(dataset, site_filter, range))

            script { (PreEscaped(init_snippet(charts))) }
        }
    )
}

/// Renders the controls form: the site selector and the payload range
/// sliders.
///
/// Any change to a control posts the whole form and swaps the charts section
/// with the recomputed one.
fn controls_form(sites: &[String], site_filter: &SiteFilter, range: PayloadRange) -> Markup {
    let low = format!("{:.0}", range.low);
    let high = format!("{:.0}", range.high);

    html!(
        form
            id="dashboard-controls"
            hx-post=(endpoints::DASHBOARD_CHARTS)
            hx-target="#charts"
            hx-swap="outerHTML"
            hx-trigger="change"
            class="w-full bg-gray-50 dark:bg-gray-800 p-4 rounded-lg mb-4 shadow"
        {
            div class="mb-4"
            {
                label for="site" class=(FORM_LABEL_STYLE) { "Launch Site" }

                select
                    name="site"
                    id="site"
                    class=(FORM_SELECT_STYLE)
                {
                    option
                        value=(SiteFilter::ALL_SITES)
                        selected[*site_filter == SiteFilter::All]
                    {
                        "All Sites"
                    }

                    @for site in sites {
                        option value=(site) selected[site_filter.selects(site)] { (site) }
                    }
                }
            }

            p class="mb-2 text-sm font-medium" { "Payload range (kg):" }

            div class="grid grid-cols-1 md:grid-cols-2 gap-4"
            {
                div
                {
                    label for="payload-low" class=(FORM_LABEL_STYLE)
                    {
                        "Minimum: "
                        output id="payload-low-value" { (low) }
                    }

                    input
                        type="range"
                        name="payload_low"
                        id="payload-low"
                        class=(FORM_RANGE_STYLE)
                        min="0"
                        max=(PAYLOAD_SLIDER_MAX_KG)
                        step=(PAYLOAD_STEP_KG)
                        value=(low)
                        list="payload-ticks"
                        data-output="payload-low-value";
                }

                div
                {
                    label for="payload-high" class=(FORM_LABEL_STYLE)
                    {
                        "Maximum: "
                        output id="payload-high-value" { (high) }
                    }

                    input
                        type="range"
                        name="payload_high"
                        id="payload-high"
                        class=(FORM_RANGE_STYLE)
                        min="0"
                        max=(PAYLOAD_SLIDER_MAX_KG)
                        step=(PAYLOAD_STEP_KG)
                        value=(high)
                        list="payload-ticks"
                        data-output="payload-high-value";
                }
            }

            datalist id="payload-ticks"
            {
                @for mark in (0..=10).map(|step| step * 1000) {
                    option value=(mark) {}
                }
            }
        }
    )
}

/// Keeps the printed slider values next to the labels in step with the
/// sliders while the user drags them.
fn slider_sync_script() -> HeadElement {
    HeadElement::ScriptSource(PreEscaped(
        r#"document.addEventListener('input', (event) => {
    const slider = event.target;
    if (slider.matches('input[type="range"][data-output]')) {
        document.getElementById(slider.dataset.output).textContent = slider.value;
    }
});"#
            .to_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use axum_extra::extract::Form;
    use scraper::{Html, Selector};

    use crate::dataset::{LaunchDataset, LaunchRecord, Outcome};

    use super::{ControlsForm, DashboardState, get_dashboard_page, update_dashboard_charts};

    fn create_test_record(site: &str, payload_mass_kg: f64, booster: &str, success: bool) -> LaunchRecord {
        LaunchRecord {
            site: site.to_owned(),
            payload_mass_kg,
            booster_version: booster.to_owned(),
            outcome: if success {
                Outcome::Success
            } else {
                Outcome::Failure
            },
        }
    }

    fn get_test_state() -> DashboardState {
        let dataset = LaunchDataset::new(vec![
            create_test_record("CCAFS LC-40", 500.0, "F9 v1.0", true),
            create_test_record("CCAFS LC-40", 1500.0, "F9 v1.0", false),
            create_test_record("VAFB SLC-4E", 3000.0, "F9 FT", true),
            create_test_record("KSC LC-39A", 9600.0, "F9 B4", true),
        ])
        .unwrap();

        DashboardState {
            dataset: Arc::new(dataset),
        }
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        assert_chart_exists(&html, "success-pie-chart");
        assert_chart_exists(&html, "success-payload-scatter-chart");
        assert_table_exists(&html);
    }

    #[tokio::test]
    async fn dashboard_page_lists_every_site_plus_the_all_option() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state)).await;
        let html = parse_html(response).await;

        let selector = Selector::parse("select[name='site'] option").unwrap();
        let options: Vec<_> = html.select(&selector).collect();

        assert_eq!(options.len(), 4, "expected ALL + 3 sites");
        assert_eq!(options[0].attr("value"), Some("ALL"));
        assert_eq!(options[1].attr("value"), Some("CCAFS LC-40"));

        // Only the "All Sites" option starts out selected.
        assert!(options[0].attr("selected").is_some());
        assert!(options[1..].iter().all(|o| o.attr("selected").is_none()));
    }

    #[tokio::test]
    async fn dashboard_page_initializes_sliders_to_dataset_bounds() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state)).await;
        let html = parse_html(response).await;

        let low_selector = Selector::parse("input[name='payload_low']").unwrap();
        let low = html.select(&low_selector).next().unwrap();
        assert_eq!(low.attr("value"), Some("500"));
        assert_eq!(low.attr("step"), Some("1000"));
        assert_eq!(low.attr("max"), Some("10000"));

        let high_selector = Selector::parse("input[name='payload_high']").unwrap();
        let high = html.select(&high_selector).next().unwrap();
        assert_eq!(high.attr("value"), Some("9600"));
    }

    #[tokio::test]
    async fn update_returns_recomputed_charts_fragment() {
        let state = get_test_state();
        let form = ControlsForm {
            site: "CCAFS LC-40".to_owned(),
            payload_low: 0.0,
            payload_high: 10_000.0,
        };

        let response = update_dashboard_charts(State(state), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let text = response_text(response).await;
        let fragment = Html::parse_fragment(&text);

        // The fragment is the charts section with its hydration script, not a
        // full page.
        assert!(!text.contains("<html"));
        assert_chart_exists(&fragment, "success-pie-chart");
        let script_selector = Selector::parse("script").unwrap();
        assert!(fragment.select(&script_selector).next().is_some());

        assert!(text.contains("Success vs. Failure for site CCAFS LC-40"));
        assert!(text.contains("Payload vs. Outcome for site CCAFS LC-40"));
    }

    #[tokio::test]
    async fn update_normalizes_reversed_slider_bounds() {
        let state = get_test_state();
        let form = ControlsForm {
            site: "ALL".to_owned(),
            payload_low: 5000.0,
            payload_high: 1000.0,
        };

        let response = update_dashboard_charts(State(state), Form(form)).await;
        let text = response_text(response).await;
        let fragment = Html::parse_fragment(&text);

        // [1000, 5000] matches the 1500 and 3000 kg launches.
        let cells = table_cell_texts(&fragment);
        assert_eq!(cells[0], "2");
    }

    #[tokio::test]
    async fn update_with_unknown_site_yields_empty_results() {
        let state = get_test_state();
        let form = ControlsForm {
            site: "Boca Chica".to_owned(),
            payload_low: 0.0,
            payload_high: 10_000.0,
        };

        let response = update_dashboard_charts(State(state), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let text = response_text(response).await;
        let fragment = Html::parse_fragment(&text);

        let cells = table_cell_texts(&fragment);
        assert_eq!(cells[0], "0");
    }

    #[test]
    fn controls_form_decodes_url_encoded_values() {
        let form_data = "site=KSC+LC-39A&payload_low=2000&payload_high=8000";

        let form: ControlsForm = serde_html_form::from_str(form_data).unwrap();

        assert_eq!(form.site, "KSC LC-39A");
        assert_eq!(form.payload_low, 2000.0);
        assert_eq!(form.payload_high, 8000.0);
    }

    async fn response_text(response: Response<Body>) -> String {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();

        String::from_utf8_lossy(&body).to_string()
    }

    async fn parse_html(response: Response<Body>) -> Html {
        Html::parse_document(&response_text(response).await)
    }

    fn table_cell_texts(fragment: &Html) -> Vec<String> {
        let selector = Selector::parse("td").unwrap();

        fragment
            .select(&selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_chart_exists(html: &Html, chart_id: &str) {
        let selector = Selector::parse(&format!("#{}", chart_id)).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Chart with id '{}' not found",
            chart_id
        );
    }

    #[track_caller]
    fn assert_table_exists(html: &Html) {
        let selector = Selector::parse("table").unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Launch summary table not found"
        );
    }
}
