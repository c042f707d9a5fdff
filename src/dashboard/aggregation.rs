//! Launch record filtering and aggregation for the dashboard charts.
//!
//! These functions are pure: they take the loaded records plus the current
//! control values and return exactly the rows or counts a chart needs.
//! Nothing here is cached, so repeated calls with the same inputs always
//! produce the same output.

use crate::dataset::{LaunchRecord, Outcome};

/// The value of the site selector: every launch site, or one specific site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SiteFilter {
    /// The "all sites" option.
    All,
    /// A single launch site identifier.
    Site(String),
}

impl SiteFilter {
    /// The selector value the dashboard submits for the "all sites" option.
    pub const ALL_SITES: &'static str = "ALL";

    /// Parse the raw value submitted by the site selector.
    ///
    /// Anything other than the "all sites" sentinel is treated as a concrete
    /// site identifier. Values outside the dataset's site set are not an
    /// error; they simply match no records.
    pub fn from_control_value(value: &str) -> Self {
        if value == Self::ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_owned())
        }
    }

    /// Whether the selector currently picks out `site`.
    pub fn selects(&self, site: &str) -> bool {
        match self {
            SiteFilter::All => false,
            SiteFilter::Site(selected) => selected == site,
        }
    }

    fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(site) => record.site == *site,
        }
    }
}

/// A closed payload mass interval. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PayloadRange {
    /// The lower bound in kilograms.
    pub low: f64,
    /// The upper bound in kilograms.
    pub high: f64,
}

impl PayloadRange {
    /// Create a payload range from its bounds.
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

/// One entry of the all-sites proportion summary: a launch site and its
/// count of successful launches.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SiteSuccesses {
    /// The launch site identifier.
    pub site: String,
    /// How many launches from this site succeeded.
    pub successes: u32,
}

/// Count successful launches per site.
///
/// Every site that appears in `records` gets an entry, in first-appearance
/// order; a site whose launches all failed still gets a zero entry rather
/// than being dropped.
pub(super) fn success_counts_by_site(records: &[LaunchRecord]) -> Vec<SiteSuccesses> {
    let mut counts: Vec<SiteSuccesses> = Vec::new();

    for record in records {
        let success = u32::from(record.outcome == Outcome::Success);

        match counts.iter_mut().find(|entry| entry.site == record.site) {
            Some(entry) => entry.successes += success,
            None => counts.push(SiteSuccesses {
                site: record.site.clone(),
                successes: success,
            }),
        }
    }

    counts
}

/// Success and failure counts for a single launch site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct OutcomeCounts {
    /// How many launches from the site succeeded.
    pub successes: u32,
    /// How many launches from the site failed.
    pub failures: u32,
}

/// Count successes and failures among the launches from one site.
///
/// A site with no records yields two zero counts, not an error; the chart
/// renders zero-valued slices the same way it renders any other count.
pub(super) fn outcome_counts_for_site(records: &[LaunchRecord], site: &str) -> OutcomeCounts {
    let mut counts = OutcomeCounts::default();

    for record in records.iter().filter(|record| record.site == site) {
        match record.outcome {
            Outcome::Success => counts.successes += 1,
            Outcome::Failure => counts.failures += 1,
        }
    }

    counts
}

/// One point of the payload/outcome scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CorrelationPoint<'a> {
    /// The payload mass in kilograms (x value).
    pub payload_mass_kg: f64,
    /// The launch outcome (y value, plotted as its 0/1 flag).
    pub outcome: Outcome,
    /// The booster variant, used to colour the point by series.
    pub booster_version: &'a str,
}

/// Filter launches by payload range and site selection.
///
/// A record matches when its payload mass lies within `range` (bounds
/// inclusive on both ends) and `site_filter` accepts its site. Matching
/// records come back in dataset order. An empty result is valid, not an
/// error, and `range` is taken as given: bounds outside the observed payload
/// span just match fewer records.
pub(super) fn payload_outcome_points<'a>(
    records: &'a [LaunchRecord],
    site_filter: &SiteFilter,
    range: PayloadRange,
) -> Vec<CorrelationPoint<'a>> {
    records
        .iter()
        .filter(|record| range.contains(record.payload_mass_kg) && site_filter.matches(record))
        .map(|record| CorrelationPoint {
            payload_mass_kg: record.payload_mass_kg,
            outcome: record.outcome,
            booster_version: &record.booster_version,
        })
        .collect()
}

/// Aggregate figures for the currently filtered launches.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct LaunchSummary {
    /// Total number of launches in the filtered view.
    pub launches: usize,
    /// How many of them succeeded.
    pub successes: usize,
    /// How many of them failed.
    pub failures: usize,
    /// Mean payload mass of the filtered launches, `None` when empty.
    pub mean_payload_kg: Option<f64>,
}

impl LaunchSummary {
    /// The fraction of filtered launches that succeeded, `None` when empty.
    pub fn success_rate(&self) -> Option<f64> {
        if self.launches == 0 {
            None
        } else {
            Some(self.successes as f64 / self.launches as f64)
        }
    }
}

/// Summarize the filtered launches for the dashboard table.
pub(super) fn summarize_launches(points: &[CorrelationPoint]) -> LaunchSummary {
    let launches = points.len();
    let successes = points
        .iter()
        .filter(|point| point.outcome == Outcome::Success)
        .count();

    let mean_payload_kg = if launches == 0 {
        None
    } else {
        let total: f64 = points.iter().map(|point| point.payload_mass_kg).sum();
        Some(total / launches as f64)
    };

    LaunchSummary {
        launches,
        successes,
        failures: launches - successes,
        mean_payload_kg,
    }
}
