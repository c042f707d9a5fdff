//! Dashboard module
//!
//! Serves the launch records dashboard: a site selector and a payload range
//! selector drive recomputation of the success-proportion chart, the
//! payload/outcome scatter chart and the summary table.

mod aggregation;
mod charts;
mod handlers;
mod tables;

pub use handlers::{get_dashboard_page, update_dashboard_charts};
