//! Implements a struct that holds the state of the dashboard server.

use std::sync::Arc;

use crate::dataset::LaunchDataset;

/// The state of the dashboard server.
///
/// The dataset is loaded once at startup and never mutated, so handlers share
/// it behind an [Arc] without any locking.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The launch records loaded at startup.
    pub dataset: Arc<LaunchDataset>,
}

impl AppState {
    /// Create a new [AppState] from a loaded launch dataset.
    pub fn new(dataset: LaunchDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}
