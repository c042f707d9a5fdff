//! Launchboard is a web app for exploring a table of rocket launch records.
//!
//! The launch dataset is read from a CSV file once at startup and held
//! immutably for the lifetime of the process. The dashboard page offers a
//! launch-site selector and a payload-mass range selector; changing either
//! control recomputes a success-proportion chart, a payload/outcome scatter
//! chart, and a summary table from the same in-memory records.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod dashboard;
mod dataset;
mod endpoints;
mod html;
mod not_found;
mod routing;

pub use app_state::AppState;
pub use dataset::{LaunchDataset, LaunchRecord, Outcome};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur while loading the launch dataset.
///
/// All of these are startup-fatal: the server must not start without a fully
/// parsed dataset, so there is no partial-data fallback.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The dataset file could not be opened or read.
    #[error("could not read the launch dataset at \"{path}\": {reason}")]
    DatasetRead {
        /// The file path that was given for the dataset.
        path: String,
        /// The underlying I/O error, as a string.
        reason: String,
    },

    /// The dataset file had issues that prevented it from being parsed.
    ///
    /// This covers missing required columns, unparseable numbers and outcome
    /// flags other than 0 or 1.
    #[error("could not parse the launch dataset: {0}")]
    InvalidCsv(String),

    /// The dataset parsed but contained no launch records.
    ///
    /// The payload range control is initialized from the observed payload
    /// bounds, which do not exist for an empty table.
    #[error("the launch dataset contains no records")]
    EmptyDataset,

    /// A launch record had a negative payload mass.
    ///
    /// `row` is the 1-based data row number (excluding the header line).
    #[error("launch record on row {row} has a negative payload mass")]
    NegativePayload {
        /// The 1-based data row number of the offending record.
        row: usize,
    },
}
