//! The 404 page for unmatched routes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// Render the 404 page.
pub async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Page Not Found",
            "404",
            "There's nothing here.",
            "Check the address, or head back to the dashboard.",
        ),
    )
        .into_response()
}
