//! The page to display when a route or an expense does not exist.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A 404 page with a message describing what could not be found.
pub struct NotFoundPage<'a> {
    /// What could not be found.
    pub description: &'a str,
    /// What the user can do about it.
    pub fix: &'a str,
}

impl Default for NotFoundPage<'_> {
    fn default() -> Self {
        Self {
            description: "Page not found",
            fix: "Check the address or head back to your expenses.",
        }
    }
}

impl IntoResponse for NotFoundPage<'_> {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Html(error_view("Not Found", "404", self.description, self.fix).into_string()),
        )
            .into_response()
    }
}

/// The fallback handler for routes that do not exist.
pub async fn get_404_not_found() -> Response {
    NotFoundPage::default().into_response()
}
