//! The endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/edit/{expense_id}', use [format_endpoint].

/// The expense list, with the total, filters and category breakdown.
pub const ROOT: &str = "/";
/// The page for creating a new expense.
pub const NEW_EXPENSE_VIEW: &str = "/add";
/// The page for editing an existing expense.
pub const EDIT_EXPENSE_VIEW: &str = "/edit/{expense_id}";
/// The route to delete an expense.
pub const DELETE_EXPENSE: &str = "/delete/{expense_id}";
/// The filtered expense list, total and category totals as JSON.
pub const EXPENSES_API: &str = "/api/expenses";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/edit/{expense_id}', '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path contains at most one parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    #[track_caller]
    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::NEW_EXPENSE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_EXPENSE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::DELETE_EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES_API);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::EDIT_EXPENSE_VIEW, 1);

        assert_eq!(formatted_path, "/edit/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/delete/{id}", 42);

        assert_eq!(formatted_path, "/delete/42");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint(endpoints::NEW_EXPENSE_VIEW, 1);

        assert_eq!(formatted_path, "/add");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/expenses/{expense_id}/edit", 7);

        assert_eq!(formatted_path, "/expenses/7/edit");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
