//! The expense list page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    expense::{
        db::list_expenses,
        filter::{FilterDecision, FilterQuery, normalize_filter},
        summary::ExpenseSummary,
        view::expenses_view,
    },
};

/// The state needed for the expense list page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the list of expenses matching the filter in the query string.
///
/// Invalid filter parameters are dropped by redirecting to the same page
/// with only the valid parameters.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let filter = match normalize_filter(&query, endpoints::ROOT) {
        FilterDecision::Apply(filter) => filter,
        FilterDecision::Redirect(url) => return Ok(Redirect::to(&url).into_response()),
    };

    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        list_expenses(&filter, &connection)
            .inspect_err(|error| tracing::error!("could not list expenses: {error}"))?
    };

    let summary = ExpenseSummary::from_expenses(&expenses);

    Ok(expenses_view(&expenses, &summary, &filter).into_response())
}
