//! A JSON view of the expense list for scripts and other clients.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    endpoints,
    expense::{
        Expense,
        db::list_expenses,
        filter::{FilterDecision, FilterQuery, normalize_filter},
        summary::ExpenseSummary,
    },
};

/// The state needed for the expenses API.
#[derive(Debug, Clone)]
pub struct ExpensesApiState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// An expense as it appears in the JSON response.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseJson {
    id: ExpenseId,
    description: String,
    amount: f64,
    category: String,
    /// A `YYYY-MM-DD` date.
    date: String,
}

impl From<Expense> for ExpenseJson {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            description: expense.description,
            amount: expense.amount,
            category: expense.category.as_str().to_owned(),
            date: expense.date.to_string(),
        }
    }
}

/// The filtered expenses with their totals.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesResponse {
    expenses: Vec<ExpenseJson>,
    total: f64,
    /// Only categories with at least one expense are included.
    category_totals: BTreeMap<String, f64>,
}

/// Return the expenses matching the filter in the query string as JSON.
///
/// Invalid filter parameters are handled the same way as the list page.
pub async fn get_expenses_json(
    State(state): State<ExpensesApiState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let filter = match normalize_filter(&query, endpoints::EXPENSES_API) {
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
    let category_totals = summary
        .by_category
        .iter()
        .map(|(category, subtotal)| (category.as_str().to_owned(), *subtotal))
        .collect();

    Ok(Json(ExpensesResponse {
        expenses: expenses.into_iter().map(ExpenseJson::from).collect(),
        total: summary.total,
        category_totals,
    })
    .into_response())
}
