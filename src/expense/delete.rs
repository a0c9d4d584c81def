//! Expense deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State, rejection::PathRejection},
    response::{IntoResponse, Redirect, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, database_id::ExpenseId, endpoints, expense::db::delete_expense};

/// The state needed for deleting an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete an expense and redirect to the expense list.
///
/// Deleting an expense that does not exist is not an error, the client is
/// redirected all the same. This includes IDs that are not integers.
pub async fn delete_expense_endpoint(
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    State(state): State<DeleteExpenseState>,
) -> Result<Response, Error> {
    let expense_id = match expense_id {
        Ok(Path(expense_id)) => expense_id,
        Err(rejection) => {
            tracing::debug!("ignoring delete with invalid expense ID: {rejection}");
            return Ok(Redirect::to(endpoints::ROOT).into_response());
        }
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let deleted = delete_expense(expense_id, &connection)
        .inspect_err(|error| tracing::error!("could not delete expense {expense_id}: {error}"))?;

    if deleted {
        tracing::info!("deleted expense {expense_id}");
    } else {
        tracing::debug!("expense {expense_id} was already deleted");
    }

    Ok(Redirect::to(endpoints::ROOT).into_response())
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{Category, NewExpense, create_expense, db::get_expense},
        test_utils::assert_redirect,
    };

    use super::{DeleteExpenseState, delete_expense_endpoint};

    fn get_state() -> DeleteExpenseState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        DeleteExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_expense_and_redirects() {
        let state = get_state();
        let expense = create_expense(
            NewExpense {
                description: "Cinema".to_owned(),
                amount: 18.0,
                category: Category::Entertainment,
                date: date!(2024 - 05 - 04),
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test expense");

        let response = delete_expense_endpoint(Ok(Path(expense.id)), State(state.clone()))
            .await
            .unwrap();

        assert_redirect(&response, "/");
        let got = get_expense(expense.id, &state.db_connection.lock().unwrap())
            .expect("Could not get expense");
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn deleting_missing_expense_still_redirects() {
        let state = get_state();

        let response = delete_expense_endpoint(Ok(Path(42)), State(state))
            .await
            .unwrap();

        assert_redirect(&response, "/");
    }
}
