//! The page and endpoint for editing an expense.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    endpoints::{self, format_endpoint},
    expense::{
        db::{get_expense, update_expense},
        form::ExpenseFormPage,
        validation::{ExpenseForm, FieldErrors},
    },
};

const PAGE_TITLE: &str = "Edit Expense";

/// The state needed for the edit expense page and endpoint.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the expense form filled in with the expense's current values.
///
/// # Errors
/// Returns [Error::NotFound] if there is no expense with the ID `expense_id`,
/// or if the ID is not an integer.
pub async fn get_edit_expense_page(
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    State(state): State<EditExpenseState>,
) -> Result<Response, Error> {
    let expense_id = parse_expense_id(expense_id)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = get_expense(expense_id, &connection)
        .inspect_err(|error| tracing::error!("could not get expense {expense_id}: {error}"))?
        .ok_or(Error::NotFound)?;

    let values = ExpenseForm::from(&expense);

    Ok(edit_expense_page(expense_id, &values, &FieldErrors::default()).into_response())
}

/// A route handler that replaces every field of an expense, redirects to the
/// expense list on success.
///
/// If the form is invalid, the form is rendered again with the submitted
/// values and an error message under each invalid field.
///
/// # Errors
/// Returns [Error::NotFound] if the ID is not an integer and
/// [Error::UpdateMissingExpense] if there is no expense with the ID
/// `expense_id`.
pub async fn update_expense_endpoint(
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    State(state): State<EditExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Result<Response, Error> {
    let expense_id = parse_expense_id(expense_id)?;

    let new_expense = match form.parse() {
        Ok(new_expense) => new_expense,
        Err(errors) => {
            tracing::debug!(
                "rejected update to expense {expense_id} with {form:?}: {} invalid fields",
                errors.len()
            );
            return Ok((
                StatusCode::BAD_REQUEST,
                edit_expense_page(expense_id, &form, &errors),
            )
                .into_response());
        }
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match update_expense(expense_id, new_expense, &connection) {
        Ok(Some(_)) => {
            tracing::info!("updated expense {expense_id}");
            Ok(Redirect::to(endpoints::ROOT).into_response())
        }
        Ok(None) => {
            tracing::warn!("tried to update expense {expense_id} which does not exist");
            Err(Error::UpdateMissingExpense)
        }
        Err(error) => {
            tracing::error!("could not update expense {expense_id}: {error}");
            Err(error)
        }
    }
}

/// An ID that is not an integer cannot refer to an expense.
fn parse_expense_id(
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<ExpenseId, Error> {
    expense_id.map(|Path(expense_id)| expense_id).map_err(|rejection| {
        tracing::debug!("invalid expense ID: {rejection}");
        Error::NotFound
    })
}

fn edit_expense_page(expense_id: ExpenseId, values: &ExpenseForm, errors: &FieldErrors) -> Markup {
    let action = format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense_id);

    ExpenseFormPage {
        title: PAGE_TITLE,
        nav_endpoint: &action,
        action: &action,
        submit_text: "Update Expense",
        values,
        errors,
    }
    .into_html()
}
