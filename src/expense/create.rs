//! The page and endpoint for adding an expense.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    expense::{
        db::create_expense,
        form::ExpenseFormPage,
        validation::{ExpenseForm, FieldErrors},
    },
    timezone,
};

const PAGE_TITLE: &str = "Add Expense";

/// The state needed for the new expense page.
#[derive(Debug, Clone)]
pub struct NewExpensePageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The state needed for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the empty expense form with the date set to today.
pub async fn get_new_expense_page(
    State(state): State<NewExpensePageState>,
) -> Result<Response, Error> {
    let values = ExpenseForm {
        date: timezone::today(&state.local_timezone)?.to_string(),
        ..Default::default()
    };

    Ok(new_expense_page(&values, &FieldErrors::default()).into_response())
}

/// A route handler for creating a new expense, redirects to the expense list
/// on success.
///
/// If the form is invalid, the form is rendered again with the submitted
/// values and an error message under each invalid field.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Result<Response, Error> {
    let new_expense = match form.parse() {
        Ok(new_expense) => new_expense,
        Err(errors) => {
            tracing::debug!("rejected new expense {form:?}: {} invalid fields", errors.len());
            return Ok((StatusCode::BAD_REQUEST, new_expense_page(&form, &errors)).into_response());
        }
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = create_expense(new_expense, &connection)
        .inspect_err(|error| tracing::error!("could not create expense from {form:?}: {error}"))?;
    tracing::info!("created expense {}", expense.id);

    Ok(Redirect::to(endpoints::ROOT).into_response())
}

fn new_expense_page(values: &ExpenseForm, errors: &FieldErrors) -> maud::Markup {
    ExpenseFormPage {
        title: PAGE_TITLE,
        nav_endpoint: endpoints::NEW_EXPENSE_VIEW,
        action: endpoints::NEW_EXPENSE_VIEW,
        submit_text: "Add Expense",
        values,
        errors,
    }
    .into_html()
}


#[cfg(test)]
mod create_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{
            Category, Expense,
            db::list_expenses,
            filter::ExpenseFilter,
            validation::ExpenseForm,
        },
        test_utils::{
            assert_field_error, assert_form_input_with_value, assert_form_select_with_value,
            assert_redirect, assert_valid_html, must_get_form, parse_html_document,
        },
    };

    use super::{CreateExpenseState, create_expense_endpoint};

    fn get_state() -> CreateExpenseState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn all_expenses(state: &CreateExpenseState) -> Vec<Expense> {
        list_expenses(&ExpenseFilter::default(), &state.db_connection.lock().unwrap())
            .expect("Could not list expenses")
    }

    fn form(description: &str, amount: &str, category: &str, date: &str) -> ExpenseForm {
        ExpenseForm {
            description: description.to_owned(),
            amount: amount.to_owned(),
            category: category.to_owned(),
            date: date.to_owned(),
        }
    }

    #[tokio::test]
    async fn creates_expense_and_redirects() {
        let state = get_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            Form(form("  Groceries  ", "45.20", "Food", "2024-03-10")),
        )
        .await
        .unwrap();

        assert_redirect(&response, "/");
        let expenses = all_expenses(&state);
        assert_eq!(
            expenses,
            vec![Expense {
                id: 1,
                description: "Groceries".to_owned(),
                amount: 45.2,
                category: Category::Food,
                date: date!(2024 - 03 - 10),
            }]
        );
    }

    #[tokio::test]
    async fn negative_amount_is_rejected() {
        let state = get_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            Form(form("Refund", "-5", "Other", "2024-03-10")),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_field_error(&form, "amount", "Amount must be a positive number");
        assert_form_input_with_value(&form, "description", "text", "Refund");
        assert_form_select_with_value(&form, "category", "Other");
        assert!(all_expenses(&state).is_empty());
    }

    #[tokio::test]
    async fn every_invalid_field_is_reported() {
        let state = get_state();

        let response =
            create_expense_endpoint(State(state.clone()), Form(form("   ", "", "Rent", "")))
                .await
                .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_field_error(&form, "description", "Description is required");
        assert_field_error(&form, "amount", "Amount must be a positive number");
        assert_field_error(&form, "category", "Please select a valid category");
        assert_field_error(&form, "date", "Date is required");
        assert!(all_expenses(&state).is_empty());
    }
}
