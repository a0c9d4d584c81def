//! Recording, listing, editing and deleting expenses.
//!
//! Expenses are listed newest first on the home page, optionally narrowed down
//! by category and an inclusive date range, together with the total and a
//! breakdown of spending per category.

mod api;
mod chart;
mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod filter;
mod form;
mod list;
mod summary;
mod validation;
mod view;

pub use api::get_expenses_json;
pub use create::{create_expense_endpoint, get_new_expense_page};
pub use db::{create_expense, create_expense_table};
pub use delete::delete_expense_endpoint;
pub use domain::{Category, Expense, NewExpense};
pub use edit::{get_edit_expense_page, update_expense_endpoint};
pub use list::get_expenses_page;
