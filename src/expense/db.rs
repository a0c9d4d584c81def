//! Database operations for expenses.
//!
//! Every function runs a single SQL statement, so each one is atomic on its
//! own and no explicit transactions are needed.

use rusqlite::{Connection, OptionalExtension, Row, ToSql};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{
        Expense, NewExpense,
        filter::{CategoryFilter, ExpenseFilter},
    },
};

/// Insert a new expense and return it with its generated ID.
pub fn create_expense(expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expenses (description, amount, category, date) VALUES (?1, ?2, ?3, ?4);",
        (
            &expense.description,
            expense.amount,
            expense.category,
            expense.date,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(expense.with_id(id))
}

/// Retrieve a single expense by ID.
///
/// Returns `Ok(None)` if there is no expense with the ID `id`.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Option<Expense>, Error> {
    connection
        .prepare("SELECT id, description, amount, category, date FROM expenses WHERE id = :id;")?
        .query_row(&[(":id", &id)], map_row)
        .optional()
        .map_err(Error::from)
}

/// Retrieve the expenses matching `filter`, most recent first.
///
/// Expenses on the same date are ordered by descending ID, i.e. the most
/// recently created first.
pub fn list_expenses(
    filter: &ExpenseFilter,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let mut query = String::from("SELECT id, description, amount, category, date FROM expenses");
    let mut conditions: Vec<&str> = Vec::new();
    let mut params: Vec<(&str, &dyn ToSql)> = Vec::new();

    if let CategoryFilter::Only(category) = &filter.category {
        conditions.push("category = :category");
        params.push((":category", category));
    }

    if let Some(start_date) = &filter.start_date {
        conditions.push("date >= :start_date");
        params.push((":start_date", start_date));
    }

    if let Some(end_date) = &filter.end_date {
        conditions.push("date <= :end_date");
        params.push((":end_date", end_date));
    }

    if !conditions.is_empty() {
        query.push_str(" WHERE ");
        query.push_str(&conditions.join(" AND "));
    }

    query.push_str(" ORDER BY date DESC, id DESC;");

    connection
        .prepare(&query)?
        .query_map(params.as_slice(), map_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}

/// Replace every field of the expense `id` except the ID itself.
///
/// Returns the updated expense, or `Ok(None)` if there is no expense with the
/// ID `id`.
pub fn update_expense(
    id: ExpenseId,
    expense: NewExpense,
    connection: &Connection,
) -> Result<Option<Expense>, Error> {
    connection
        .prepare(
            "UPDATE expenses
            SET description = ?1, amount = ?2, category = ?3, date = ?4
            WHERE id = ?5
            RETURNING id, description, amount, category, date;",
        )?
        .query_row(
            (
                &expense.description,
                expense.amount,
                expense.category,
                expense.date,
                id,
            ),
            map_row,
        )
        .optional()
        .map_err(Error::from)
}

/// Delete an expense by ID.
///
/// Returns `true` if an expense was deleted and `false` if there was no
/// expense with the ID `id`.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<bool, Error> {
    let rows_affected = connection.execute("DELETE FROM expenses WHERE id = ?1", [id])?;

    Ok(rows_affected > 0)
}

/// Create the expense table and its indexes if they do not exist.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    // AUTOINCREMENT stops SQLite from handing out the ID of a deleted row again.
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let date = row.get(4)?;

    Ok(Expense {
        id,
        description,
        amount,
        category,
        date,
    })
}
