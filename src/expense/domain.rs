//! Core expense domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::Serialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::database_id::ExpenseId;

/// Dates are exchanged with the browser and stored as `YYYY-MM-DD`.
const ISO_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` calendar date, e.g. the value of a date input.
pub fn parse_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text, ISO_DATE_FORMAT)
}

/// The fixed set of categories an expense can belong to.
///
/// This type is shared by validation, storage and rendering, so a category
/// name is only ever spelled out once, in [Category::as_str].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    /// Groceries, eating out and takeaways.
    Food,
    /// Fuel, fares and parking.
    Transport,
    /// Films, games, concerts and the like.
    Entertainment,
    /// Rent, utilities and subscriptions.
    Bills,
    /// Doctor visits, prescriptions and insurance.
    Healthcare,
    /// Clothes, gadgets and household items.
    Shopping,
    /// Anything that does not fit elsewhere.
    Other,
}

impl Category {
    /// Every category, in the order they are displayed.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Bills,
        Category::Healthcare,
        Category::Shopping,
        Category::Other,
    ];

    /// The name used in forms, query strings and the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    /// The hex colour used for the category's badge, bar and pie slice.
    pub fn color(self) -> &'static str {
        match self {
            Category::Food => "#ef4444",
            Category::Transport => "#3b82f6",
            Category::Entertainment => "#8b5cf6",
            Category::Bills => "#f59e0b",
            Category::Healthcare => "#10b981",
            Category::Shopping => "#ec4899",
            Category::Other => "#6b7280",
        }
    }
}

/// A string that does not name any [Category].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid category")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// Assigned by the database on creation, never changed or reused.
    pub id: ExpenseId,
    /// What the money was spent on. Never empty.
    pub description: String,
    /// How much was spent. Always greater than zero.
    pub amount: f64,
    /// The category the expense belongs to.
    pub category: Category,
    /// The day the money was spent.
    pub date: Date,
}

/// The fields of an [Expense] that the user supplies.
///
/// Used both to create an expense and to replace every field of an existing
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// What the money was spent on.
    pub description: String,
    /// How much was spent.
    pub amount: f64,
    /// The category the expense belongs to.
    pub category: Category,
    /// The day the money was spent.
    pub date: Date,
}

impl NewExpense {
    /// Attach a database ID to these fields.
    pub fn with_id(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}
