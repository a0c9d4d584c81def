//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of an expense, assigned by the database.
pub type ExpenseId = DatabaseId;
