//! Totals derived from a list of expenses.

use std::collections::BTreeMap;

use crate::expense::{Category, Expense};

/// The total and per-category subtotals of a set of expenses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseSummary {
    /// The sum of every amount.
    pub total: f64,
    /// The sum of the amounts in each category that has at least one
    /// expense, in [Category::ALL] order.
    pub by_category: Vec<(Category, f64)>,
}

impl ExpenseSummary {
    /// Sum the amounts of `expenses`.
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let mut subtotals: BTreeMap<Category, f64> = BTreeMap::new();

        for expense in expenses {
            *subtotals.entry(expense.category).or_insert(0.0) += expense.amount;
        }

        Self {
            total: expenses.iter().map(|expense| expense.amount).sum(),
            by_category: subtotals.into_iter().collect(),
        }
    }

    /// Whether there were no expenses to summarise.
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    /// The share of the total that `subtotal` makes up, as a percentage.
    ///
    /// Returns zero if the total is zero.
    pub fn percentage(&self, subtotal: f64) -> f64 {
        if self.total == 0.0 {
            0.0
        } else {
            subtotal / self.total * 100.0
        }
    }
}
