//! Validation of the expense form shared by the create and edit pages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::expense::{Category, Expense, NewExpense, domain::parse_date};

/// The raw form data submitted by the create and edit pages.
///
/// Every field is kept as the string the browser sent so that invalid input
/// can be echoed back to the user. Absent fields are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExpenseForm {
    /// Free text describing the expense.
    pub description: String,
    /// A decimal number, e.g. "12.50".
    pub amount: String,
    /// One of the [Category] names.
    pub category: String,
    /// A `YYYY-MM-DD` date.
    pub date: String,
}

impl From<&Expense> for ExpenseForm {
    fn from(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            amount: expense.amount.to_string(),
            category: expense.category.as_str().to_owned(),
            date: expense.date.to_string(),
        }
    }
}

impl ExpenseForm {
    /// Validate the form and convert it into the fields of an expense.
    ///
    /// The description is trimmed of surrounding whitespace.
    ///
    /// # Errors
    /// Returns every rule the form breaks, keyed by field.
    pub fn parse(&self) -> Result<NewExpense, FieldErrors> {
        let errors = validate(&self.description, &self.amount, &self.category, &self.date);

        if !errors.is_empty() {
            return Err(errors);
        }

        // Validation guarantees the conversions below succeed.
        match (
            parse_amount(&self.amount),
            self.category.parse::<Category>(),
            parse_date(&self.date),
        ) {
            (Some(amount), Ok(category), Ok(date)) => Ok(NewExpense {
                description: self.description.trim().to_owned(),
                amount,
                category,
                date,
            }),
            _ => Err(errors),
        }
    }
}

/// The form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Field {
    Description,
    Amount,
    Category,
    Date,
}

impl Field {
    /// The `name` attribute of the field's form control.
    pub fn name(self) -> &'static str {
        match self {
            Field::Description => "description",
            Field::Amount => "amount",
            Field::Category => "category",
            Field::Date => "date",
        }
    }
}

/// A broken validation rule. The display text is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    #[error("Description is required")]
    MissingDescription,

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Please select a valid category")]
    InvalidCategory,

    #[error("Date is required")]
    MissingDate,

    #[error("Date must be a valid date")]
    InvalidDate,
}

/// The validation errors for a form, at most one per field.
///
/// An empty set means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, ValidationError>);

impl FieldErrors {
    /// Whether no rule was broken.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The error for `field`, if it has one.
    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    /// The number of fields with an error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn insert(&mut self, field: Field, error: ValidationError) {
        self.0.insert(field, error);
    }
}

/// Check every field of an expense form.
///
/// The rules are independent of each other, so all failing fields are
/// reported at once.
pub fn validate(description: &str, amount: &str, category: &str, date: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if description.trim().is_empty() {
        errors.insert(Field::Description, ValidationError::MissingDescription);
    }

    if parse_amount(amount).is_none() {
        errors.insert(Field::Amount, ValidationError::InvalidAmount);
    }

    if category.parse::<Category>().is_err() {
        errors.insert(Field::Category, ValidationError::InvalidCategory);
    }

    // A present date must also be a real `YYYY-MM-DD` calendar date, since
    // stored dates are compared as text when filtering and sorting.
    if date.trim().is_empty() {
        errors.insert(Field::Date, ValidationError::MissingDate);
    } else if parse_date(date).is_err() {
        errors.insert(Field::Date, ValidationError::InvalidDate);
    }

    errors
}

/// Parse a strictly positive, finite amount.
fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}


#[cfg(test)]
mod parse_tests {
    use time::macros::date;

    use crate::expense::{Category, NewExpense};

    use super::{ExpenseForm, Field, ValidationError};

    #[test]
    fn parse_trims_and_converts() {
        let form = ExpenseForm {
            description: "  Weekly shop ".to_owned(),
            amount: "85.20".to_owned(),
            category: "Food".to_owned(),
            date: "2024-06-01".to_owned(),
        };

        assert_eq!(
            form.parse(),
            Ok(NewExpense {
                description: "Weekly shop".to_owned(),
                amount: 85.2,
                category: Category::Food,
                date: date!(2024 - 06 - 01),
            })
        );
    }

    #[test]
    fn parse_returns_errors() {
        let form = ExpenseForm {
            description: "Refund".to_owned(),
            amount: "-5".to_owned(),
            category: "Other".to_owned(),
            date: "2024-06-01".to_owned(),
        };

        let errors = form.parse().expect_err("want negative amount to fail");

        assert_eq!(errors.get(Field::Amount), Some(ValidationError::InvalidAmount));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let form: ExpenseForm =
            serde_urlencoded::from_str("description=Bus").expect("Could not parse form");

        assert_eq!(
            form,
            ExpenseForm {
                description: "Bus".to_owned(),
                ..Default::default()
            }
        );
    }
}
