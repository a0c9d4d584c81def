//! Query parameters for narrowing down the expense list.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::expense::{Category, domain::parse_date};

/// The query string value of the category select that matches every category.
pub const ALL_CATEGORIES: &str = "all";

/// Which categories to include in the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Do not filter on category.
    #[default]
    All,
    /// Only include expenses in this category.
    Only(Category),
}

/// The validated filter passed to the store.
///
/// Both date bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Exact match on category, or all categories.
    pub category: CategoryFilter,
    /// Earliest date to include.
    pub start_date: Option<Date>,
    /// Latest date to include.
    pub end_date: Option<Date>,
}

impl ExpenseFilter {
    /// Only include expenses in `category`.
    #[cfg(test)]
    pub fn category(mut self, category: Category) -> Self {
        self.category = CategoryFilter::Only(category);
        self
    }

    /// Exclude expenses before `date`.
    #[cfg(test)]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Exclude expenses after `date`.
    #[cfg(test)]
    pub fn end_date(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Encode the filter as a query string, omitting parameters that are not set.
    pub(crate) fn to_query_string(self) -> String {
        let query = FilterQuery {
            category: match self.category {
                CategoryFilter::All => None,
                CategoryFilter::Only(category) => Some(category.as_str().to_owned()),
            },
            start_date: self.start_date.map(|date| date.to_string()),
            end_date: self.end_date.map(|date| date.to_string()),
        };

        serde_urlencoded::to_string(&query).unwrap_or_else(|error| {
            tracing::error!("could not encode filter {self:?} as a query string: {error}");
            String::new()
        })
    }

    /// Append the filter's query string to `route`.
    pub(crate) fn to_url(self, route: &str) -> String {
        let query = self.to_query_string();

        if query.is_empty() {
            route.to_owned()
        } else {
            format!("{route}?{query}")
        }
    }
}

/// The raw filter parameters as submitted by the filter form.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    /// A category name, [ALL_CATEGORIES], or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// An inclusive lower bound as `YYYY-MM-DD`, or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// An inclusive upper bound as `YYYY-MM-DD`, or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// What a handler should do with the filter parameters it received.
#[derive(Debug, PartialEq)]
pub(crate) enum FilterDecision {
    /// Every parameter was understood.
    Apply(ExpenseFilter),
    /// Some parameters were invalid and have been dropped, send the client to
    /// this URL which only has the valid ones.
    Redirect(String),
}

/// Parse `query` into a filter.
///
/// Missing or empty parameters and the [ALL_CATEGORIES] sentinel mean "no
/// restriction". Parameters that cannot be parsed are dropped and the client
/// is redirected to `route` with the remaining parameters.
pub(crate) fn normalize_filter(query: &FilterQuery, route: &str) -> FilterDecision {
    let mut is_canonical = true;

    let category = match query.category.as_deref() {
        None | Some("") | Some(ALL_CATEGORIES) => CategoryFilter::All,
        Some(name) => match name.parse() {
            Ok(category) => CategoryFilter::Only(category),
            Err(error) => {
                tracing::debug!("dropping category filter: {error}");
                is_canonical = false;
                CategoryFilter::All
            }
        },
    };

    let mut parse_bound = |param: Option<&str>| match param {
        None | Some("") => None,
        Some(text) => match parse_date(text) {
            Ok(date) => Some(date),
            Err(error) => {
                tracing::debug!("dropping date filter \"{text}\": {error}");
                is_canonical = false;
                None
            }
        },
    };

    let start_date = parse_bound(query.start_date.as_deref());
    let end_date = parse_bound(query.end_date.as_deref());

    let filter = ExpenseFilter {
        category,
        start_date,
        end_date,
    };

    if is_canonical {
        FilterDecision::Apply(filter)
    } else {
        FilterDecision::Redirect(filter.to_url(route))
    }
}
