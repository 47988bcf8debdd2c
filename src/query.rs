//! Pure query functions over an in-memory snapshot of the expense
//! collection.
//!
//! Nothing in this module touches storage: callers fetch the collection
//! from a [store](crate::stores) and chain these functions to produce the
//! view they want. Frontends compose them as search → category filter →
//! sort. Monthly totals are computed over the unfiltered collection so the
//! figure reflects every expense in the month regardless of the active
//! view settings.

use std::{fmt::Display, str::FromStr};

use time::Month;

use crate::{
    Error,
    models::{Category, Expense},
};

/// The key to order a collection of expenses by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recent first. The default view order.
    #[default]
    DateDescending,
    /// Oldest first.
    DateAscending,
    /// Largest amount first.
    AmountDescending,
    /// Smallest amount first.
    AmountAscending,
}

impl SortKey {
    /// The spelling used in CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateDescending => "date-desc",
            SortKey::DateAscending => "date-asc",
            SortKey::AmountDescending => "amount-desc",
            SortKey::AmountAscending => "amount-asc",
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date-desc" => Ok(SortKey::DateDescending),
            "date-asc" => Ok(SortKey::DateAscending),
            "amount-desc" => Ok(SortKey::AmountDescending),
            "amount-asc" => Ok(SortKey::AmountAscending),
            _ => Err(Error::InvalidSortKey(s.to_string())),
        }
    }
}

/// A category filter selection: either everything or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Keep every expense.
    #[default]
    All,
    /// Keep only expenses with the given category.
    Only(Category),
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }

        Category::from_str(s).map(CategoryFilter::Only)
    }
}

/// Keep the expenses whose title contains `query`, ignoring case.
///
/// A blank or whitespace-only query returns the input unchanged.
pub fn search(expenses: &[Expense], query: &str) -> Vec<Expense> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return expenses.to_vec();
    }

    expenses
        .iter()
        .filter(|expense| expense.title().to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Keep the expenses that match the category `filter`.
///
/// [CategoryFilter::All] returns the input unchanged.
pub fn filter_by_category(expenses: &[Expense], filter: CategoryFilter) -> Vec<Expense> {
    match filter {
        CategoryFilter::All => expenses.to_vec(),
        CategoryFilter::Only(category) => expenses
            .iter()
            .filter(|expense| expense.category() == category)
            .cloned()
            .collect(),
    }
}

/// Return a copy of `expenses` ordered by `key`.
///
/// The sort is stable, so expenses that compare equal keep their relative
/// order from the input. The input slice is left untouched.
pub fn sort_by(expenses: &[Expense], key: SortKey) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();

    match key {
        SortKey::DateDescending => sorted.sort_by(|a, b| b.date().cmp(&a.date())),
        SortKey::DateAscending => sorted.sort_by(|a, b| a.date().cmp(&b.date())),
        SortKey::AmountDescending => sorted.sort_by(|a, b| b.amount().total_cmp(&a.amount())),
        SortKey::AmountAscending => sorted.sort_by(|a, b| a.amount().total_cmp(&b.amount())),
    }

    sorted
}

/// Sum the amounts of the expenses dated in the given calendar month.
///
/// Bucketing uses the month and year components of each stored timestamp,
/// not elapsed-time windows: a record dated the 1st and one dated the 31st
/// of the month both count, one dated the last day of the previous month
/// does not.
pub fn monthly_total(expenses: &[Expense], month: Month, year: i32) -> f64 {
    expenses
        .iter()
        .filter(|expense| expense.date().month() == month && expense.date().year() == year)
        .map(|expense| expense.amount())
        .sum()
}
