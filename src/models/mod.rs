//! This module defines the domain data types.

pub use expense::{Category, Expense, ExpenseDraft};

mod expense;

/// Alias for the opaque string type used as expense identifiers.
pub type ExpenseId = String;
