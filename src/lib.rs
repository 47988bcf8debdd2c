//! Spendlog keeps a small, local record of day-to-day spending.
//!
//! Expenses are held as a flat collection and persisted in one JSON blob
//! under a fixed key in a key-value store. This library provides the
//! [stores](crate::stores) that own the persisted collection and the pure
//! [query](crate::query) functions (search, category filter, sorting,
//! monthly totals) that derive views from it. Display concerns and input
//! validation belong to the calling frontend.

#![warn(missing_docs)]

pub mod models;
pub mod query;
pub mod stores;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty or whitespace-only string was used as an expense title.
    ///
    /// Frontends should surface this as an inline message and block the
    /// submission; the store itself does not validate drafts.
    #[error("expense title cannot be empty")]
    EmptyTitle,

    /// A zero or negative amount was used for an expense.
    #[error("expense amount must be greater than zero")]
    NonPositiveAmount,

    /// A string did not match any known expense category.
    #[error("\"{0}\" is not a category (expected food, transport or other)")]
    InvalidCategory(String),

    /// A string did not match any known sort key.
    #[error(
        "\"{0}\" is not a sort key (expected date-desc, date-asc, amount-desc or amount-asc)"
    )]
    InvalidSortKey(String),

    /// A date string could not be parsed.
    ///
    /// Callers should pass in the original error as a string and the date
    /// string that caused the error.
    #[error("could not parse date \"{1}\": {0}")]
    InvalidDateFormat(String, String),

    /// The underlying key-value storage rejected a read or write.
    #[error("storage operation failed: {0}")]
    Storage(String),

    /// The expense collection could not be serialized as JSON.
    #[error("could not serialize expenses as JSON: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Storage(value.to_string())
    }
}
