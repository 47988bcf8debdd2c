//! This file defines the type `Expense`, the core type of the expense
//! tracking part of the application.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, models::ExpenseId};

/// The closed set of categories an expense can belong to.
///
/// Categories are serialized as their lowercase names, which is also the
/// spelling accepted by [Category::from_str].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Meals, groceries and snacks.
    Food,
    /// Bus fares, fuel, ride-hailing and the like.
    Transport,
    /// Anything that fits neither of the above.
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Food, Category::Transport, Category::Other];

    /// The lowercase name used on the wire and in CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Category::Food),
            "transport" => Ok(Category::Transport),
            "other" => Ok(Category::Other),
            _ => Err(Error::InvalidCategory(s.to_string())),
        }
    }
}

/// An expense record: one user-entered spending entry.
///
/// To create a new expense, fill out an [ExpenseDraft] and pass it to
/// [ExpenseStore::add](crate::stores::ExpenseStore::add), which assigns the
/// ID. [Expense::new] attaches an already generated ID and is meant for
/// store implementations and tests.
///
/// The serialized form uses exactly the field names `id`, `title`,
/// `amount`, `date` (an RFC 3339 timestamp string) and `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,
    title: String,
    amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
    #[serde(rename = "type")]
    category: Category,
}

impl Expense {
    /// Create an expense from a draft and an already generated ID.
    pub fn new(id: ExpenseId, draft: ExpenseDraft) -> Self {
        Self {
            id,
            title: draft.title,
            amount: draft.amount,
            date: draft.date,
            category: draft.category,
        }
    }

    /// The unique ID of the expense. Assigned at creation, never changed.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// A short description of what the money was spent on.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The amount of money spent, in currency units.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// When the money was spent.
    pub fn date(&self) -> OffsetDateTime {
        self.date
    }

    /// The category the expense belongs to.
    pub fn category(&self) -> Category {
        self.category
    }
}

/// The fields of an expense minus the ID.
///
/// Drafts are what callers hand to a store for both creation and full
/// replacement updates. Stores persist drafts as-is; frontends should call
/// [ExpenseDraft::validate] before submitting one.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    /// A short description of what the money was spent on.
    pub title: String,
    /// The amount of money spent. Expected to be positive.
    pub amount: f64,
    /// When the money was spent.
    pub date: OffsetDateTime,
    /// The category the expense belongs to.
    pub category: Category,
}

impl ExpenseDraft {
    /// Check that the draft holds a displayable title and a positive
    /// amount.
    ///
    /// # Errors
    /// This function will return an [Error::EmptyTitle] if the title is
    /// empty or whitespace-only, or an [Error::NonPositiveAmount] if the
    /// amount is zero or negative.
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        if self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount);
        }

        Ok(())
    }
}
