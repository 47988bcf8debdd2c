//! Defines the expense store trait.

use crate::{
    Error,
    models::{Expense, ExpenseDraft},
};

/// Handles the creation, retrieval, replacement and removal of expenses.
///
/// Every mutating operation rewrites the persisted collection as a whole,
/// so implementations are only suitable for collections of modest size
/// with a single active writer. Mutations take `&mut self`; two calls can
/// never interleave on the same store value, which rules out the
/// lost-update hazard of concurrent read-modify-write cycles.
pub trait ExpenseStore {
    /// Retrieve every expense in the store, in stored order.
    ///
    /// Callers should treat the returned collection as a disposable
    /// snapshot and fetch it again after any mutating call.
    ///
    /// # Errors
    /// This function will return an [Error::Storage] if the underlying
    /// storage cannot be read.
    fn list(&self) -> Result<Vec<Expense>, Error>;

    /// Create a new expense from `draft`, assign it a fresh unique ID and
    /// persist it. Returns the created expense.
    ///
    /// Drafts are persisted as-is; validate them at the input boundary
    /// with [ExpenseDraft::validate] first.
    ///
    /// # Errors
    /// This function will return an [Error::Storage] if the underlying
    /// storage cannot be read or written, or an [Error::Serialization] if
    /// the collection cannot be serialized.
    fn add(&mut self, draft: ExpenseDraft) -> Result<Expense, Error>;

    /// Replace every field except the ID of the expense whose ID is `id`
    /// with the fields of `draft`.
    ///
    /// Updating an ID that is not in the store is a no-op: nothing is
    /// written and no error is raised.
    ///
    /// # Errors
    /// This function will return an [Error::Storage] if the underlying
    /// storage cannot be read or written, or an [Error::Serialization] if
    /// the collection cannot be serialized.
    fn update(&mut self, id: &str, draft: ExpenseDraft) -> Result<(), Error>;

    /// Remove the expense whose ID is `id`, if present.
    ///
    /// Deleting an ID that is not in the store still rewrites the
    /// collection and succeeds, making the operation idempotent.
    ///
    /// # Errors
    /// This function will return an [Error::Storage] if the underlying
    /// storage cannot be read or written, or an [Error::Serialization] if
    /// the collection cannot be serialized.
    fn delete(&mut self, id: &str) -> Result<(), Error>;
}
