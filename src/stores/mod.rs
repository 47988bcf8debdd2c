//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).

mod expense;

pub mod kv;

pub use expense::ExpenseStore;
