//! Per-employee adjustment entries.
//!
//! This module implements the entry store: CRUD logic for adjustment rows
//! scoped to one period, enforcing the one-row-per-employee invariant and
//! the Draft-only editability gate.

pub mod error;
pub mod store;
pub mod types;

pub use error::EntryError;
pub use store::{EntryStore, UpsertOutcome};
pub use types::{EmployeeProfile, EntryFields, PayrollEntry};
