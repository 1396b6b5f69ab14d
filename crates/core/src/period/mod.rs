//! Payroll period service facade.
//!
//! The sole entry point for external callers. Composes the entry store,
//! the lifecycle machine, and the aggregator under a per-period exclusive
//! section, against collaborator traits for persistence, identity,
//! authorization, and compensation inputs.
//!
//! # Modules
//!
//! - `types` - Period domain types (PayrollPeriod, PeriodSnapshot, ...)
//! - `error` - The facade error set
//! - `service` - The PayrollService facade and collaborator traits
//! - `memory` - In-memory collaborator implementations

pub mod error;
pub mod memory;
pub mod service;
pub mod types;


pub use error::PeriodError;
pub use memory::{InMemoryPeriodStore, StaticAuthorizer, StaticCompensation, StaticDirectory};
pub use service::{
    Authorizer, CompensationSource, IdentityDirectory, PayrollService, PeriodRepository,
};
pub use types::{AuditEvent, PayrollPeriod, PeriodSnapshot, PeriodSummary};
