//! Period totals computation.
//!
//! This module implements the aggregator: a pure, deterministic function
//! from a period's entries plus externally supplied per-employee base
//! amounts to the period's monetary totals and per-employee results.

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::PeriodAggregator;
pub use error::AggregationError;
pub use types::{EmployeeBaseAmounts, EmployeeResult, PeriodTotals, RateCard};
