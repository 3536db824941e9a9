//! Sales reporting over stored collections.
//!
//! # Responsibility
//! - Filter, sort and aggregate sales for the reports view.
//! - Resolve sale references to display names with fallbacks.
//! - Produce receipt data and dashboard counters.
//!
//! # Invariants
//! - Report building is a pure function of its inputs.
//! - Unresolvable references never fail a report.

pub mod dashboard;
pub mod directory;
pub mod receipt;
pub mod sales_report;
