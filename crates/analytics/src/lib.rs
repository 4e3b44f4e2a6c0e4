//! # Salesboard Analytics Engine
//!
//! This crate is the KPI engine: it cleans a raw retail transaction table and
//! derives the descriptive metrics the rest of the system reports on.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   the CLI or the generator. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** `DataCleaner` and `KpiEngine` take a table as input
//!   and return a value. The same table always yields the same `KpiSummary`.
//! - **Exact Currency:** Every sum is a `rust_decimal::Decimal`, so partition
//!   totals reconcile to the grand total without floating-point drift.
//!
//! ## Public API
//!
//! - `DataCleaner`: drops or repairs invalid rows and reports what it removed.
//! - `KpiEngine`: computes the `KpiSummary` from a cleaned table.
//! - `order_value_distribution`: equal-width histogram of order amounts.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod cleaning;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use cleaning::{CleanedTable, CleaningOptions, CleaningReport, DataCleaner, DropReason};
pub use distribution::{order_value_distribution, HistogramBin};
pub use engine::KpiEngine;
pub use error::AnalyticsError;
pub use report::{GroupStats, KpiSummary, Partition};
