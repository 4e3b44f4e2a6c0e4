//! # Salesboard Reporting Crate
//!
//! Presents a computed `KpiSummary` to people and to other tools.
//!
//! ## Architectural Principles
//!
//! - **Read-Only Consumer:** Nothing here computes a KPI. Every figure comes from
//!   the `analytics` crate; this crate only formats and persists it.
//! - **Partial Failure:** A failing artifact never hides the printed summary or
//!   the artifacts that did succeed. Failures are collected in `ArtifactSummary`
//!   and the caller decides the exit status.
//!
//! ## Public API
//!
//! - `render_summary`: the console report (key metrics, tables, insights).
//! - `write_artifacts`: chart data CSVs and `kpi_summary.json` in an output directory.
//! - `format_currency`: `$1,234.50` style amounts.

pub mod artifacts;
pub mod error;
pub mod format;
pub mod summary;

pub use artifacts::{write_artifacts, ArtifactSummary, MonthRow, PartitionRow};
pub use error::ReportError;
pub use format::{format_currency, format_decimal};
pub use summary::{month_name, partition_table, render_summary};
