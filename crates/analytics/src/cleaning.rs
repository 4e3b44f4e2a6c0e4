use crate::error::AnalyticsError;
use core_types::{parse_amount, parse_date, MissingAmountPolicy, RawTransaction, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Knobs for the cleaning stage.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOptions {
    pub missing_amount: MissingAmountPolicy,
    pub drop_duplicates: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            missing_amount: MissingAmountPolicy::Drop,
            drop_duplicates: true,
        }
    }
}

/// Why a row did not make it into the cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MissingDate,
    MalformedDate,
    MissingAmount,
    MalformedAmount,
    NegativeAmount,
    /// City, category or customer id is absent.
    MissingKey,
    Duplicate,
}

/// What the cleaning stage removed or repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub missing_date: usize,
    pub malformed_date: usize,
    pub missing_amount: usize,
    pub malformed_amount: usize,
    pub negative_amount: usize,
    pub missing_key: usize,
    pub duplicates: usize,
    /// Rows kept with an imputed amount. Not counted as removed.
    pub imputed: usize,
}

impl CleaningReport {
    pub fn rows_removed(&self) -> usize {
        self.rows_in - self.rows_out
    }

    fn record(&mut self, reason: DropReason) {
        let counter = match reason {
            DropReason::MissingDate => &mut self.missing_date,
            DropReason::MalformedDate => &mut self.malformed_date,
            DropReason::MissingAmount => &mut self.missing_amount,
            DropReason::MalformedAmount => &mut self.malformed_amount,
            DropReason::NegativeAmount => &mut self.negative_amount,
            DropReason::MissingKey => &mut self.missing_key,
            DropReason::Duplicate => &mut self.duplicates,
        };
        *counter += 1;
    }
}

/// The cleaned table together with the account of what was removed.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    pub transactions: Vec<Transaction>,
    pub report: CleaningReport,
}

/// Turns raw rows into transactions that satisfy the `Transaction` invariants.
#[derive(Debug, Default)]
pub struct DataCleaner {
    options: CleaningOptions,
}

impl DataCleaner {
    pub fn new(options: CleaningOptions) -> Self {
        Self { options }
    }

    /// Cleans a raw table.
    ///
    /// Invalid rows are dropped and counted, never silently discarded. Fails
    /// with `EmptyDataset` when nothing survives, because no KPI is defined on
    /// an empty table.
    pub fn clean(&self, raw: &[RawTransaction]) -> Result<CleanedTable, AnalyticsError> {
        let mut report = CleaningReport {
            rows_in: raw.len(),
            ..CleaningReport::default()
        };
        let mut transactions = Vec::with_capacity(raw.len());
        let mut seen = HashSet::new();

        for (index, row) in raw.iter().enumerate() {
            let (tx, imputed) = match self.clean_row(row) {
                Ok(cleaned) => cleaned,
                Err(reason) => {
                    tracing::debug!(row = index, ?reason, "Dropping row.");
                    report.record(reason);
                    continue;
                }
            };

            if self.options.drop_duplicates && !seen.insert(tx.clone()) {
                tracing::debug!(row = index, "Dropping duplicate row.");
                report.record(DropReason::Duplicate);
                continue;
            }

            if imputed {
                report.imputed += 1;
            }
            transactions.push(tx);
        }

        report.rows_out = transactions.len();

        if report.rows_removed() > 0 {
            tracing::warn!(
                removed = report.rows_removed(),
                missing_date = report.missing_date,
                malformed_date = report.malformed_date,
                missing_amount = report.missing_amount,
                malformed_amount = report.malformed_amount,
                negative_amount = report.negative_amount,
                missing_key = report.missing_key,
                duplicates = report.duplicates,
                "Rows removed during cleaning."
            );
        }
        if report.imputed > 0 {
            tracing::warn!(imputed = report.imputed, "Missing amounts were imputed.");
        }
        tracing::info!(rows_in = report.rows_in, rows_out = report.rows_out, "Cleaning complete.");

        if transactions.is_empty() {
            return Err(AnalyticsError::EmptyDataset { rows_in: report.rows_in });
        }

        Ok(CleanedTable { transactions, report })
    }

    /// Validates a single row. The flag is set when the amount was imputed.
    fn clean_row(&self, row: &RawTransaction) -> Result<(Transaction, bool), DropReason> {
        let date = match present(&row.date) {
            None => return Err(DropReason::MissingDate),
            Some(text) => parse_date(text).map_err(|_| DropReason::MalformedDate)?,
        };

        let (amount, imputed) = match (present(&row.amount), self.options.missing_amount) {
            (Some(text), _) => (parse_amount(text).map_err(|_| DropReason::MalformedAmount)?, false),
            (None, MissingAmountPolicy::Drop) => return Err(DropReason::MissingAmount),
            (None, MissingAmountPolicy::Impute(value)) => (value, true),
        };
        if amount < Decimal::ZERO {
            return Err(DropReason::NegativeAmount);
        }

        let city = present(&row.city).ok_or(DropReason::MissingKey)?;
        let category = present(&row.category).ok_or(DropReason::MissingKey)?;
        let customer_id = present(&row.customer_id).ok_or(DropReason::MissingKey)?;

        // Descriptive fields are best effort: an unreadable value becomes `None`.
        let quantity = present(&row.quantity).and_then(|q| q.parse::<u32>().ok());
        let unit_price = present(&row.unit_price)
            .and_then(|p| parse_amount(p).ok())
            .filter(|p| *p >= Decimal::ZERO);

        let tx = Transaction {
            order_id: present(&row.order_id).map(str::to_string),
            date,
            city: city.to_string(),
            category: category.to_string(),
            customer_id: customer_id.to_string(),
            amount,
            product: present(&row.product).map(str::to_string),
            quantity,
            unit_price,
            segment: present(&row.segment).map(str::to_string),
            payment_method: present(&row.payment_method).map(str::to_string),
        };
        Ok((tx, imputed))
    }
}

/// Trims a field and treats blank text as absent.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
