use crate::error::AnalyticsError;
use crate::report::{GroupStats, KpiSummary, Partition};
use chrono::Datelike;
use core_types::Transaction;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

/// A stateless calculator for deriving KPIs from a cleaned transaction table.
#[derive(Debug, Default)]
pub struct KpiEngine {}

impl KpiEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating the KPI summary.
    ///
    /// # Arguments
    ///
    /// * `transactions` - A cleaned table. Row order does not matter.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `KpiSummary`, `EmptyDataset` if the table
    /// has no rows, or `AmountOverflow` if a total exceeds `Decimal::MAX`.
    pub fn calculate(&self, transactions: &[Transaction]) -> Result<KpiSummary, AnalyticsError> {
        if transactions.is_empty() {
            return Err(AnalyticsError::EmptyDataset { rows_in: 0 });
        }

        let total_orders = transactions.len();
        let total_sales = checked_total(transactions.iter().map(|t| t.amount), "total sales")?;
        let average_order_value = total_sales / Decimal::from(total_orders);
        let median_order_value = median(transactions)?;
        let unique_customers = transactions
            .iter()
            .map(|t| t.customer_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let by_category = partition_by(transactions, |t| Some(t.category.as_str()))?;
        let by_region = partition_by(transactions, |t| Some(t.city.as_str()))?;
        let by_product = partition_by(transactions, |t| t.product.as_deref())?;
        let by_segment = partition_by(transactions, |t| t.segment.as_deref())?;
        let by_payment_method = partition_by(transactions, |t| t.payment_method.as_deref())?;

        // Both partitions are non-empty because every row carries a category and a city.
        let best_category = top_key(&by_category).unwrap_or_default();
        let top_region = top_key(&by_region).unwrap_or_default();
        let top_product = top_key(&by_product);
        let leading_segment = top_key(&by_segment);

        let sales_by_quarter = sum_by(transactions, |t| (t.date.month() - 1) / 3 + 1)?;
        let sales_by_month = sum_by(transactions, |t| t.date.month())?;

        tracing::debug!(
            %total_sales,
            total_orders,
            unique_customers,
            %best_category,
            %top_region,
            "KPI summary calculated."
        );

        Ok(KpiSummary {
            total_sales,
            average_order_value,
            median_order_value,
            total_orders,
            unique_customers,
            by_category,
            by_region,
            by_product,
            by_segment,
            by_payment_method,
            best_category,
            top_region,
            top_product,
            leading_segment,
            sales_by_quarter,
            sales_by_month,
        })
    }
}

/// Groups rows by a key and computes sum, mean and count per group.
/// Rows for which `key` returns `None` are left out.
fn partition_by<'a, F>(transactions: &'a [Transaction], key: F) -> Result<Partition, AnalyticsError>
where
    F: Fn(&'a Transaction) -> Option<&'a str>,
{
    let mut sums: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
    for tx in transactions {
        if let Some(k) = key(tx) {
            let entry = sums.entry(k).or_insert((Decimal::ZERO, 0));
            entry.0 = add(entry.0, tx.amount, "a partition")?;
            entry.1 += 1;
        }
    }

    Ok(sums
        .into_iter()
        .map(|(k, (total, count))| {
            let stats = GroupStats {
                total,
                average: total / Decimal::from(count),
                count,
            };
            (k.to_string(), stats)
        })
        .collect())
}

/// The key with the largest total. Iteration runs over sorted keys and only a
/// strictly larger total replaces the leader, so ties go to the first key.
fn top_key(partition: &Partition) -> Option<String> {
    let mut best: Option<(&String, Decimal)> = None;
    for (key, stats) in partition {
        match best {
            Some((_, total)) if stats.total <= total => {}
            _ => best = Some((key, stats.total)),
        }
    }
    best.map(|(key, _)| key.clone())
}

fn sum_by<F>(transactions: &[Transaction], key: F) -> Result<BTreeMap<u32, Decimal>, AnalyticsError>
where
    F: Fn(&Transaction) -> u32,
{
    let mut sums = BTreeMap::new();
    for tx in transactions {
        let sum = sums.entry(key(tx)).or_insert(Decimal::ZERO);
        *sum = add(*sum, tx.amount, "a period")?;
    }
    Ok(sums)
}

fn checked_total<I>(amounts: I, context: &'static str) -> Result<Decimal, AnalyticsError>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| add(acc, amount, context))
}

fn add(a: Decimal, b: Decimal, context: &'static str) -> Result<Decimal, AnalyticsError> {
    a.checked_add(b).ok_or(AnalyticsError::AmountOverflow { context })
}

/// Middle amount of the table; the mean of the two middle amounts for an even count.
fn median(transactions: &[Transaction]) -> Result<Decimal, AnalyticsError> {
    let mut amounts: Vec<Decimal> = transactions.iter().map(|t| t.amount).collect();
    amounts.sort_unstable();

    let mid = amounts.len() / 2;
    if amounts.len() % 2 == 0 {
        Ok(add(amounts[mid - 1], amounts[mid], "the median")? / Decimal::TWO)
    } else {
        Ok(amounts[mid])
    }
}
