use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sum, mean and count of the amounts within one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStats {
    pub total: Decimal,
    pub average: Decimal,
    pub count: usize,
}

/// Aggregates keyed by partition value. `BTreeMap` keeps the keys sorted, which
/// is the iteration order every tie-break relies on.
pub type Partition = BTreeMap<String, GroupStats>;

/// A snapshot of the KPIs of one cleaned transaction table.
///
/// This struct is the final output of the `KpiEngine` and the only thing the
/// reporting side ever sees. It is fully populated on construction and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    // I. Key Metrics
    pub total_sales: Decimal,
    pub average_order_value: Decimal,
    pub median_order_value: Decimal,
    pub total_orders: usize,
    pub unique_customers: usize,

    // II. Partitions
    pub by_category: Partition,
    pub by_region: Partition,
    pub by_product: Partition,   // empty if no row names a product
    pub by_segment: Partition,   // empty if no row names a segment
    pub by_payment_method: Partition,

    // III. Insights (argmax by total, ties to the first sorted key)
    pub best_category: String,
    pub top_region: String,
    pub top_product: Option<String>,
    pub leading_segment: Option<String>,

    // IV. Time-Based Metrics
    /// Sales per calendar quarter (1-4), summed across years.
    pub sales_by_quarter: BTreeMap<u32, Decimal>,
    /// Sales per calendar month (1-12), summed across years.
    pub sales_by_month: BTreeMap<u32, Decimal>,
}

impl KpiSummary {
    /// Partitions sorted by total sales, largest first. Equal totals keep key order.
    pub fn ranked(partition: &Partition) -> Vec<(&str, &GroupStats)> {
        let mut ranked: Vec<_> = partition.iter().map(|(k, v)| (k.as_str(), v)).collect();
        // Stable sort, so ties remain in sorted-key order.
        ranked.sort_by(|a, b| b.1.total.cmp(&a.1.total));
        ranked
    }
}
