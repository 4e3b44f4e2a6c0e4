use crate::format::{format_currency, format_decimal};
use analytics::{CleaningReport, KpiSummary, Partition};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;
const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Renders the human-readable report printed at the end of a run.
pub fn render_summary(summary: &KpiSummary, cleaning: &CleaningReport) -> String {
    let mut out = String::new();

    banner(&mut out, "DATA CLEANING");
    let _ = writeln!(out, "Records loaded:      {}", cleaning.rows_in);
    let _ = writeln!(out, "Records removed:     {}", cleaning.rows_removed());
    for (label, count) in [
        ("missing date", cleaning.missing_date),
        ("malformed date", cleaning.malformed_date),
        ("missing amount", cleaning.missing_amount),
        ("malformed amount", cleaning.malformed_amount),
        ("negative amount", cleaning.negative_amount),
        ("missing city/category/customer", cleaning.missing_key),
        ("duplicate", cleaning.duplicates),
    ] {
        if count > 0 {
            let _ = writeln!(out, "  - {label}: {count}");
        }
    }
    if cleaning.imputed > 0 {
        let _ = writeln!(out, "Amounts imputed:     {}", cleaning.imputed);
    }
    let _ = writeln!(out, "Records analysed:    {}", cleaning.rows_out);

    banner(&mut out, "DESCRIPTIVE STATISTICS");
    let _ = writeln!(out, "{:-^40}", "KEY METRICS");
    let _ = writeln!(out, "Total Sales:         {}", format_currency(summary.total_sales));
    let _ = writeln!(out, "Average Order:       {}", format_currency(summary.average_order_value));
    let _ = writeln!(out, "Median Order:        {}", format_currency(summary.median_order_value));
    let _ = writeln!(out, "Unique Customers:    {}", summary.unique_customers);
    let _ = writeln!(out, "Total Orders:        {}", summary.total_orders);

    let _ = writeln!(out, "\n{:-^40}", "SALES BY CATEGORY");
    let _ = writeln!(out, "{}", partition_table("Category", &summary.by_category));
    let _ = writeln!(out, "\n{:-^40}", "SALES BY REGION");
    let _ = writeln!(out, "{}", partition_table("Region", &summary.by_region));

    banner(&mut out, "KEY INSIGHTS");
    insight(&mut out, "Best Performing Category:", &summary.best_category, &summary.by_category);
    insight(&mut out, "Top Regional Market:     ", &summary.top_region, &summary.by_region);
    if let Some(product) = &summary.top_product {
        insight(&mut out, "Top Product:             ", product, &summary.by_product);
    }
    if let Some(segment) = &summary.leading_segment {
        let _ = writeln!(out, "Leading Segment:          {segment}");
    }

    let _ = writeln!(out, "\n{:-^40}", "QUARTERLY PERFORMANCE");
    for (quarter, sales) in &summary.sales_by_quarter {
        let _ = writeln!(out, "Q{quarter}: {}", format_currency(*sales));
    }

    out
}

/// A table of one partition, largest total first.
pub fn partition_table(label: &str, partition: &Partition) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![label, "Total Sales", "Average", "Orders"]);

    for (key, stats) in KpiSummary::ranked(partition) {
        table.add_row(vec![
            key.to_string(),
            format_decimal(stats.total),
            format_decimal(stats.average),
            stats.count.to_string(),
        ]);
    }
    for index in 1..=3 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

fn insight(out: &mut String, label: &str, key: &str, partition: &Partition) {
    match partition.get(key) {
        Some(stats) => {
            let _ = writeln!(out, "{label} {key} ({})", format_currency(stats.total));
        }
        None => {
            let _ = writeln!(out, "{label} {key}");
        }
    }
}

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = write!(out, "\n{rule}\n{title}\n{rule}\n");
}
