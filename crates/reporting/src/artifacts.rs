use crate::error::ReportError;
use crate::summary::month_name;
use analytics::{CleaningReport, HistogramBin, KpiSummary, Partition};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const REGIONAL_PERFORMANCE: &str = "regional_performance.csv";
pub const CATEGORY_PERFORMANCE: &str = "category_performance.csv";
pub const ORDER_VALUE_DISTRIBUTION: &str = "order_value_distribution.csv";
pub const MONTHLY_SALES: &str = "monthly_sales.csv";
pub const KPI_SUMMARY: &str = "kpi_summary.json";

/// What `write_artifacts` managed to produce.
#[derive(Debug, Default)]
pub struct ArtifactSummary {
    pub written: Vec<PathBuf>,
    pub failures: Vec<ReportError>,
}

impl ArtifactSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, result: Result<PathBuf, ReportError>) {
        match result {
            Ok(path) => self.written.push(path),
            Err(err) => {
                tracing::error!(error = %err, "Failed to write artifact.");
                self.failures.push(err);
            }
        }
    }
}

/// One row of a regional or category bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionRow {
    pub name: String,
    pub total_sales: Decimal,
    pub average_order_value: Decimal,
    pub orders: usize,
    /// Share of total sales, in percent, rounded to two places.
    pub share_pct: Decimal,
}

/// One point of the monthly trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRow {
    pub month: u32,
    pub month_name: &'static str,
    pub total_sales: Decimal,
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    kpis: &'a KpiSummary,
    cleaning: &'a CleaningReport,
    order_value_distribution: &'a [HistogramBin],
}

/// Writes the chart data files and the JSON summary into `dir`.
///
/// A failing artifact is logged and recorded; the remaining ones are still
/// attempted. Only a missing output directory stops the whole batch.
pub fn write_artifacts(
    dir: &Path,
    summary: &KpiSummary,
    cleaning: &CleaningReport,
    histogram: &[HistogramBin],
) -> ArtifactSummary {
    let mut outcome = ArtifactSummary::default();

    if let Err(source) = std::fs::create_dir_all(dir) {
        outcome.record(Err(ReportError::OutputDir {
            path: dir.to_path_buf(),
            source,
        }));
        return outcome;
    }

    let regions = partition_rows(&summary.by_region, summary.total_sales);
    outcome.record(write_table(&dir.join(REGIONAL_PERFORMANCE), &regions));

    let categories = partition_rows(&summary.by_category, summary.total_sales);
    outcome.record(write_table(&dir.join(CATEGORY_PERFORMANCE), &categories));

    outcome.record(write_table(&dir.join(ORDER_VALUE_DISTRIBUTION), histogram));

    let months = month_rows(summary);
    outcome.record(write_table(&dir.join(MONTHLY_SALES), &months));

    let document = SummaryDocument {
        kpis: summary,
        cleaning,
        order_value_distribution: histogram,
    };
    outcome.record(write_json(&dir.join(KPI_SUMMARY), &document));

    tracing::info!(
        dir = %dir.display(),
        written = outcome.written.len(),
        failed = outcome.failures.len(),
        "Artifact generation finished."
    );
    outcome
}

/// Chart rows for a partition, largest total first.
pub fn partition_rows(partition: &Partition, grand_total: Decimal) -> Vec<PartitionRow> {
    KpiSummary::ranked(partition)
        .into_iter()
        .map(|(name, stats)| PartitionRow {
            name: name.to_string(),
            total_sales: stats.total,
            average_order_value: stats.average.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            orders: stats.count,
            share_pct: share(stats.total, grand_total),
        })
        .collect()
}

fn month_rows(summary: &KpiSummary) -> Vec<MonthRow> {
    summary
        .sales_by_month
        .iter()
        .map(|(&month, &total_sales)| MonthRow {
            month,
            month_name: month_name(month),
            total_sales,
        })
        .collect()
}

fn share(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part * Decimal::ONE_HUNDRED / whole).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<PathBuf, ReportError> {
    dataset::write_csv(path, rows).map_err(|source| ReportError::Table {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf, ReportError> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), "Wrote JSON summary.");
    Ok(path.to_path_buf())
}
