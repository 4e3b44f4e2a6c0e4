use chrono::NaiveDate;
use core_types::MissingAmountPolicy;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the file; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorSettings,
    pub cleaning: CleaningSettings,
    pub report: ReportSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

/// Parameters for the synthetic sales generator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// How many orders to synthesize.
    pub orders: usize,
    /// Seed for the random number generator. The same seed always yields the same table.
    pub seed: u64,
    /// First order date (inclusive).
    pub start_date: NaiveDate,
    /// Last order date (inclusive).
    pub end_date: NaiveDate,
    /// Share of generated rows that are deliberately damaged (0.0 to 1.0).
    pub dirty_fraction: f64,
}

/// Parameters for the cleaning stage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CleaningSettings {
    pub missing_amount: MissingAmountPolicy,
    /// Remove rows that are exact copies of an earlier row.
    pub drop_duplicates: bool,
}

/// Parameters for the textual report and the chart data it writes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Number of equal-width bins in the order-value distribution.
    pub histogram_bins: usize,
    /// Write chart data files next to the printed summary.
    pub write_artifacts: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory that receives every artifact.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// A `tracing` filter directive, e.g. `"info"` or `"analytics=debug"`.
    /// `RUST_LOG` takes precedence when it is set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also appended to this file.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

// --- Default Implementations ---

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            orders: 1000,
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            dirty_fraction: 0.0,
        }
    }
}

impl Default for CleaningSettings {
    fn default() -> Self {
        Self {
            missing_amount: MissingAmountPolicy::Drop,
            drop_duplicates: true,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            histogram_bins: 10,
            write_artifacts: true,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("charts"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            file: None,
        }
    }
}
