use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Raised when cleaning leaves no rows, or when aggregation is handed an
    /// empty table. KPIs are undefined in both cases.
    #[error("The dataset is empty after cleaning ({rows_in} input rows); KPIs are undefined")]
    EmptyDataset { rows_in: usize },

    /// A running total left the range `Decimal` can represent.
    #[error("Sales total overflowed while summing {context}")]
    AmountOverflow { context: &'static str },

    #[error("Invalid analytics parameter: {0}")]
    InvalidParameter(String),
}
