//! # Salesboard Dataset Crate
//!
//! Moves transaction tables between flat CSV files and memory.
//!
//! - Loading produces `RawTransaction` rows: every cell is kept as text so that
//!   blank and malformed values reach the cleaning stage, which decides their fate.
//! - Writing accepts any serializable row type (raw or cleaned transactions).

use core_types::RawTransaction;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;

pub mod error;

pub use error::DatasetError;

/// The columns a row cannot survive cleaning without, with their accepted aliases.
const REQUIRED_COLUMNS: [(&str, &str); 5] = [
    ("date", "Order_Date"),
    ("city", "Region"),
    ("category", "Product_Category"),
    ("customer_id", "Customer_ID"),
    ("amount", "Total_Sales"),
];

/// Loads a raw transaction table from a CSV file with a header row.
pub fn load_csv(path: &Path) -> Result<Vec<RawTransaction>, DatasetError> {
    let reader = reader_builder()
        .from_path(path)
        .map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let rows = read_records(reader)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "Loaded transactions from CSV.");
    Ok(rows)
}

/// Reads a raw transaction table from any CSV source.
pub fn read_csv<R: Read>(source: R) -> Result<Vec<RawTransaction>, DatasetError> {
    read_records(reader_builder().from_reader(source))
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .trim(csv::Trim::All)
        // Short or long rows are kept; missing cells become `None`.
        .flexible(true);
    builder
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawTransaction>, DatasetError> {
    let headers = reader.headers().map_err(|source| DatasetError::Record { line: 1, source })?;
    check_header(headers)?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawTransaction>() {
        let row = result.map_err(|source| DatasetError::Record {
            line: source.position().map(|p| p.line()).unwrap_or_default(),
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn check_header(headers: &csv::StringRecord) -> Result<(), DatasetError> {
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DatasetError::MissingHeader);
    }
    for (column, alias) in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column || h == alias) {
            return Err(DatasetError::MissingColumn(column));
        }
    }
    Ok(())
}

/// Writes rows to a CSV file, creating parent directories as needed.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_to(file, rows)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "Wrote CSV.");
    Ok(())
}

/// Writes rows as CSV, with a header row, to any sink.
pub fn write_to<W: Write, T: Serialize>(sink: W, rows: &[T]) -> Result<(), DatasetError> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(sink);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Transaction;
    use rust_decimal_macros::dec;

    #[test]
    fn reads_canonical_columns() {
        let input = "\
date,city,category,customer_id,amount
2024-01-01,Sydney,Electronics,C1,100.00
2024-01-02,Perth,Clothing,C2,
invalid, Sydney ,Electronics,C3,75.00
";
        let rows = read_csv(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].amount.as_deref(), Some("100.00"));
        assert_eq!(rows[1].amount, None);
        assert_eq!(rows[2].date.as_deref(), Some("invalid"));
        assert_eq!(rows[2].city.as_deref(), Some("Sydney"));
        assert_eq!(rows[0].product, None);
    }

    #[test]
    fn reads_original_export_columns() {
        let input = "\
Order_ID,Order_Date,Customer_ID,Product_Category,Product,Quantity,Unit_Price,Region,Customer_Segment,Payment_Method,Total_Sales
ORD-00001,2024-01-01 00:00:00,1042,Books,Fiction,2,12.50,Perth,VIP,Cash,25.00
";
        let rows = read_csv(input.as_bytes()).unwrap();
        let row = &rows[0];
        assert_eq!(row.order_id.as_deref(), Some("ORD-00001"));
        assert_eq!(row.date.as_deref(), Some("2024-01-01 00:00:00"));
        assert_eq!(row.city.as_deref(), Some("Perth"));
        assert_eq!(row.category.as_deref(), Some("Books"));
        assert_eq!(row.customer_id.as_deref(), Some("1042"));
        assert_eq!(row.amount.as_deref(), Some("25.00"));
        assert_eq!(row.segment.as_deref(), Some("VIP"));
        assert_eq!(row.payment_method.as_deref(), Some("Cash"));
    }

    #[test]
    fn short_rows_are_kept_for_cleaning() {
        let input = "date,city,category,customer_id,amount\n2024-01-01,Sydney\n";
        let rows = read_csv(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].city.as_deref(), Some("Sydney"));
        assert_eq!(rows[0].amount, None);
    }

    #[test]
    fn rejects_header_without_required_column() {
        let input = "date,city,category,amount\n2024-01-01,Sydney,Books,1\n";
        let err = read_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn("customer_id")));
    }

    #[test]
    fn rejects_empty_input() {
        let err = read_csv("".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingHeader));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_csv(Path::new("no/such/sales.csv")).unwrap_err();
        assert!(err.to_string().contains("no/such/sales.csv"));
    }

    #[test]
    fn written_cleaned_rows_load_back() {
        let tx = Transaction {
            order_id: Some("ORD-00009".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            city: "Brisbane".to_string(),
            category: "Home & Garden".to_string(),
            customer_id: "1077".to_string(),
            amount: dec!(1234.56),
            product: Some("Decor".to_string()),
            quantity: Some(3),
            unit_price: Some(dec!(411.52)),
            segment: Some("Regular".to_string()),
            payment_method: None,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("clean.csv");
        write_csv(&path, std::slice::from_ref(&tx)).unwrap();

        let rows = load_csv(&path).unwrap();
        assert_eq!(rows, vec![RawTransaction::from(&tx)]);
    }
}
