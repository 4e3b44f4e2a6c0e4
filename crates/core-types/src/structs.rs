use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The date format used when a transaction is written back out.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single row as it arrives from the generator or a CSV file, before cleaning.
///
/// Every field is kept as optional text so that missing or malformed values
/// survive loading and can be judged (and counted) by the cleaning stage.
/// The aliases accept the column names of the original retail export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTransaction {
    #[serde(alias = "Order_ID")]
    pub order_id: Option<String>,
    #[serde(alias = "Order_Date")]
    pub date: Option<String>,
    #[serde(alias = "Region")]
    pub city: Option<String>,
    #[serde(alias = "Product_Category")]
    pub category: Option<String>,
    #[serde(alias = "Customer_ID")]
    pub customer_id: Option<String>,
    #[serde(alias = "Total_Sales")]
    pub amount: Option<String>,
    #[serde(alias = "Product")]
    pub product: Option<String>,
    #[serde(alias = "Quantity")]
    pub quantity: Option<String>,
    #[serde(alias = "Unit_Price")]
    pub unit_price: Option<String>,
    #[serde(alias = "Customer_Segment")]
    pub segment: Option<String>,
    #[serde(alias = "Payment_Method")]
    pub payment_method: Option<String>,
}

/// A cleaned sale.
///
/// Invariants: `amount` is non-negative and `date` is a valid calendar date.
/// The partition keys (`city`, `category`) are free-form so that a changed
/// generator or a foreign file does not break aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub order_id: Option<String>,
    pub date: NaiveDate,
    pub city: String,
    pub category: String,
    pub customer_id: String,
    pub amount: Decimal,

    // Descriptive fields; not every source provides them.
    pub product: Option<String>,
    pub quantity: Option<u32>,
    pub unit_price: Option<Decimal>,
    pub segment: Option<String>,
    pub payment_method: Option<String>,
}

impl From<&Transaction> for RawTransaction {
    fn from(tx: &Transaction) -> Self {
        RawTransaction {
            order_id: tx.order_id.clone(),
            date: Some(tx.date.format(DATE_FORMAT).to_string()),
            city: Some(tx.city.clone()),
            category: Some(tx.category.clone()),
            customer_id: Some(tx.customer_id.clone()),
            amount: Some(tx.amount.to_string()),
            product: tx.product.clone(),
            quantity: tx.quantity.map(|q| q.to_string()),
            unit_price: tx.unit_price.map(|p| p.to_string()),
            segment: tx.segment.clone(),
            payment_method: tx.payment_method.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn raw_view_of_a_transaction_keeps_every_field() {
        let tx = Transaction {
            order_id: Some("ORD-00001".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            city: "Perth".to_string(),
            category: "Books".to_string(),
            customer_id: "1042".to_string(),
            amount: dec!(59.90),
            product: Some("Cookbook".to_string()),
            quantity: Some(2),
            unit_price: Some(dec!(29.95)),
            segment: None,
            payment_method: Some("Cash".to_string()),
        };

        let raw = RawTransaction::from(&tx);
        assert_eq!(raw.date.as_deref(), Some("2024-03-09"));
        assert_eq!(raw.amount.as_deref(), Some("59.90"));
        assert_eq!(raw.quantity.as_deref(), Some("2"));
        assert_eq!(raw.unit_price.as_deref(), Some("29.95"));
        assert_eq!(raw.segment, None);
    }
}
