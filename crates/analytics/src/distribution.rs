use crate::error::AnalyticsError;
use core_types::Transaction;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// One bar of the order-value histogram, covering `[lower, upper)`.
/// The last bin is closed on the right so that the maximum is counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: Decimal,
    pub upper: Decimal,
    pub count: usize,
}

/// Buckets order amounts into `bins` equal-width bins spanning `[min, max]`.
///
/// A table whose amounts are all equal, or differ by less than `bins` units of
/// the smallest representable step, yields a single bin.
pub fn order_value_distribution(
    transactions: &[Transaction],
    bins: usize,
) -> Result<Vec<HistogramBin>, AnalyticsError> {
    if bins == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "histogram needs at least one bin".to_string(),
        ));
    }
    let (Some(min), Some(max)) = (
        transactions.iter().map(|t| t.amount).min(),
        transactions.iter().map(|t| t.amount).max(),
    ) else {
        return Err(AnalyticsError::EmptyDataset { rows_in: 0 });
    };

    let spread = max
        .checked_sub(min)
        .ok_or(AnalyticsError::AmountOverflow { context: "the histogram range" })?;
    let width = spread / Decimal::from(bins);

    // A spread finer than Decimal precision cannot be split further.
    if width.is_zero() {
        return Ok(vec![HistogramBin {
            lower: min,
            upper: max,
            count: transactions.len(),
        }]);
    }

    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: (min + width * Decimal::from(i)).min(max),
            upper: if i + 1 == bins { max } else { (min + width * Decimal::from(i + 1)).min(max) },
            count: 0,
        })
        .collect();

    for tx in transactions {
        let index = (tx.amount - min)
            .checked_div(width)
            .and_then(|offset| offset.floor().to_usize())
            .unwrap_or(bins - 1)
            .min(bins - 1);
        histogram[index].count += 1;
    }

    Ok(histogram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn with_amounts(amounts: &[Decimal]) -> Vec<Transaction> {
        amounts
            .iter()
            .map(|amount| Transaction {
                order_id: None,
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                city: "Perth".to_string(),
                category: "Books".to_string(),
                customer_id: "C1".to_string(),
                amount: *amount,
                product: None,
                quantity: None,
                unit_price: None,
                segment: None,
                payment_method: None,
            })
            .collect()
    }

    #[test]
    fn buckets_amounts_into_equal_bins() {
        let table = with_amounts(&[dec!(0), dec!(10), dec!(24.99), dec!(25), dec!(99), dec!(100)]);
        let histogram = order_value_distribution(&table, 4).unwrap();

        assert_eq!(histogram.len(), 4);
        assert_eq!(histogram[0].lower, dec!(0));
        assert_eq!(histogram[0].upper, dec!(25));
        assert_eq!(histogram[3].upper, dec!(100));
        let counts: Vec<usize> = histogram.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![3, 1, 0, 2]);
    }

    #[test]
    fn single_value_yields_one_bin() {
        let table = with_amounts(&[dec!(5), dec!(5), dec!(5)]);
        let histogram = order_value_distribution(&table, 10).unwrap();
        assert_eq!(histogram.len(), 1);
        assert_eq!(histogram[0].count, 3);
    }

    #[test]
    fn counts_add_up_with_uneven_widths() {
        let table = with_amounts(&[dec!(1), dec!(2), dec!(3), dec!(4), dec!(5), dec!(6), dec!(7)]);
        let histogram = order_value_distribution(&table, 3).unwrap();
        let total: usize = histogram.iter().map(|b| b.count).sum();
        assert_eq!(total, 7);
    }

    #[test]
    fn rejects_zero_bins_and_empty_tables() {
        let table = with_amounts(&[dec!(1)]);
        assert!(matches!(
            order_value_distribution(&table, 0),
            Err(AnalyticsError::InvalidParameter(_))
        ));
        assert_eq!(
            order_value_distribution(&[], 3),
            Err(AnalyticsError::EmptyDataset { rows_in: 0 })
        );
    }

    #[test]
    fn spread_finer_than_bin_precision_yields_one_bin() {
        let table = with_amounts(&[dec!(0), dec!(0.0000000000000000000000000001)]);
        let histogram = order_value_distribution(&table, 10).unwrap();

        assert_eq!(histogram.len(), 1);
        assert_eq!(histogram[0].lower, dec!(0));
        assert_eq!(histogram[0].upper, dec!(0.0000000000000000000000000001));
        assert_eq!(histogram[0].count, 2);
    }

    #[test]
    fn full_decimal_range_is_binned() {
        let table = with_amounts(&[dec!(0), Decimal::MAX]);
        let histogram = order_value_distribution(&table, 4).unwrap();

        assert_eq!(histogram.len(), 4);
        assert_eq!(histogram[0].count, 1);
        assert_eq!(histogram[3].count, 1);
        assert_eq!(histogram[3].upper, Decimal::MAX);
    }
}
