//! # Salesboard Sample Generator
//!
//! Synthesizes a realistic retail transaction table for the Australian market.
//! All randomness flows from the seed handed to `SalesGenerator::new`, so the
//! same parameters always produce the same table.

use chrono::{Days, NaiveDate};
use core_types::{Category, City, CustomerSegment, PaymentMethod, RawTransaction, DATE_FORMAT};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

pub mod error;

pub use error::GeneratorError;

// Sampling weights, index-aligned with the `ALL` arrays in core-types.
const CITY_WEIGHTS: [f64; 5] = [0.30, 0.25, 0.20, 0.15, 0.10];
const CATEGORY_WEIGHTS: [f64; 5] = [0.25, 0.30, 0.20, 0.15, 0.10];
const SEGMENT_WEIGHTS: [f64; 4] = [0.20, 0.45, 0.20, 0.15];
const PAYMENT_WEIGHTS: [f64; 4] = [0.40, 0.30, 0.20, 0.10];

/// Customer ids are drawn from `1001..1100`.
const CUSTOMER_IDS: std::ops::Range<u32> = 1001..1100;
const QUANTITY: std::ops::Range<u32> = 1..10;
/// Unit prices between $10.00 and $500.00, in cents.
const UNIT_PRICE_CENTS: std::ops::RangeInclusive<i64> = 1_000..=50_000;

/// Parameters of one generated table.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorParams {
    pub orders: usize,
    pub seed: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Share of rows (0.0 to 1.0) deliberately damaged so that cleaning has work to do.
    pub dirty_fraction: f64,
}

/// Produces synthetic raw transactions.
pub struct SalesGenerator {
    params: GeneratorParams,
    rng: StdRng,
}

impl SalesGenerator {
    pub fn new(params: GeneratorParams) -> Result<Self, GeneratorError> {
        if params.orders == 0 {
            return Err(GeneratorError::InvalidParameter(
                "orders must be greater than 0".to_string(),
            ));
        }
        if params.start_date > params.end_date {
            return Err(GeneratorError::InvalidParameter(format!(
                "start date {} is after end date {}",
                params.start_date, params.end_date
            )));
        }
        if !(0.0..=1.0).contains(&params.dirty_fraction) {
            return Err(GeneratorError::InvalidParameter(format!(
                "dirty fraction {} is outside 0.0..=1.0",
                params.dirty_fraction
            )));
        }

        let rng = StdRng::seed_from_u64(params.seed);
        Ok(Self { params, rng })
    }

    /// Generates the full table.
    pub fn generate(&mut self) -> Result<Vec<RawTransaction>, GeneratorError> {
        let cities = WeightedIndex::new(CITY_WEIGHTS)?;
        let categories = WeightedIndex::new(CATEGORY_WEIGHTS)?;
        let segments = WeightedIndex::new(SEGMENT_WEIGHTS)?;
        let payments = WeightedIndex::new(PAYMENT_WEIGHTS)?;

        let orders = self.params.orders;
        let mut rows = Vec::with_capacity(orders);
        let mut dirty = 0usize;

        for i in 0..orders {
            let category = Category::ALL[categories.sample(&mut self.rng)];
            let product = category
                .products()
                .choose(&mut self.rng)
                .copied()
                .unwrap_or_default();
            let quantity = self.rng.gen_range(QUANTITY);
            let unit_price = Decimal::new(self.rng.gen_range(UNIT_PRICE_CENTS), 2);
            let amount = unit_price * Decimal::from(quantity);

            let mut row = RawTransaction {
                order_id: Some(format!("ORD-{:05}", i + 1)),
                date: Some(self.order_date(i).format(DATE_FORMAT).to_string()),
                city: Some(City::ALL[cities.sample(&mut self.rng)].to_string()),
                category: Some(category.to_string()),
                customer_id: Some(self.rng.gen_range(CUSTOMER_IDS).to_string()),
                amount: Some(amount.to_string()),
                product: Some(product.to_string()),
                quantity: Some(quantity.to_string()),
                unit_price: Some(unit_price.to_string()),
                segment: Some(CustomerSegment::ALL[segments.sample(&mut self.rng)].as_str().to_string()),
                payment_method: Some(PaymentMethod::ALL[payments.sample(&mut self.rng)].as_str().to_string()),
            };

            if self.params.dirty_fraction > 0.0 && self.rng.gen_bool(self.params.dirty_fraction) {
                match rows.last() {
                    // Repeat the previous order verbatim.
                    Some(previous) if self.rng.gen_ratio(1, 4) => row = RawTransaction::clone(previous),
                    _ => self.damage(&mut row),
                }
                dirty += 1;
            }
            rows.push(row);
        }

        tracing::info!(
            orders,
            dirty,
            seed = self.params.seed,
            "Generated sample sales data."
        );
        Ok(rows)
    }

    /// Order dates are spread evenly from the start to the end date.
    fn order_date(&self, index: usize) -> NaiveDate {
        let GeneratorParams { orders, start_date, end_date, .. } = self.params;
        if orders < 2 {
            return start_date;
        }
        let span = (end_date - start_date).num_days() as u64;
        let offset = span * index as u64 / (orders as u64 - 1);
        start_date.checked_add_days(Days::new(offset)).unwrap_or(end_date)
    }

    fn damage(&mut self, row: &mut RawTransaction) {
        match self.rng.gen_range(0..3) {
            0 => row.amount = None,
            1 => row.date = None,
            _ => row.date = Some("not-a-date".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(orders: usize, seed: u64) -> GeneratorParams {
        GeneratorParams {
            orders,
            seed,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            dirty_fraction: 0.0,
        }
    }

    fn generate(params: GeneratorParams) -> Vec<RawTransaction> {
        SalesGenerator::new(params).unwrap().generate().unwrap()
    }

    #[test]
    fn same_seed_same_table() {
        assert_eq!(generate(params(200, 42)), generate(params(200, 42)));
    }

    #[test]
    fn different_seed_different_table() {
        assert_ne!(generate(params(200, 42)), generate(params(200, 43)));
    }

    #[test]
    fn rows_are_complete_and_consistent() {
        let rows = generate(params(300, 7));
        assert_eq!(rows.len(), 300);
        assert_eq!(rows[0].order_id.as_deref(), Some("ORD-00001"));
        assert_eq!(rows[299].order_id.as_deref(), Some("ORD-00300"));

        for row in &rows {
            let quantity: u32 = row.quantity.as_deref().unwrap().parse().unwrap();
            let unit_price: Decimal = row.unit_price.as_deref().unwrap().parse().unwrap();
            let amount: Decimal = row.amount.as_deref().unwrap().parse().unwrap();
            assert!(QUANTITY.contains(&quantity));
            assert!(unit_price >= Decimal::new(1_000, 2) && unit_price <= Decimal::new(50_000, 2));
            assert_eq!(amount, unit_price * Decimal::from(quantity));

            let city = row.city.as_deref().unwrap();
            assert!(City::ALL.iter().any(|c| c.as_str() == city));

            let category = Category::ALL
                .iter()
                .find(|c| Some(c.as_str()) == row.category.as_deref())
                .unwrap();
            assert!(category.products().contains(&row.product.as_deref().unwrap()));

            let customer: u32 = row.customer_id.as_deref().unwrap().parse().unwrap();
            assert!(CUSTOMER_IDS.contains(&customer));
        }
    }

    #[test]
    fn dates_span_the_range() {
        let rows = generate(params(1000, 42));
        assert_eq!(rows.first().unwrap().date.as_deref(), Some("2024-01-01"));
        assert_eq!(rows.last().unwrap().date.as_deref(), Some("2024-12-31"));

        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_deref().unwrap()).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn single_order_lands_on_start_date() {
        let rows = generate(params(1, 1));
        assert_eq!(rows[0].date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn dirty_fraction_damages_rows() {
        let mut p = params(500, 3);
        p.dirty_fraction = 0.2;
        let rows = generate(p);

        let damaged = rows
            .iter()
            .filter(|r| r.amount.is_none() || r.date.as_deref().is_none_or(|d| d == "not-a-date"))
            .count();
        assert!(damaged > 0);
        assert!(damaged < 500);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(SalesGenerator::new(params(0, 1)).is_err());

        let mut inverted = params(10, 1);
        inverted.start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(SalesGenerator::new(inverted).is_err());

        let mut noisy = params(10, 1);
        noisy.dirty_fraction = 1.5;
        assert!(SalesGenerator::new(noisy).is_err());
    }
}
