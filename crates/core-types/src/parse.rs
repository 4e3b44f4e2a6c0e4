use crate::error::CoreError;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a transaction date.
///
/// Accepts ISO dates, ISO timestamps (the time of day is discarded) and the
/// Australian `DD/MM/YYYY` form.
pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = input.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp.date());
        }
    }

    Err(CoreError::InvalidDate(input.to_string()))
}

/// Parses a currency amount such as `"1234.50"`, `"$1,234.50"` or `"-3"`.
///
/// The sign is preserved; rejecting negative amounts is the caller's business.
pub fn parse_amount(input: &str) -> Result<Decimal, CoreError> {
    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits: String = unsigned
        .strip_prefix('$')
        .unwrap_or(unsigned)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let value = Decimal::from_str(&digits)
        .map_err(|e| CoreError::InvalidInput("amount".to_string(), format!("'{input}': {e}")))?;

    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_supported_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(parse_date("2024-01-02").unwrap(), expected);
        assert_eq!(parse_date(" 2024-01-02 ").unwrap(), expected);
        assert_eq!(parse_date("2024-01-02 13:45:00").unwrap(), expected);
        assert_eq!(parse_date("2024-01-02 09:18:34.315315315").unwrap(), expected);
        assert_eq!(parse_date("2024-01-02T00:00:00").unwrap(), expected);
        assert_eq!(parse_date("02/01/2024").unwrap(), expected);
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(matches!(parse_date("invalid"), Err(CoreError::InvalidDate(_))));
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn parses_currency_text() {
        assert_eq!(parse_amount("100.00").unwrap(), dec!(100.00));
        assert_eq!(parse_amount("$1,234.50").unwrap(), dec!(1234.50));
        assert_eq!(parse_amount("-$5").unwrap(), dec!(-5));
        assert_eq!(parse_amount("-7.25").unwrap(), dec!(-7.25));
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("12.3.4").is_err());
    }
}
