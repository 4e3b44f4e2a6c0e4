pub mod enums;
pub mod error;
pub mod parse;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Category, City, CustomerSegment, MissingAmountPolicy, PaymentMethod};
pub use error::CoreError;
pub use parse::{parse_amount, parse_date};
pub use structs::{RawTransaction, Transaction, DATE_FORMAT};
