use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What cleaning does with a row whose amount is missing.
///
/// In configuration this reads as `missing_amount = "drop"` or
/// `missing_amount = { impute = "0.00" }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingAmountPolicy {
    /// Remove the row.
    #[default]
    Drop,
    /// Keep the row with this amount in place of the missing one.
    Impute(Decimal),
}

/// The Australian cities the sample generator draws regions from.
///
/// Cleaned transactions carry the city as a plain string, so data loaded from
/// a file may contain regions outside this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Sydney,
    Melbourne,
    Brisbane,
    Perth,
    Adelaide,
}

impl City {
    pub const ALL: [City; 5] = [
        City::Sydney,
        City::Melbourne,
        City::Brisbane,
        City::Perth,
        City::Adelaide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            City::Sydney => "Sydney",
            City::Melbourne => "Melbourne",
            City::Brisbane => "Brisbane",
            City::Perth => "Perth",
            City::Adelaide => "Adelaide",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product categories used by the sample generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    HomeAndGarden,
    Sports,
    Books,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Clothing,
        Category::HomeAndGarden,
        Category::Sports,
        Category::Books,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::HomeAndGarden => "Home & Garden",
            Category::Sports => "Sports",
            Category::Books => "Books",
        }
    }

    /// The products sold within this category.
    pub fn products(&self) -> &'static [&'static str] {
        match self {
            Category::Electronics => &["Laptop", "Smartphone", "Tablet", "Headphones", "Smart Watch"],
            Category::Clothing => &["T-Shirt", "Jeans", "Jacket", "Dress", "Shoes"],
            Category::HomeAndGarden => &["Furniture", "Kitchenware", "Bedding", "Decor", "Tools"],
            Category::Sports => &["Bike", "Yoga Mat", "Dumbbells", "Tennis Racket", "Running Shoes"],
            Category::Books => &["Fiction", "Non-Fiction", "Textbook", "Cookbook", "Biography"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerSegment {
    Premium,
    Regular,
    New,
    Vip,
}

impl CustomerSegment {
    pub const ALL: [CustomerSegment; 4] = [
        CustomerSegment::Premium,
        CustomerSegment::Regular,
        CustomerSegment::New,
        CustomerSegment::Vip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerSegment::Premium => "Premium",
            CustomerSegment::Regular => "Regular",
            CustomerSegment::New => "New",
            CustomerSegment::Vip => "VIP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    CreditCard,
    PayPal,
    BankTransfer,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::PayPal,
        PaymentMethod::BankTransfer,
        PaymentMethod::Cash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Cash => "Cash",
        }
    }
}
