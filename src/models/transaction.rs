use std::str::FromStr;

use crate::models::errors::ParseError;
use crate::types::{Money, MoneyError};

pub const FIELD_SEPARATOR: char = '|';
const FIELD_COUNT: usize = 8;

const TRANSACTION_PREFIX: &str = "T";
const PRODUCT_PREFIX: &str = "P";
const CUSTOMER_PREFIX: &str = "C";

/// Represents a single sales record parsed from a pipe-delimited line.
///
/// Field order on the wire is
/// `TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region`.
/// A parsed record is never mutated; validation and filtering only decide
/// whether it is carried forward.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Expected to start with `T`.
    pub transaction_id: String,
    /// Opaque, lexicographically sortable date key.
    pub date: String,
    /// Expected to start with `P`; the numeric tail keys the product catalog.
    pub product_id: String,
    /// Display name with any commas replaced by spaces.
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// Expected to start with `C`.
    pub customer_id: String,
    pub region: String
}

impl Transaction {
    /// The sale amount, `quantity * unit_price`.
    pub fn amount(&self) -> Result<Money, MoneyError> {
        self.unit_price.times(self.quantity)
    }

    /// Whether the record satisfies the business rules required before aggregation.
    pub fn is_valid(&self) -> bool {
        self.quantity > 0
            && self.unit_price.is_positive()
            && self.transaction_id.starts_with(TRANSACTION_PREFIX)
            && self.product_id.starts_with(PRODUCT_PREFIX)
            && self.customer_id.starts_with(CUSTOMER_PREFIX)
    }

    /// The numeric part of a `P<number>` product id.
    pub fn product_number(&self) -> Option<u32> {
        self.product_id
            .strip_prefix(PRODUCT_PREFIX)
            .and_then(|digits| digits.trim().parse().ok())
    }
}

impl FromStr for Transaction {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

        let [transaction_id, date, product_id, product_name, quantity, unit_price, customer_id, region] = fields.as_slice() else {
            return Err(ParseError::FieldCount { expected: FIELD_COUNT, found: fields.len() });
        };

        let transaction_id = transaction_id.trim().to_string();

        let quantity: i64 = quantity.replace(',', "").trim().parse()
            .map_err(|_| ParseError::invalid_quantity(&transaction_id, quantity))?;

        let unit_price = Money::from_str(unit_price)
            .map_err(|_| ParseError::invalid_unit_price(&transaction_id, unit_price))?;

        if unit_price.times(quantity).is_err() {
            return Err(ParseError::amount_overflow(&transaction_id));
        }

        Ok(Transaction {
            transaction_id,
            date: date.trim().to_string(),
            product_id: product_id.trim().to_string(),
            product_name: product_name.replace(',', " ").trim().to_string(),
            quantity,
            unit_price,
            customer_id: customer_id.trim().to_string(),
            region: region.trim().to_string()
        })
    }
}
