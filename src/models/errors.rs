use thiserror::Error;

/// Why a raw line could not be turned into a `Transaction`.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Expected {expected} fields but found {found}")]
    FieldCount {
        expected: usize,
        found: usize
    },
    #[error("Invalid quantity [{value}] for transaction [{transaction_id}]")]
    InvalidQuantity {
        transaction_id: String,
        value: String
    },
    #[error("Invalid unit price [{value}] for transaction [{transaction_id}]")]
    InvalidUnitPrice {
        transaction_id: String,
        value: String
    },
    #[error("Amount of transaction [{transaction_id}] cannot be represented")]
    AmountOverflow {
        transaction_id: String
    }
}

impl ParseError {
    pub fn invalid_quantity(transaction_id: &str, value: &str) -> Self {
        Self::InvalidQuantity {
            transaction_id: transaction_id.to_string(),
            value: value.trim().to_string()
        }
    }

    pub fn invalid_unit_price(transaction_id: &str, value: &str) -> Self {
        Self::InvalidUnitPrice {
            transaction_id: transaction_id.to_string(),
            value: value.trim().to_string()
        }
    }

    pub fn amount_overflow(transaction_id: &str) -> Self {
        Self::AmountOverflow {
            transaction_id: transaction_id.to_string()
        }
    }
}
