use thiserror::Error;

use crate::models::Transaction;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Amount of transaction [{transaction_id}] cannot be computed for the amount filter")]
    AmountOverflow {
        transaction_id: String
    }
}

impl FilterError {
    pub fn amount_overflow(transaction: &Transaction) -> Self {
        Self::AmountOverflow { transaction_id: transaction.transaction_id.clone() }
    }
}
