use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, error};

use crate::filters::errors::FilterError;
use crate::models::Transaction;
use crate::types::Money;

/// Inclusive bounds on a transaction's amount. `None` leaves that side open;
/// a bound of zero is a real bound.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AmountRange {
    pub min: Option<Money>,
    pub max: Option<Money>
}

impl AmountRange {
    pub fn new(min: Option<Money>, max: Option<Money>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, amount: Money) -> bool {
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

/// Optional user filters applied after structural validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Exact, case-sensitive region match. Empty means no filter.
    pub region: Option<String>,
    pub amount: AmountRange
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub total_input: usize,
    pub invalid: usize,
    pub final_count: usize,
    /// Valid records removed by the region and amount filters.
    pub filtered: usize
}

/// The records that survived validation and filtering, the number of
/// invalid records, and the counts summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub transactions: Vec<Transaction>,
    pub invalid: usize,
    pub summary: FilterSummary
}

impl FilterOutcome {
    fn empty(total_input: usize) -> Self {
        Self {
            transactions: Vec::new(),
            invalid: 0,
            summary: FilterSummary { total_input, ..FilterSummary::default() }
        }
    }
}

/// The regions and amount span present in a parsed data set, offered to the
/// user as filter choices.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterChoices {
    pub regions: Vec<String>,
    pub min_amount: Option<Money>,
    pub max_amount: Option<Money>
}

/// Drops invalid records, then applies the region and amount filters.
///
/// Never fails: an internal error is logged and turned into an empty outcome
/// whose summary still reports the input size.
pub fn validate_and_filter(transactions: &[Transaction], options: &FilterOptions) -> FilterOutcome {
    match try_validate_and_filter(transactions, options) {
        Ok(outcome) => outcome,
        Err(error) => {
            error!("Filtering aborted, continuing without transactions: {error}");
            FilterOutcome::empty(transactions.len())
        }
    }
}

fn try_validate_and_filter(transactions: &[Transaction], options: &FilterOptions) -> Result<FilterOutcome, FilterError> {
    let mut invalid = 0;
    let mut retained: Vec<&Transaction> = Vec::with_capacity(transactions.len());

    for transaction in transactions {
        if transaction.is_valid() {
            retained.push(transaction);
        } else {
            debug!("Transaction [{}] failed validation", transaction.transaction_id);
            invalid += 1;
        }
    }

    let valid_count = retained.len();

    if let Some(region) = options.region.as_deref().filter(|region| !region.is_empty()) {
        retained.retain(|transaction| transaction.region == region);
    }

    if !options.amount.is_unbounded() {
        let mut within_range = Vec::with_capacity(retained.len());

        for transaction in retained {
            let amount = transaction.amount()
                .map_err(|_| FilterError::amount_overflow(transaction))?;

            if options.amount.contains(amount) {
                within_range.push(transaction);
            }
        }

        retained = within_range;
    }

    let summary = FilterSummary {
        total_input: transactions.len(),
        invalid,
        final_count: retained.len(),
        filtered: valid_count - retained.len()
    };

    Ok(FilterOutcome {
        transactions: retained.into_iter().cloned().collect(),
        invalid,
        summary
    })
}

pub fn filter_choices(transactions: &[Transaction]) -> FilterChoices {
    let regions: BTreeSet<&str> = transactions.iter().map(|t| t.region.as_str()).collect();
    let amounts: Vec<Money> = transactions.iter().filter_map(|t| t.amount().ok()).collect();

    FilterChoices {
        regions: regions.into_iter().map(str::to_string).collect(),
        min_amount: amounts.iter().min().copied(),
        max_amount: amounts.iter().max().copied()
    }
}
