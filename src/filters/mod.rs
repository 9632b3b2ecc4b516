mod errors;
mod validator;

pub use validator::{filter_choices, validate_and_filter, AmountRange, FilterOptions, FilterOutcome};
