mod errors;
#[cfg(test)]
mod tests;
mod transaction;

pub use transaction::{Transaction, FIELD_SEPARATOR};
