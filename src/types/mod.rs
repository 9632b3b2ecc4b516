mod errors;
mod money;

pub use errors::MoneyError;
pub use money::{round_to_cents, Money};
