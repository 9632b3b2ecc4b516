mod errors;
mod file_handler;
#[cfg(test)]
mod tests;

pub use file_handler::{ensure_directories, parse_transactions, read_sales_data};
