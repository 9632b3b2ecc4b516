use super::errors::ParseError;
use super::Transaction;

use std::str::FromStr;

use anyhow::Result;

use crate::types::Money;

#[test]
fn test_well_formed_line_parses_into_trimmed_transaction() -> Result<()> {
    let transaction = Transaction::from_str(" T001 | 2024-12-01 | P101 | Laptop | 2 | 45,000.00 | C001 | North ")?;

    assert_eq!(transaction.transaction_id, "T001");
    assert_eq!(transaction.date, "2024-12-01");
    assert_eq!(transaction.product_id, "P101");
    assert_eq!(transaction.product_name, "Laptop");
    assert_eq!(transaction.quantity, 2);
    assert_eq!(transaction.unit_price, Money::from(45000));
    assert_eq!(transaction.customer_id, "C001");
    assert_eq!(transaction.region, "North");
    assert_eq!(transaction.amount()?, Money::from(90000));

    Ok(())
}

#[test]
fn test_commas_in_product_name_become_spaces() -> Result<()> {
    let transaction = Transaction::from_str("T002|2024-12-01|P102|Mouse,Wireless|1,000|12.5|C002|South")?;

    assert_eq!(transaction.product_name, "Mouse Wireless");
    assert_eq!(transaction.quantity, 1000);

    Ok(())
}

#[test]
fn test_wrong_field_count_is_rejected() {
    let result = Transaction::from_str("T1|2024-01-01|P1|Widget|10|5.0|C1");

    assert_eq!(result, Err(ParseError::FieldCount { expected: 8, found: 7 }));
    assert!(Transaction::from_str("T1|2024-01-01|P1|Widget|10|5.0|C1|North|Extra").is_err());
    assert!(Transaction::from_str("").is_err());
}

#[test]
fn test_non_numeric_quantity_or_price_is_rejected() {
    let quantity = Transaction::from_str("T1|2024-01-01|P1|Widget|ten|5.0|C1|North");
    let price = Transaction::from_str("T1|2024-01-01|P1|Widget|10|five|C1|North");
    let fractional_quantity = Transaction::from_str("T1|2024-01-01|P1|Widget|1.5|5.0|C1|North");

    assert!(matches!(quantity, Err(ParseError::InvalidQuantity { .. })));
    assert!(matches!(price, Err(ParseError::InvalidUnitPrice { .. })));
    assert!(matches!(fractional_quantity, Err(ParseError::InvalidQuantity { .. })));
}

#[test]
fn test_overflowing_amount_is_rejected() {
    let line = format!("T1|2024-01-01|P1|Widget|{}|{}|C1|North", i64::MAX, rust_decimal::Decimal::MAX);

    assert!(matches!(Transaction::from_str(&line), Err(ParseError::AmountOverflow { .. })));
}

#[test]
fn test_validity_requires_prefixes_and_positive_values() -> Result<()> {
    let valid = Transaction::from_str("T1|2024-01-01|P1|Widget|10|5.0|C1|North")?;

    assert!(valid.is_valid());

    let invalid_lines = [
        "X1|2024-01-01|P1|Widget|10|5.0|C1|North",
        "T1|2024-01-01|Q1|Widget|10|5.0|C1|North",
        "T1|2024-01-01|P1|Widget|10|5.0|X1|North",
        "T1|2024-01-01|P1|Widget|0|5.0|C1|North",
        "T1|2024-01-01|P1|Widget|-3|5.0|C1|North",
        "T1|2024-01-01|P1|Widget|10|0|C1|North",
        "T1|2024-01-01|P1|Widget|10|-5.0|C1|North",
    ];

    for line in invalid_lines {
        assert!(!Transaction::from_str(line)?.is_valid(), "{line} should be invalid");
    }

    Ok(())
}

#[test]
fn test_product_number_extracts_numeric_catalog_key() -> Result<()> {
    let numbered = Transaction::from_str("T1|2024-01-01|P101|Widget|1|5.0|C1|North")?;
    let lettered = Transaction::from_str("T1|2024-01-01|PABC|Widget|1|5.0|C1|North")?;
    let unprefixed = Transaction::from_str("T1|2024-01-01|X101|Widget|1|5.0|C1|North")?;

    assert_eq!(numbered.product_number(), Some(101));
    assert_eq!(lettered.product_number(), None);
    assert_eq!(unprefixed.product_number(), None);

    Ok(())
}
