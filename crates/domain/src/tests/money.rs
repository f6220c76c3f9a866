// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::money::{
    MAX_AMOUNT, line_total, markup_price, round_money, validate_non_negative, validate_positive,
};
use crate::{DomainError, LedgerSummary, TransactionType};
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn test_max_amount_value() {
    assert_eq!(MAX_AMOUNT, dec("99999999.99"));
}

#[test]
fn test_round_money_half_away_from_zero() {
    assert_eq!(round_money(dec("1.005")), dec("1.01"));
    assert_eq!(round_money(dec("1.004")), dec("1.00"));
    assert_eq!(round_money(dec("2.5")), dec("2.50"));
}

#[test]
fn test_validate_positive() {
    assert_eq!(validate_positive("unit_price", dec("12.50")).unwrap(), dec("12.5"));
    assert!(matches!(
        validate_positive("unit_price", Decimal::ZERO),
        Err(DomainError::InvalidAmount { field: "unit_price", .. })
    ));
    assert!(validate_positive("unit_price", dec("-1")).is_err());
    assert!(validate_positive("unit_price", dec("1.234")).is_err());
    assert!(validate_positive("unit_price", dec("100000000.00")).is_err());
}

#[test]
fn test_validate_non_negative_accepts_zero() {
    assert_eq!(validate_non_negative("price", Decimal::ZERO).unwrap(), Decimal::ZERO);
    assert!(validate_non_negative("price", dec("-0.01")).is_err());
    // Trailing zeros beyond two places are not extra precision.
    assert!(validate_non_negative("price", dec("3.1000")).is_ok());
}

#[test]
fn test_line_total() {
    assert_eq!(line_total(3, dec("19.99")).unwrap(), dec("59.97"));
    assert!(line_total(2, MAX_AMOUNT).is_err());
}

#[test]
fn test_markup_price_rounds_to_cents() {
    assert_eq!(markup_price(dec("10.00")), dec("13.00"));
    assert_eq!(markup_price(dec("7.77")), dec("10.10"));
    assert_eq!(markup_price(dec("0.05")), dec("0.07"));
}

#[test]
fn test_ledger_summary_from_entries() {
    let summary: LedgerSummary = LedgerSummary::from_entries(vec![
        (TransactionType::Income, dec("100.00")),
        (TransactionType::Expense, dec("30.50")),
        (TransactionType::Income, dec("5.25")),
    ]);
    assert_eq!(summary.total_income, dec("105.25"));
    assert_eq!(summary.total_expense, dec("30.50"));
    assert_eq!(summary.net_balance, dec("74.75"));
    assert_eq!(summary.transaction_count, 3);
}

#[test]
fn test_ledger_summary_empty() {
    let summary: LedgerSummary = LedgerSummary::from_entries(Vec::new());
    assert_eq!(summary.net_balance, Decimal::ZERO);
    assert_eq!(summary.transaction_count, 0);
}
