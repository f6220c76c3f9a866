// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monetary amounts.
//!
//! All prices and totals are `rust_decimal::Decimal` values with at most two
//! decimal places and at most ten significant digits (the largest amount is
//! `99999999.99`).

use crate::error::DomainError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on every stored amount.
pub const MONEY_SCALE: u32 = 2;

/// Retail markup applied to the purchase price of a book created from a
/// purchase order.
pub const RETAIL_MARKUP: Decimal = Decimal::from_parts(13, 0, 0, false, 1);

/// Largest storable amount, `99999999.99`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Rounds to cents, halves away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

fn check_shape(field: &'static str, amount: Decimal) -> Result<Decimal, DomainError> {
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(DomainError::InvalidAmount {
            field,
            reason: format!("{amount} has more than {MONEY_SCALE} decimal places"),
        });
    }
    if amount > MAX_AMOUNT {
        return Err(DomainError::InvalidAmount {
            field,
            reason: format!("{amount} exceeds the maximum of {MAX_AMOUNT}"),
        });
    }
    Ok(round_money(amount))
}

/// Validates an amount that may be zero (list prices).
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if the amount is negative, exceeds
/// `MAX_AMOUNT`, or carries more than two decimal places.
pub fn validate_non_negative(field: &'static str, amount: Decimal) -> Result<Decimal, DomainError> {
    if amount < Decimal::ZERO {
        return Err(DomainError::InvalidAmount {
            field,
            reason: format!("{amount} must not be negative"),
        });
    }
    check_shape(field, amount)
}

/// Validates an amount that must be strictly positive (unit prices, ledger
/// amounts).
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if the amount is zero or negative,
/// exceeds `MAX_AMOUNT`, or carries more than two decimal places.
pub fn validate_positive(field: &'static str, amount: Decimal) -> Result<Decimal, DomainError> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::InvalidAmount {
            field,
            reason: format!("{amount} must be greater than 0"),
        });
    }
    check_shape(field, amount)
}

/// Computes `quantity × unit_price`, rounded to cents.
///
/// # Errors
///
/// Returns `DomainError::AmountOverflow` if the product does not fit, or
/// `DomainError::InvalidAmount` if it exceeds `MAX_AMOUNT`.
pub fn line_total(quantity: i64, unit_price: Decimal) -> Result<Decimal, DomainError> {
    let total: Decimal = Decimal::from(quantity)
        .checked_mul(unit_price)
        .ok_or(DomainError::AmountOverflow {
            quantity,
            unit_price,
        })?;
    if total > MAX_AMOUNT {
        return Err(DomainError::InvalidAmount {
            field: "total_amount",
            reason: format!("{total} exceeds the maximum of {MAX_AMOUNT}"),
        });
    }
    Ok(round_money(total))
}

/// Retail price for a book first stocked at `purchase_price`.
#[must_use]
pub fn markup_price(purchase_price: Decimal) -> Decimal {
    round_money(purchase_price * RETAIL_MARKUP)
}
