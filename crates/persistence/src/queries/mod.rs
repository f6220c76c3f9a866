// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Each module owns the Diesel row structs for its tables and converts them
//! into the public `*Data` records. Stored text columns holding enums or
//! decimal amounts are decoded here; a value that fails to decode is
//! reported as `PersistenceError::CorruptRecord`.

pub mod catalog;
pub mod ledger;
pub mod orders;
pub mod users;

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::PersistenceError;

/// Decodes a stored decimal amount.
pub(crate) fn decode_money(column: &str, raw: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(raw).map_err(|e| {
        PersistenceError::CorruptRecord(format!("{column} holds '{raw}', not an amount: {e}"))
    })
}

/// Decodes a stored string-backed enum.
pub(crate) fn decode_enum<T>(column: &str, raw: &str) -> Result<T, PersistenceError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| PersistenceError::CorruptRecord(format!("{column}: {e}")))
}

/// Wraps a free-text search term for a `LIKE` comparison.
pub(crate) fn like_pattern(search: &str) -> String {
    format!("%{}%", search.trim())
}

/// Extracts the id from a display number such as `PO-000042`.
///
/// `prefix` is given in upper case and matched case-insensitively.
pub(crate) fn parse_record_number(prefix: &str, search: &str) -> Option<i64> {
    let upper: String = search.trim().to_ascii_uppercase();
    upper
        .strip_prefix(prefix)?
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
}
