// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Mutations write through Diesel DSL and read generated IDs with
//! `connection::last_insert_id`. Inventory transitions live
//! in `inventory` and are the only writers of book stock and status.

pub mod catalog;
pub mod inventory;
pub mod ledger;
pub mod orders;
pub mod users;

use rust_decimal::Decimal;

/// Canonical two-place text form of an amount for storage.
pub(crate) fn money_text(amount: Decimal) -> String {
    let mut amount: Decimal = amount;
    amount.rescale(2);
    amount.to_string()
}

/// SQL expression for the current UTC timestamp.
pub(crate) fn now() -> diesel::expression::SqlLiteral<diesel::sql_types::Text> {
    diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")
}
