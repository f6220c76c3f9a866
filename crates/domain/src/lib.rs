// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod book;
mod error;
mod ledger;
pub mod money;
mod orders;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use book::BookStatus;
pub use error::DomainError;
pub use ledger::{LedgerSummary, TransactionCategory, TransactionType};
pub use orders::{PurchaseOrderStatus, SaleStatus};
pub use types::{Gender, Isbn, Role};
pub use validation::{
    USERNAME_MAX_LEN, USERNAME_MIN_LEN, validate_email, validate_optional_text, validate_quantity,
    validate_required_text, validate_username,
};
