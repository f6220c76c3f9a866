// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory and ledger transitions.
//!
//! Every change to a book's stock that comes from a purchase or a sale is
//! computed here as a `TransitionResult`, which carries the matching ledger
//! entry. The persistence layer writes a result in one database transaction.

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

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

pub use apply::{apply, apply_sale_batch};
pub use command::{Command, SaleLine};
pub use error::CoreError;
pub use state::{
    BookSnapshot, LedgerDraft, LedgerReference, PurchaseOrderSnapshot, SaleDraft, SaleSnapshot,
    StatusChange, TransitionResult,
};
