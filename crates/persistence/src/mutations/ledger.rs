// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Manual ledger entry mutations.
//!
//! Entries written by inventory transitions carry `is_system = 1`; every
//! statement here is restricted to `is_system = 0`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use super::{money_text, now};
use crate::connection::last_insert_id;
use crate::data_models::{LedgerEntryData, LedgerEntryUpdate, NewLedgerEntry};
use crate::diesel_schema::financial_transactions;
use crate::error::PersistenceError;
use crate::queries::ledger::get_ledger_entry;

/// Records a manual ledger entry.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_ledger_entry(
    conn: &mut SqliteConnection,
    entry: &NewLedgerEntry,
    created_by: i64,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating manual ledger entry: {} / {} for {}",
        entry.transaction_type, entry.category, entry.amount
    );

    diesel::insert_into(financial_transactions::table)
        .values((
            financial_transactions::transaction_type.eq(entry.transaction_type.as_str()),
            financial_transactions::category.eq(entry.category.as_str()),
            financial_transactions::amount.eq(money_text(entry.amount)),
            financial_transactions::description.eq(&entry.description),
            financial_transactions::is_system.eq(false),
            financial_transactions::created_by.eq(created_by),
        ))
        .execute(conn)?;

    let transaction_id: i64 = last_insert_id(conn)?;

    info!(transaction_id, "Ledger entry created");
    Ok(transaction_id)
}

/// Applies a partial update to a manual ledger entry and returns the
/// stored result.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the entry does not exist, or
/// `PersistenceError::ConcurrentModification` if it is a system entry.
pub fn update_ledger_entry(
    conn: &mut SqliteConnection,
    transaction_id: i64,
    update: &LedgerEntryUpdate,
) -> Result<LedgerEntryData, PersistenceError> {
    let current: LedgerEntryData = get_ledger_entry(conn, transaction_id)?.ok_or_else(|| {
        PersistenceError::NotFound(format!("Ledger entry with ID {transaction_id} not found"))
    })?;

    info!(transaction_id, "Updating manual ledger entry");

    let rows_affected: usize = diesel::update(financial_transactions::table)
        .filter(financial_transactions::transaction_id.eq(transaction_id))
        .filter(financial_transactions::is_system.eq(false))
        .set((
            financial_transactions::transaction_type.eq(update
                .transaction_type
                .unwrap_or(current.transaction_type)
                .as_str()),
            financial_transactions::category
                .eq(update.category.unwrap_or(current.category).as_str()),
            financial_transactions::amount
                .eq(money_text(update.amount.unwrap_or(current.amount))),
            financial_transactions::description
                .eq(update.description.clone().unwrap_or(current.description)),
            financial_transactions::updated_at.eq(now()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ConcurrentModification(format!(
            "Ledger entry {transaction_id} was written by an inventory operation"
        )));
    }

    get_ledger_entry(conn, transaction_id)?.ok_or_else(|| {
        PersistenceError::NotFound(format!("Ledger entry with ID {transaction_id} not found"))
    })
}

/// Deletes a manual ledger entry.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if the entry is
/// missing or is a system entry.
pub fn delete_ledger_entry(
    conn: &mut SqliteConnection,
    transaction_id: i64,
) -> Result<(), PersistenceError> {
    info!("Deleting ledger entry ID: {}", transaction_id);

    let rows_affected: usize = diesel::delete(financial_transactions::table)
        .filter(financial_transactions::transaction_id.eq(transaction_id))
        .filter(financial_transactions::is_system.eq(false))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ConcurrentModification(format!(
            "Ledger entry {transaction_id} cannot be deleted"
        )));
    }
    Ok(())
}
