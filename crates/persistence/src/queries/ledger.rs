// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Financial ledger queries.

use bookstore_domain::{LedgerSummary, TransactionCategory, TransactionType};
use diesel::SqliteConnection;
use diesel::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use super::{decode_enum, decode_money};
use crate::data_models::{LedgerEntryData, LedgerFilter};
use crate::diesel_schema::{financial_transactions, users};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = financial_transactions)]
struct LedgerRow {
    transaction_id: i64,
    transaction_type: String,
    category: String,
    amount: String,
    description: String,
    purchase_order_id: Option<i64>,
    sale_id: Option<i64>,
    is_system: bool,
    created_by: i64,
    created_at: String,
    updated_at: String,
}

impl LedgerRow {
    fn into_data(self, created_by_username: String) -> Result<LedgerEntryData, PersistenceError> {
        Ok(LedgerEntryData {
            transaction_id: self.transaction_id,
            transaction_type: decode_enum::<TransactionType>(
                "financial_transactions.transaction_type",
                &self.transaction_type,
            )?,
            category: decode_enum::<TransactionCategory>(
                "financial_transactions.category",
                &self.category,
            )?,
            amount: decode_money("financial_transactions.amount", &self.amount)?,
            description: self.description,
            purchase_order_id: self.purchase_order_id,
            sale_id: self.sale_id,
            is_system: self.is_system,
            created_by: self.created_by,
            created_by_username,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Retrieves a ledger entry.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the entry is not found.
pub fn get_ledger_entry(
    conn: &mut SqliteConnection,
    transaction_id: i64,
) -> Result<Option<LedgerEntryData>, PersistenceError> {
    debug!("Looking up ledger entry ID: {}", transaction_id);

    let result: Result<(LedgerRow, String), diesel::result::Error> =
        financial_transactions::table
            .inner_join(users::table)
            .filter(financial_transactions::transaction_id.eq(transaction_id))
            .select((LedgerRow::as_select(), users::username))
            .first(conn);

    match result {
        Ok((row, username)) => Ok(Some(row.into_data(username)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists ledger entries matching a filter, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn list_ledger_entries(
    conn: &mut SqliteConnection,
    filter: &LedgerFilter,
) -> Result<Vec<LedgerEntryData>, PersistenceError> {
    debug!(?filter, "Listing ledger entries");

    let mut query = financial_transactions::table
        .inner_join(users::table)
        .select((LedgerRow::as_select(), users::username))
        .into_boxed();

    if let Some(transaction_type) = filter.transaction_type {
        query = query.filter(financial_transactions::transaction_type.eq(transaction_type.as_str()));
    }
    if let Some(category) = filter.category {
        query = query.filter(financial_transactions::category.eq(category.as_str()));
    }

    let rows: Vec<(LedgerRow, String)> = query
        .order(financial_transactions::transaction_id.desc())
        .load(conn)?;

    rows.into_iter()
        .map(|(row, username)| row.into_data(username))
        .collect()
}

/// Totals the whole ledger.
///
/// Amounts are summed as decimals in Rust rather than in SQL, since they
/// are stored as text.
///
/// # Errors
///
/// Returns an error if the database query fails or an amount cannot be
/// decoded.
pub fn ledger_summary(conn: &mut SqliteConnection) -> Result<LedgerSummary, PersistenceError> {
    debug!("Summarizing ledger");

    let rows: Vec<(String, String)> = financial_transactions::table
        .select((
            financial_transactions::transaction_type,
            financial_transactions::amount,
        ))
        .load(conn)?;

    let entries: Vec<(TransactionType, Decimal)> = rows
        .iter()
        .map(|(transaction_type, amount)| {
            Ok((
                decode_enum::<TransactionType>(
                    "financial_transactions.transaction_type",
                    transaction_type,
                )?,
                decode_money("financial_transactions.amount", amount)?,
            ))
        })
        .collect::<Result<Vec<_>, PersistenceError>>()?;

    Ok(LedgerSummary::from_entries(entries))
}
