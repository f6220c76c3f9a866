// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory transitions.
//!
//! Every operation here runs inside an immediate transaction: the rows are
//! re-read under the write lock, the core transition is computed from them,
//! and the stock change, status moves, new sale and ledger entry are written
//! before the lock is released. Either all of them land or none do.
//!
//! Each write is also conditional on the values the transition was computed
//! from. A write that matches no row fails the whole transaction with
//! `PersistenceError::ConcurrentModification`.

use std::collections::BTreeSet;

use bookstore::{
    BookSnapshot, Command, LedgerDraft, LedgerReference, PurchaseOrderSnapshot, SaleDraft,
    SaleLine, SaleSnapshot, TransitionResult,
};
use bookstore_domain::SaleStatus;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use super::{money_text, now};
use crate::connection::last_insert_id;
use crate::data_models::{InventoryRequest, PersistedTransition};
use crate::diesel_schema::{books, financial_transactions, purchase_orders, sales};
use crate::error::{InventoryError, PersistenceError};
use crate::queries::catalog::get_book;
use crate::queries::orders::{get_purchase_order, get_sale};

/// Loads, applies and writes one inventory transition atomically.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `request` - The operation and the records it names
/// * `actor_id` - The user performing the operation
///
/// # Errors
///
/// Returns `InventoryError::Rejected` if the current state does not permit
/// the transition, or `InventoryError::Persistence` if a record is missing
/// or a write fails. Nothing is written in either case.
pub fn apply_inventory_transition(
    conn: &mut SqliteConnection,
    request: InventoryRequest,
    actor_id: i64,
) -> Result<(TransitionResult, PersistedTransition), InventoryError> {
    conn.immediate_transaction(|conn| {
        let (book, command): (BookSnapshot, Command) = resolve_request(conn, request)?;
        let result: TransitionResult = bookstore::apply(&book, command)?;
        let persisted: PersistedTransition = write_transition(conn, &result, actor_id)?;

        debug!(book_id = result.book_id, new_stock = result.new_stock, "Transition written");
        Ok((result, persisted))
    })
}

/// Records several sales as one unit.
///
/// Every line is validated against the stock left by the lines before it.
/// If any line fails, no sale, stock change or ledger entry is written.
///
/// # Errors
///
/// Returns `InventoryError::Rejected` if the batch is empty or a line is
/// not permitted, or `InventoryError::Persistence` if a book is missing or
/// a write fails.
pub fn create_sale_batch(
    conn: &mut SqliteConnection,
    lines: &[SaleLine],
    customer: Option<&str>,
    notes: Option<&str>,
    actor_id: i64,
) -> Result<Vec<(TransitionResult, PersistedTransition)>, InventoryError> {
    conn.immediate_transaction(|conn| {
        let book_ids: BTreeSet<i64> = lines.iter().map(|line| line.book_id).collect();
        let books: Vec<BookSnapshot> = book_ids
            .into_iter()
            .map(|book_id| load_book(conn, book_id))
            .collect::<Result<Vec<_>, PersistenceError>>()?;

        let results: Vec<TransitionResult> =
            bookstore::apply_sale_batch(&books, lines, customer, notes)?;

        let mut written: Vec<(TransitionResult, PersistedTransition)> =
            Vec::with_capacity(results.len());
        for result in results {
            let persisted: PersistedTransition = write_transition(conn, &result, actor_id)?;
            written.push((result, persisted));
        }

        debug!(lines = written.len(), "Sale batch written");
        Ok(written)
    })
}

fn load_book(conn: &mut SqliteConnection, book_id: i64) -> Result<BookSnapshot, PersistenceError> {
    get_book(conn, book_id)?
        .map(|book| book.snapshot())
        .ok_or_else(|| PersistenceError::NotFound(format!("Book with ID {book_id} not found")))
}

fn load_order(
    conn: &mut SqliteConnection,
    purchase_order_id: i64,
) -> Result<PurchaseOrderSnapshot, PersistenceError> {
    get_purchase_order(conn, purchase_order_id)?
        .map(|order| order.snapshot())
        .ok_or_else(|| {
            PersistenceError::NotFound(format!(
                "Purchase order with ID {purchase_order_id} not found"
            ))
        })
}

fn resolve_request(
    conn: &mut SqliteConnection,
    request: InventoryRequest,
) -> Result<(BookSnapshot, Command), PersistenceError> {
    debug!(?request, "Resolving inventory request");

    match request {
        InventoryRequest::AdjustStock { book_id, delta } => {
            Ok((load_book(conn, book_id)?, Command::AdjustStock { delta }))
        }
        InventoryRequest::ChangeStatus { book_id, status } => {
            Ok((load_book(conn, book_id)?, Command::ChangeStatus { status }))
        }
        InventoryRequest::PayPurchaseOrder { purchase_order_id } => {
            let order: PurchaseOrderSnapshot = load_order(conn, purchase_order_id)?;
            Ok((
                load_book(conn, order.book_id)?,
                Command::PayPurchaseOrder { order },
            ))
        }
        InventoryRequest::ShelvePurchaseOrder { purchase_order_id } => {
            let order: PurchaseOrderSnapshot = load_order(conn, purchase_order_id)?;
            Ok((
                load_book(conn, order.book_id)?,
                Command::ShelvePurchaseOrder { order },
            ))
        }
        InventoryRequest::ReturnPurchaseOrder { purchase_order_id } => {
            let order: PurchaseOrderSnapshot = load_order(conn, purchase_order_id)?;
            Ok((
                load_book(conn, order.book_id)?,
                Command::ReturnPurchaseOrder { order },
            ))
        }
        InventoryRequest::RecordSale {
            book_id,
            quantity,
            unit_price,
            customer,
            notes,
        } => Ok((
            load_book(conn, book_id)?,
            Command::RecordSale {
                quantity,
                unit_price,
                customer,
                notes,
            },
        )),
        InventoryRequest::ReturnSale { sale_id } => {
            let sale: SaleSnapshot = get_sale(conn, sale_id)?
                .ok_or_else(|| {
                    PersistenceError::NotFound(format!("Sale with ID {sale_id} not found"))
                })?
                .snapshot();
            let book: BookSnapshot = load_book(conn, sale.book_id)?;
            Ok((book, Command::ReturnSale { sale }))
        }
    }
}

/// Writes every row change a transition describes.
///
/// Must be called inside a transaction.
fn write_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
    actor_id: i64,
) -> Result<PersistedTransition, PersistenceError> {
    if result.touches_book() {
        let rows_affected: usize = diesel::update(books::table)
            .filter(books::book_id.eq(result.book_id))
            .filter(books::stock.eq(result.previous_stock))
            .filter(books::status.eq(result.previous_status.as_str()))
            .set((
                books::stock.eq(result.new_stock),
                books::status.eq(result.new_status.as_str()),
                books::updated_at.eq(now()),
            ))
            .execute(conn)?;
        ensure_written(rows_affected, || format!("book {}", result.book_id))?;
        debug!(
            book_id = result.book_id,
            stock = result.new_stock,
            status = %result.new_status,
            "Updated book"
        );
    }

    if let Some(change) = result.purchase_order {
        let rows_affected: usize = diesel::update(purchase_orders::table)
            .filter(purchase_orders::purchase_order_id.eq(change.id))
            .filter(purchase_orders::status.eq(change.from.as_str()))
            .set((
                purchase_orders::status.eq(change.to.as_str()),
                purchase_orders::updated_at.eq(now()),
            ))
            .execute(conn)?;
        ensure_written(rows_affected, || format!("purchase order {}", change.id))?;
    }

    if let Some(change) = result.sale {
        let rows_affected: usize = diesel::update(sales::table)
            .filter(sales::sale_id.eq(change.id))
            .filter(sales::status.eq(change.from.as_str()))
            .set((
                sales::status.eq(change.to.as_str()),
                sales::updated_at.eq(now()),
            ))
            .execute(conn)?;
        ensure_written(rows_affected, || format!("sale {}", change.id))?;
    }

    let sale_id: Option<i64> = result
        .new_sale
        .as_ref()
        .map(|draft| insert_sale(conn, draft, actor_id))
        .transpose()?;

    let ledger_entry_id: Option<i64> = result
        .ledger
        .as_ref()
        .map(|draft| insert_system_ledger_entry(conn, draft, sale_id, actor_id))
        .transpose()?;

    Ok(PersistedTransition {
        sale_id,
        ledger_entry_id,
    })
}

fn ensure_written(
    rows_affected: usize,
    describe: impl FnOnce() -> String,
) -> Result<(), PersistenceError> {
    if rows_affected == 0 {
        return Err(PersistenceError::ConcurrentModification(format!(
            "{} changed before the transition was written",
            describe()
        )));
    }
    Ok(())
}

fn insert_sale(
    conn: &mut SqliteConnection,
    draft: &SaleDraft,
    actor_id: i64,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sales::table)
        .values((
            sales::book_id.eq(draft.book_id),
            sales::quantity.eq(draft.quantity),
            sales::unit_price.eq(money_text(draft.unit_price)),
            sales::total_amount.eq(money_text(draft.total_amount)),
            sales::customer.eq(draft.customer.as_deref()),
            sales::notes.eq(draft.notes.as_deref()),
            sales::status.eq(SaleStatus::Completed.as_str()),
            sales::created_by.eq(actor_id),
        ))
        .execute(conn)?;

    let sale_id: i64 = last_insert_id(conn)?;
    debug!(sale_id, book_id = draft.book_id, "Inserted sale");
    Ok(sale_id)
}

fn insert_system_ledger_entry(
    conn: &mut SqliteConnection,
    draft: &LedgerDraft,
    new_sale_id: Option<i64>,
    actor_id: i64,
) -> Result<i64, PersistenceError> {
    let (purchase_order_id, sale_id): (Option<i64>, Option<i64>) = match draft.reference {
        LedgerReference::PurchaseOrder(id) => (Some(id), None),
        LedgerReference::Sale(id) => (None, Some(id)),
        LedgerReference::NewSale => (None, new_sale_id),
    };

    diesel::insert_into(financial_transactions::table)
        .values((
            financial_transactions::transaction_type.eq(draft.transaction_type.as_str()),
            financial_transactions::category.eq(draft.category.as_str()),
            financial_transactions::amount.eq(money_text(draft.amount)),
            financial_transactions::description.eq(&draft.description),
            financial_transactions::purchase_order_id.eq(purchase_order_id),
            financial_transactions::sale_id.eq(sale_id),
            financial_transactions::is_system.eq(true),
            financial_transactions::created_by.eq(actor_id),
        ))
        .execute(conn)?;

    let transaction_id: i64 = last_insert_id(conn)?;
    debug!(
        transaction_id,
        transaction_type = %draft.transaction_type,
        amount = %draft.amount,
        "Inserted ledger entry"
    );
    Ok(transaction_id)
}
