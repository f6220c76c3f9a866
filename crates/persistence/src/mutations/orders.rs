// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Purchase order and sale mutations outside inventory transitions.
//!
//! Edits and deletes are conditional on the record's status in the same
//! statement, so a record that moved on since it was read is left alone
//! and reported as a concurrent modification.

use bookstore_domain::{PurchaseOrderStatus, SaleStatus};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use super::{money_text, now};
use crate::connection::last_insert_id;
use crate::data_models::{NewPurchaseOrder, PurchaseOrderUpdate};
use crate::diesel_schema::{purchase_orders, sales};
use crate::error::PersistenceError;

/// Creates a pending purchase order.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyViolation` if the book or creator
/// does not exist.
pub fn create_purchase_order(
    conn: &mut SqliteConnection,
    order: &NewPurchaseOrder,
    created_by: i64,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating purchase order for book ID: {}, quantity: {}, supplier: {}",
        order.book_id, order.quantity, order.supplier
    );

    diesel::insert_into(purchase_orders::table)
        .values((
            purchase_orders::book_id.eq(order.book_id),
            purchase_orders::quantity.eq(order.quantity),
            purchase_orders::unit_price.eq(money_text(order.unit_price)),
            purchase_orders::total_amount.eq(money_text(order.total_amount)),
            purchase_orders::supplier.eq(&order.supplier),
            purchase_orders::notes.eq(order.notes.as_deref()),
            purchase_orders::status.eq(PurchaseOrderStatus::Pending.as_str()),
            purchase_orders::created_by.eq(created_by),
        ))
        .execute(conn)?;

    let purchase_order_id: i64 = last_insert_id(conn)?;

    info!(purchase_order_id, "Purchase order created");
    Ok(purchase_order_id)
}

/// Replaces the editable fields of a pending purchase order.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if the order is
/// missing or no longer pending.
pub fn update_purchase_order(
    conn: &mut SqliteConnection,
    purchase_order_id: i64,
    update: &PurchaseOrderUpdate,
) -> Result<(), PersistenceError> {
    info!(purchase_order_id, "Updating pending purchase order");

    let rows_affected: usize = diesel::update(purchase_orders::table)
        .filter(purchase_orders::purchase_order_id.eq(purchase_order_id))
        .filter(purchase_orders::status.eq(PurchaseOrderStatus::Pending.as_str()))
        .set((
            purchase_orders::quantity.eq(update.quantity),
            purchase_orders::unit_price.eq(money_text(update.unit_price)),
            purchase_orders::total_amount.eq(money_text(update.total_amount)),
            purchase_orders::supplier.eq(&update.supplier),
            purchase_orders::notes.eq(update.notes.as_deref()),
            purchase_orders::updated_at.eq(now()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ConcurrentModification(format!(
            "Purchase order {purchase_order_id} is no longer pending"
        )));
    }
    Ok(())
}

/// Deletes a purchase order that is pending or returned.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if the order is
/// missing or has been paid since it was read.
pub fn delete_purchase_order(
    conn: &mut SqliteConnection,
    purchase_order_id: i64,
) -> Result<(), PersistenceError> {
    info!("Deleting purchase order ID: {}", purchase_order_id);

    let rows_affected: usize = diesel::delete(purchase_orders::table)
        .filter(purchase_orders::purchase_order_id.eq(purchase_order_id))
        .filter(purchase_orders::status.eq_any([
            PurchaseOrderStatus::Pending.as_str(),
            PurchaseOrderStatus::Returned.as_str(),
        ]))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ConcurrentModification(format!(
            "Purchase order {purchase_order_id} can no longer be deleted"
        )));
    }
    Ok(())
}

/// Updates the customer and notes of a sale.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the sale does not exist.
pub fn update_sale_details(
    conn: &mut SqliteConnection,
    sale_id: i64,
    customer: Option<&str>,
    notes: Option<&str>,
) -> Result<(), PersistenceError> {
    info!(sale_id, "Updating sale details");

    let rows_affected: usize = diesel::update(sales::table)
        .filter(sales::sale_id.eq(sale_id))
        .set((
            sales::customer.eq(customer),
            sales::notes.eq(notes),
            sales::updated_at.eq(now()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Sale with ID {sale_id} not found"
        )));
    }
    Ok(())
}

/// Deletes a returned sale.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if the sale is
/// missing or not returned.
pub fn delete_sale(conn: &mut SqliteConnection, sale_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting sale ID: {}", sale_id);

    let rows_affected: usize = diesel::delete(sales::table)
        .filter(sales::sale_id.eq(sale_id))
        .filter(sales::status.eq(SaleStatus::Returned.as_str()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ConcurrentModification(format!(
            "Sale {sale_id} is not returned and cannot be deleted"
        )));
    }
    Ok(())
}
