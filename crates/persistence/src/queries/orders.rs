// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Purchase order and sale queries.
//!
//! Both record types are returned joined with the title of their book and
//! the username of the user who created them.

use bookstore_domain::{PurchaseOrderStatus, SaleStatus};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use super::{decode_enum, decode_money, like_pattern, parse_record_number};
use crate::data_models::{PurchaseOrderData, PurchaseOrderFilter, SaleData, SaleFilter};
use crate::diesel_schema::{books, purchase_orders, sales, users};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = purchase_orders)]
struct PurchaseOrderRow {
    purchase_order_id: i64,
    book_id: i64,
    quantity: i64,
    unit_price: String,
    total_amount: String,
    supplier: String,
    notes: Option<String>,
    status: String,
    created_by: i64,
    created_at: String,
    updated_at: String,
}

impl PurchaseOrderRow {
    fn into_data(
        self,
        book_title: String,
        created_by_username: String,
    ) -> Result<PurchaseOrderData, PersistenceError> {
        Ok(PurchaseOrderData {
            purchase_order_id: self.purchase_order_id,
            book_id: self.book_id,
            book_title,
            quantity: self.quantity,
            unit_price: decode_money("purchase_orders.unit_price", &self.unit_price)?,
            total_amount: decode_money("purchase_orders.total_amount", &self.total_amount)?,
            supplier: self.supplier,
            notes: self.notes,
            status: decode_enum::<PurchaseOrderStatus>("purchase_orders.status", &self.status)?,
            created_by: self.created_by,
            created_by_username,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = sales)]
struct SaleRow {
    sale_id: i64,
    book_id: i64,
    quantity: i64,
    unit_price: String,
    total_amount: String,
    customer: Option<String>,
    notes: Option<String>,
    status: String,
    created_by: i64,
    created_at: String,
    updated_at: String,
}

impl SaleRow {
    fn into_data(
        self,
        book_title: String,
        created_by_username: String,
    ) -> Result<SaleData, PersistenceError> {
        Ok(SaleData {
            sale_id: self.sale_id,
            book_id: self.book_id,
            book_title,
            quantity: self.quantity,
            unit_price: decode_money("sales.unit_price", &self.unit_price)?,
            total_amount: decode_money("sales.total_amount", &self.total_amount)?,
            customer: self.customer,
            notes: self.notes,
            status: decode_enum::<SaleStatus>("sales.status", &self.status)?,
            created_by: self.created_by,
            created_by_username,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Retrieves a purchase order.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the order is not found.
pub fn get_purchase_order(
    conn: &mut SqliteConnection,
    purchase_order_id: i64,
) -> Result<Option<PurchaseOrderData>, PersistenceError> {
    debug!("Looking up purchase order ID: {}", purchase_order_id);

    let result: Result<(PurchaseOrderRow, String, String), diesel::result::Error> =
        purchase_orders::table
            .inner_join(books::table)
            .inner_join(users::table)
            .filter(purchase_orders::purchase_order_id.eq(purchase_order_id))
            .select((PurchaseOrderRow::as_select(), books::title, users::username))
            .first(conn);

    match result {
        Ok((row, title, username)) => Ok(Some(row.into_data(title, username)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists purchase orders matching a filter, newest first.
///
/// The search term matches the supplier, the book title, or an order
/// number such as `PO-000042`.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn list_purchase_orders(
    conn: &mut SqliteConnection,
    filter: &PurchaseOrderFilter,
) -> Result<Vec<PurchaseOrderData>, PersistenceError> {
    debug!(?filter, "Listing purchase orders");

    let mut query = purchase_orders::table
        .inner_join(books::table)
        .inner_join(users::table)
        .select((PurchaseOrderRow::as_select(), books::title, users::username))
        .into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(purchase_orders::status.eq(status.as_str()));
    }
    if let Some(book_id) = filter.book_id {
        query = query.filter(purchase_orders::book_id.eq(book_id));
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern: String = like_pattern(search);
        let number: i64 = parse_record_number("PO-", search).unwrap_or(0);
        query = query.filter(
            purchase_orders::supplier
                .like(pattern.clone())
                .or(books::title.like(pattern))
                .or(purchase_orders::purchase_order_id.eq(number)),
        );
    }

    let rows: Vec<(PurchaseOrderRow, String, String)> = query
        .order(purchase_orders::purchase_order_id.desc())
        .load(conn)?;

    rows.into_iter()
        .map(|(row, title, username)| row.into_data(title, username))
        .collect()
}

/// Retrieves a sale.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the sale is not found.
pub fn get_sale(
    conn: &mut SqliteConnection,
    sale_id: i64,
) -> Result<Option<SaleData>, PersistenceError> {
    debug!("Looking up sale ID: {}", sale_id);

    let result: Result<(SaleRow, String, String), diesel::result::Error> = sales::table
        .inner_join(books::table)
        .inner_join(users::table)
        .filter(sales::sale_id.eq(sale_id))
        .select((SaleRow::as_select(), books::title, users::username))
        .first(conn);

    match result {
        Ok((row, title, username)) => Ok(Some(row.into_data(title, username)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists sales matching a filter, newest first.
///
/// The search term matches the customer, the book title, or a sale number
/// such as `SA-000042`.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn list_sales(
    conn: &mut SqliteConnection,
    filter: &SaleFilter,
) -> Result<Vec<SaleData>, PersistenceError> {
    debug!(?filter, "Listing sales");

    let mut query = sales::table
        .inner_join(books::table)
        .inner_join(users::table)
        .select((SaleRow::as_select(), books::title, users::username))
        .into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(sales::status.eq(status.as_str()));
    }
    if let Some(book_id) = filter.book_id {
        query = query.filter(sales::book_id.eq(book_id));
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern: String = like_pattern(search);
        let number: i64 = parse_record_number("SA-", search).unwrap_or(0);
        query = query.filter(
            books::title
                .like(pattern.clone())
                .or(sales::customer
                    .is_not_null()
                    .and(sales::customer.assume_not_null().like(pattern)))
                .or(sales::sale_id.eq(number)),
        );
    }

    let rows: Vec<(SaleRow, String, String)> =
        query.order(sales::sale_id.desc()).load(conn)?;

    rows.into_iter()
        .map(|(row, title, username)| row.into_data(title, username))
        .collect()
}
