// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Category and book mutations.

use bookstore_domain::BookStatus;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use super::orders::create_purchase_order;
use super::{money_text, now};
use crate::connection::last_insert_id;
use crate::data_models::{BookData, BookUpdate, NewBook, NewPurchaseOrder};
use crate::diesel_schema::{books, categories};
use crate::error::PersistenceError;
use crate::queries::catalog::get_book;

/// Creates a category.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the name is taken.
pub fn create_category(
    conn: &mut SqliteConnection,
    name: &str,
    description: Option<&str>,
) -> Result<i64, PersistenceError> {
    info!("Creating category: {}", name);

    diesel::insert_into(categories::table)
        .values((
            categories::name.eq(name),
            categories::description.eq(description),
        ))
        .execute(conn)?;

    let category_id: i64 = last_insert_id(conn)?;

    info!(category_id, "Category created");
    Ok(category_id)
}

/// Replaces a category's name and description.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the category does not exist, or
/// `PersistenceError::UniqueViolation` if the name is taken.
pub fn update_category(
    conn: &mut SqliteConnection,
    category_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<(), PersistenceError> {
    info!(category_id, "Updating category to name: {}", name);

    let rows_affected: usize = diesel::update(categories::table)
        .filter(categories::category_id.eq(category_id))
        .set((
            categories::name.eq(name),
            categories::description.eq(description),
            categories::updated_at.eq(now()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Category with ID {category_id} not found"
        )));
    }
    Ok(())
}

/// Deletes a category. Its books are kept and become uncategorized.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the category does not exist.
pub fn delete_category(conn: &mut SqliteConnection, category_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting category ID: {}", category_id);

    let rows_affected: usize = diesel::delete(categories::table)
        .filter(categories::category_id.eq(category_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Category with ID {category_id} not found"
        )));
    }
    Ok(())
}

/// Creates a book. Its status is derived from the initial stock.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the ISBN is taken,
/// `PersistenceError::ForeignKeyViolation` if the category does not exist,
/// or `PersistenceError::CheckViolation` if the stock is negative.
pub fn create_book(conn: &mut SqliteConnection, book: &NewBook) -> Result<i64, PersistenceError> {
    let status: BookStatus = BookStatus::derive(BookStatus::InStock, book.stock);

    info!(
        "Creating book with ISBN: {}, title: {}, stock: {}",
        book.isbn, book.title, book.stock
    );

    diesel::insert_into(books::table)
        .values((
            books::isbn.eq(&book.isbn),
            books::title.eq(&book.title),
            books::author.eq(&book.author),
            books::publisher.eq(&book.publisher),
            books::category_id.eq(book.category_id),
            books::price.eq(money_text(book.price)),
            books::stock.eq(book.stock),
            books::status.eq(status.as_str()),
            books::description.eq(book.description.as_deref()),
        ))
        .execute(conn)?;

    let book_id: i64 = last_insert_id(conn)?;

    info!(book_id, %status, "Book created");
    Ok(book_id)
}

/// Applies a partial update to a book's catalog fields and returns the
/// stored result. Stock and status are left untouched.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the book does not exist, or a
/// constraint error if the new ISBN or category is rejected.
pub fn update_book(
    conn: &mut SqliteConnection,
    book_id: i64,
    update: &BookUpdate,
) -> Result<BookData, PersistenceError> {
    let current: BookData = get_book(conn, book_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Book with ID {book_id} not found")))?;

    info!(book_id, "Updating book");

    diesel::update(books::table)
        .filter(books::book_id.eq(book_id))
        .set((
            books::isbn.eq(update.isbn.clone().unwrap_or(current.isbn)),
            books::title.eq(update.title.clone().unwrap_or(current.title)),
            books::author.eq(update.author.clone().unwrap_or(current.author)),
            books::publisher.eq(update.publisher.clone().unwrap_or(current.publisher)),
            books::category_id.eq(update.category_id.unwrap_or(current.category_id)),
            books::price.eq(money_text(update.price.unwrap_or(current.price))),
            books::description.eq(update.description.clone().unwrap_or(current.description)),
            books::updated_at.eq(now()),
        ))
        .execute(conn)?;

    get_book(conn, book_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Book with ID {book_id} not found")))
}

/// Deletes a book.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyViolation` if purchase orders or
/// sales reference the book, or `PersistenceError::NotFound` if it does
/// not exist.
pub fn delete_book(conn: &mut SqliteConnection, book_id: i64) -> Result<(), PersistenceError> {
    info!("Attempting to delete book ID: {}", book_id);

    let rows_affected: usize = diesel::delete(books::table)
        .filter(books::book_id.eq(book_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Book with ID {book_id} not found"
        )));
    }

    info!("Deleted book ID: {}", book_id);
    Ok(())
}

/// Creates a book and a pending purchase order for it in one transaction.
///
/// `order.book_id` is ignored and replaced with the new book's ID.
///
/// # Returns
///
/// The new book ID and purchase order ID.
///
/// # Errors
///
/// Returns an error if either insert fails; neither row is kept.
pub fn create_book_with_purchase_order(
    conn: &mut SqliteConnection,
    book: &NewBook,
    order: &NewPurchaseOrder,
    created_by: i64,
) -> Result<(i64, i64), PersistenceError> {
    conn.immediate_transaction(|conn| {
        let book_id: i64 = create_book(conn, book)?;
        let order: NewPurchaseOrder = NewPurchaseOrder {
            book_id,
            ..order.clone()
        };
        let purchase_order_id: i64 = create_purchase_order(conn, &order, created_by)?;
        Ok((book_id, purchase_order_id))
    })
}
