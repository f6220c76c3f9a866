// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Category and book queries.

use std::collections::HashMap;

use bookstore_domain::BookStatus;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use super::{decode_enum, decode_money, like_pattern};
use crate::data_models::{BookData, BookFilter, CategoryData};
use crate::diesel_schema::{books, categories};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = categories)]
struct CategoryRow {
    category_id: i64,
    name: String,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

impl CategoryRow {
    fn into_data(self, book_count: i64) -> CategoryData {
        CategoryData {
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            book_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = books)]
struct BookRow {
    book_id: i64,
    isbn: String,
    title: String,
    author: String,
    publisher: String,
    category_id: Option<i64>,
    price: String,
    stock: i64,
    status: String,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

impl BookRow {
    fn into_data(self, category_name: Option<String>) -> Result<BookData, PersistenceError> {
        Ok(BookData {
            book_id: self.book_id,
            isbn: self.isbn,
            title: self.title,
            author: self.author,
            publisher: self.publisher,
            category_id: self.category_id,
            category_name,
            price: decode_money("books.price", &self.price)?,
            stock: self.stock,
            status: decode_enum::<BookStatus>("books.status", &self.status)?,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Retrieves a category with the number of books filed under it.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the category is not found.
pub fn get_category(
    conn: &mut SqliteConnection,
    category_id: i64,
) -> Result<Option<CategoryData>, PersistenceError> {
    use diesel::dsl::count;

    debug!("Looking up category ID: {}", category_id);

    let result: Result<CategoryRow, diesel::result::Error> = categories::table
        .filter(categories::category_id.eq(category_id))
        .select(CategoryRow::as_select())
        .first(conn);

    let row: CategoryRow = match result {
        Ok(row) => row,
        Err(diesel::result::Error::NotFound) => return Ok(None),
        Err(e) => return Err(PersistenceError::from(e)),
    };

    let book_count: i64 = books::table
        .filter(books::category_id.eq(category_id))
        .select(count(books::book_id))
        .first(conn)?;

    Ok(Some(row.into_data(book_count)))
}

/// Lists all categories by name, each with its book count.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_categories(conn: &mut SqliteConnection) -> Result<Vec<CategoryData>, PersistenceError> {
    use diesel::dsl::count_star;

    debug!("Listing categories");

    let rows: Vec<CategoryRow> = categories::table
        .select(CategoryRow::as_select())
        .order(categories::name.asc())
        .load(conn)?;

    let counts: HashMap<i64, i64> = books::table
        .filter(books::category_id.is_not_null())
        .group_by(books::category_id)
        .select((books::category_id, count_star()))
        .load::<(Option<i64>, i64)>(conn)?
        .into_iter()
        .filter_map(|(category_id, total)| category_id.map(|id| (id, total)))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| {
            let book_count: i64 = counts.get(&row.category_id).copied().unwrap_or(0);
            row.into_data(book_count)
        })
        .collect())
}

/// Retrieves a book with its category name.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the book is not found.
pub fn get_book(
    conn: &mut SqliteConnection,
    book_id: i64,
) -> Result<Option<BookData>, PersistenceError> {
    debug!("Looking up book ID: {}", book_id);

    let result: Result<(BookRow, Option<String>), diesel::result::Error> = books::table
        .left_join(categories::table)
        .filter(books::book_id.eq(book_id))
        .select((BookRow::as_select(), categories::name.nullable()))
        .first(conn);

    match result {
        Ok((row, category_name)) => Ok(Some(row.into_data(category_name)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists books matching a filter, ordered by title.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn list_books(
    conn: &mut SqliteConnection,
    filter: &BookFilter,
) -> Result<Vec<BookData>, PersistenceError> {
    debug!(?filter, "Listing books");

    let mut query = books::table
        .left_join(categories::table)
        .select((BookRow::as_select(), categories::name.nullable()))
        .into_boxed();

    if let Some(category_id) = filter.category_id {
        query = query.filter(books::category_id.eq(category_id));
    }
    if let Some(status) = filter.status {
        query = query.filter(books::status.eq(status.as_str()));
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern: String = like_pattern(search);
        query = query.filter(
            books::title
                .like(pattern.clone())
                .or(books::author.like(pattern.clone()))
                .or(books::publisher.like(pattern.clone()))
                .or(books::isbn.like(pattern)),
        );
    }

    let rows: Vec<(BookRow, Option<String>)> = query
        .order((books::title.asc(), books::book_id.asc()))
        .load(conn)?;

    rows.into_iter()
        .map(|(row, category_name)| row.into_data(category_name))
        .collect()
}
