// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Category and book handlers.

use bookstore_domain::{BookStatus, Isbn, money::validate_positive};
use bookstore_persistence::{
    BookData, BookFilter, BookUpdate, CategoryData, InventoryRequest, NewBook, Persistence,
    PersistenceError,
};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::{
    LONG_TEXT_MAX_LEN, SHORT_TEXT_MAX_LEN, TITLE_MAX_LEN, authorize, load_book, optional_text,
    optional_text_update, parse_field, parse_filter, required_text, run_inventory_action,
};
use crate::auth::{Action, AuthenticatedActor};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    BookResponse, CategoryRequest, CategoryResponse, ChangeStatusRequest, CreateBookRequest,
    InventoryActionResponse, ListBooksQuery, MessageResponse, UpdateBookRequest,
    UpdateStockRequest,
};

const CATEGORY_NAME_MAX_LEN: usize = 100;

fn category_error(err: PersistenceError) -> ApiError {
    translate_persistence_error("Category", err)
}

fn book_error(err: PersistenceError) -> ApiError {
    translate_persistence_error("Book", err)
}

fn load_category(
    persistence: &mut Persistence,
    category_id: i64,
) -> Result<CategoryData, ApiError> {
    persistence
        .get_category(category_id)
        .map_err(category_error)?
        .ok_or_else(|| ApiError::not_found("Category", category_id))
}

/// A book may only be filed under a category that exists.
pub(crate) fn ensure_category_exists(
    persistence: &mut Persistence,
    category_id: Option<i64>,
) -> Result<(), ApiError> {
    let Some(category_id) = category_id else {
        return Ok(());
    };
    if persistence
        .get_category(category_id)
        .map_err(category_error)?
        .is_none()
    {
        return Err(ApiError::InvalidInput {
            field: String::from("category_id"),
            message: format!("Category {category_id} does not exist"),
        });
    }
    Ok(())
}

/// Validated catalog fields shared by book creation paths.
pub(crate) struct BookFields {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub description: Option<String>,
}

pub(crate) fn validate_book_fields(
    isbn: &str,
    title: &str,
    author: &str,
    publisher: &str,
    description: Option<&str>,
) -> Result<BookFields, ApiError> {
    Ok(BookFields {
        isbn: Isbn::parse(isbn)
            .map_err(translate_domain_error)?
            .as_str()
            .to_string(),
        title: required_text("title", title, TITLE_MAX_LEN)?,
        author: required_text("author", author, SHORT_TEXT_MAX_LEN)?,
        publisher: required_text("publisher", publisher, SHORT_TEXT_MAX_LEN)?,
        description: optional_text("description", description, LONG_TEXT_MAX_LEN)?,
    })
}

fn validated_price(price: Decimal) -> Result<Decimal, ApiError> {
    validate_positive("price", price).map_err(translate_domain_error)
}

// ========================================================================
// Categories
// ========================================================================

/// Lists every category with its book count.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_categories(persistence: &mut Persistence) -> Result<Vec<CategoryResponse>, ApiError> {
    Ok(persistence
        .list_categories()
        .map_err(category_error)?
        .into_iter()
        .map(CategoryResponse::from)
        .collect())
}

/// Returns one category.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the category does not exist.
pub fn get_category(
    persistence: &mut Persistence,
    category_id: i64,
) -> Result<CategoryResponse, ApiError> {
    debug!(category_id, "Loading category");
    load_category(persistence, category_id).map(CategoryResponse::from)
}

/// Creates a category. Admin only.
///
/// # Errors
///
/// Returns an error if unauthorized, the name is blank or too long, or the
/// name is already taken (case-insensitively).
pub fn create_category(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CategoryRequest,
) -> Result<CategoryResponse, ApiError> {
    authorize(actor, Action::ManageCategories)?;

    let name: String = required_text("name", &request.name, CATEGORY_NAME_MAX_LEN)?;
    let description: Option<String> =
        optional_text("description", request.description.as_deref(), LONG_TEXT_MAX_LEN)?;

    let category_id: i64 = persistence
        .create_category(&name, description.as_deref())
        .map_err(category_error)?;

    info!(actor = %actor.username, category_id, name = %name, "Created category");
    load_category(persistence, category_id).map(CategoryResponse::from)
}

/// Replaces a category's name and description. Admin only.
///
/// # Errors
///
/// Returns an error if unauthorized, a field is invalid, the category does
/// not exist, or the name is taken.
pub fn update_category(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    category_id: i64,
    request: &CategoryRequest,
) -> Result<CategoryResponse, ApiError> {
    authorize(actor, Action::ManageCategories)?;

    let name: String = required_text("name", &request.name, CATEGORY_NAME_MAX_LEN)?;
    let description: Option<String> =
        optional_text("description", request.description.as_deref(), LONG_TEXT_MAX_LEN)?;

    persistence
        .update_category(category_id, &name, description.as_deref())
        .map_err(category_error)?;

    info!(actor = %actor.username, category_id, name = %name, "Updated category");
    load_category(persistence, category_id).map(CategoryResponse::from)
}

/// Deletes a category. Its books become uncategorized. Admin only.
///
/// # Errors
///
/// Returns an error if unauthorized or the category does not exist.
pub fn delete_category(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    category_id: i64,
) -> Result<MessageResponse, ApiError> {
    authorize(actor, Action::ManageCategories)?;

    let category: CategoryData = load_category(persistence, category_id)?;
    persistence
        .delete_category(category_id)
        .map_err(category_error)?;

    info!(actor = %actor.username, category_id, name = %category.name, "Deleted category");
    Ok(MessageResponse::new(format!(
        "Category '{}' deleted",
        category.name
    )))
}

// ========================================================================
// Books
// ========================================================================

/// Lists books matching a filter.
///
/// # Errors
///
/// Returns an error if the status filter is invalid or the query fails.
pub fn list_books(
    persistence: &mut Persistence,
    query: &ListBooksQuery,
) -> Result<Vec<BookResponse>, ApiError> {
    let filter: BookFilter = BookFilter {
        category_id: query.category,
        status: parse_filter(query.status.as_deref())?,
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
    };

    Ok(persistence
        .list_books(&filter)
        .map_err(book_error)?
        .into_iter()
        .map(BookResponse::from)
        .collect())
}

/// Returns one book.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the book does not exist.
pub fn get_book(persistence: &mut Persistence, book_id: i64) -> Result<BookResponse, ApiError> {
    debug!(book_id, "Loading book");
    load_book(persistence, book_id).map(BookResponse::from)
}

/// Adds a book to the catalog. Admin or manager.
///
/// # Errors
///
/// Returns an error if unauthorized, a field is invalid, the category does
/// not exist, or the ISBN is already catalogued.
pub fn create_book(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateBookRequest,
) -> Result<BookResponse, ApiError> {
    authorize(actor, Action::EditCatalog)?;

    let fields: BookFields = validate_book_fields(
        &request.isbn,
        &request.title,
        &request.author,
        &request.publisher,
        request.description.as_deref(),
    )?;
    let price: Decimal = validated_price(request.price)?;
    let stock: i64 = request.stock.unwrap_or(0);
    if stock < 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("stock"),
            message: String::from("Stock must not be negative"),
        });
    }
    ensure_category_exists(persistence, request.category_id)?;

    let book_id: i64 = persistence
        .create_book(&NewBook {
            isbn: fields.isbn,
            title: fields.title,
            author: fields.author,
            publisher: fields.publisher,
            category_id: request.category_id,
            price,
            stock,
            description: fields.description,
        })
        .map_err(book_error)?;

    let book: BookData = load_book(persistence, book_id)?;
    info!(actor = %actor.username, book_id, isbn = %book.isbn, "Created book");
    Ok(BookResponse::from(book))
}

/// Applies a partial update to a book's catalog fields. Admin or manager.
///
/// # Errors
///
/// Returns an error if unauthorized, a field is invalid, the category or
/// book does not exist, or the new ISBN is taken.
pub fn update_book(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    book_id: i64,
    request: &UpdateBookRequest,
) -> Result<BookResponse, ApiError> {
    authorize(actor, Action::EditCatalog)?;

    let update: BookUpdate = BookUpdate {
        isbn: request
            .isbn
            .as_deref()
            .map(|raw| {
                Isbn::parse(raw)
                    .map(|isbn| isbn.as_str().to_string())
                    .map_err(translate_domain_error)
            })
            .transpose()?,
        title: request
            .title
            .as_deref()
            .map(|title| required_text("title", title, TITLE_MAX_LEN))
            .transpose()?,
        author: request
            .author
            .as_deref()
            .map(|author| required_text("author", author, SHORT_TEXT_MAX_LEN))
            .transpose()?,
        publisher: request
            .publisher
            .as_deref()
            .map(|publisher| required_text("publisher", publisher, SHORT_TEXT_MAX_LEN))
            .transpose()?,
        category_id: request.category_id,
        price: request.price.map(validated_price).transpose()?,
        description: optional_text_update(
            "description",
            request.description.as_ref().map(Option::as_deref),
            LONG_TEXT_MAX_LEN,
        )?,
    };
    if let Some(category_id) = update.category_id {
        ensure_category_exists(persistence, category_id)?;
    }

    let book: BookData = persistence
        .update_book(book_id, &update)
        .map_err(book_error)?;

    info!(actor = %actor.username, book_id, "Updated book");
    Ok(BookResponse::from(book))
}

/// Deletes a book. Admin only.
///
/// Books with purchase orders or sales cannot be deleted; discontinue them
/// instead.
///
/// # Errors
///
/// Returns an error if unauthorized, the book does not exist, or it is
/// referenced by orders or sales.
pub fn delete_book(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    book_id: i64,
) -> Result<MessageResponse, ApiError> {
    authorize(actor, Action::DeleteBook)?;

    let book: BookData = load_book(persistence, book_id)?;
    persistence.delete_book(book_id).map_err(|e| match e {
        PersistenceError::ForeignKeyViolation(_) => ApiError::Conflict {
            message: format!(
                "Book '{}' has purchase orders or sales; discontinue it instead",
                book.title
            ),
        },
        other => book_error(other),
    })?;

    info!(actor = %actor.username, book_id, isbn = %book.isbn, "Deleted book");
    Ok(MessageResponse::new(format!("Book '{}' deleted", book.title)))
}

/// Corrects a book's stock by a signed delta. Admin or manager.
///
/// No ledger entry is written.
///
/// # Errors
///
/// Returns an error if unauthorized, the delta is zero, or the stock would
/// go negative.
pub fn update_stock(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    book_id: i64,
    request: UpdateStockRequest,
) -> Result<InventoryActionResponse, ApiError> {
    authorize(actor, Action::EditCatalog)?;

    let (response, _): (InventoryActionResponse, _) = run_inventory_action(
        persistence,
        actor,
        "Book",
        InventoryRequest::AdjustStock {
            book_id,
            delta: request.quantity,
        },
    )?;
    Ok(response)
}

/// Sets a book's status. Admin or manager.
///
/// # Errors
///
/// Returns an error if unauthorized, the status is unknown, or it does not
/// match the book's stock.
pub fn change_status(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    book_id: i64,
    request: &ChangeStatusRequest,
) -> Result<InventoryActionResponse, ApiError> {
    authorize(actor, Action::EditCatalog)?;

    let status: BookStatus = parse_field(&request.status)?;
    let (response, _): (InventoryActionResponse, _) = run_inventory_action(
        persistence,
        actor,
        "Book",
        InventoryRequest::ChangeStatus { book_id, status },
    )?;
    Ok(response)
}
