// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Purchase order handlers.

use bookstore_domain::money::{line_total, markup_price, validate_positive};
use bookstore_domain::validate_quantity;
use bookstore_persistence::{
    BookData, InventoryRequest, NewBook, NewPurchaseOrder, Persistence, PersistenceError,
    PurchaseOrderData, PurchaseOrderFilter, PurchaseOrderUpdate,
};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::catalog::{BookFields, ensure_category_exists, validate_book_fields};
use super::{
    LONG_TEXT_MAX_LEN, SHORT_TEXT_MAX_LEN, authorize, load_book, optional_text,
    optional_text_update, parse_filter, required_text, run_inventory_action,
};
use crate::auth::{Action, AuthenticatedActor};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    BookResponse, CreatePurchaseRequest, CreatePurchaseWithBookRequest,
    CreatePurchaseWithBookResponse, InventoryActionResponse, ListPurchasesQuery, MessageResponse,
    PurchaseOrderResponse, UpdatePurchaseRequest,
};

const RESOURCE: &str = "Purchase order";

fn order_error(err: PersistenceError) -> ApiError {
    translate_persistence_error(RESOURCE, err)
}

fn load_order(
    persistence: &mut Persistence,
    purchase_order_id: i64,
) -> Result<PurchaseOrderData, ApiError> {
    persistence
        .get_purchase_order(purchase_order_id)
        .map_err(order_error)?
        .ok_or_else(|| ApiError::not_found(RESOURCE, purchase_order_id))
}

/// Validated quantity, unit price, total and supplier of an order.
struct OrderTerms {
    quantity: i64,
    unit_price: Decimal,
    total_amount: Decimal,
    supplier: String,
}

fn validate_terms(quantity: i64, unit_price: Decimal, supplier: &str) -> Result<OrderTerms, ApiError> {
    let quantity: i64 = validate_quantity("quantity", quantity).map_err(translate_domain_error)?;
    let unit_price: Decimal =
        validate_positive("unit_price", unit_price).map_err(translate_domain_error)?;
    let total_amount: Decimal = line_total(quantity, unit_price).map_err(translate_domain_error)?;
    let supplier: String = required_text("supplier", supplier, SHORT_TEXT_MAX_LEN)?;

    Ok(OrderTerms {
        quantity,
        unit_price,
        total_amount,
        supplier,
    })
}

fn not_pending(order: &PurchaseOrderData, verb: &str) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from("purchase_order_pending"),
        message: format!(
            "Purchase order {} is {} and can no longer be {verb}",
            order.order_number(),
            order.status
        ),
    }
}

/// Runs a purchase order transition and attaches the order as it stands
/// afterwards.
fn order_action(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: InventoryRequest,
    purchase_order_id: i64,
) -> Result<InventoryActionResponse, ApiError> {
    authorize(actor, Action::ManagePurchases)?;

    let (mut response, _): (InventoryActionResponse, _) =
        run_inventory_action(persistence, actor, RESOURCE, request)?;
    response.purchase_order = Some(PurchaseOrderResponse::from(load_order(
        persistence,
        purchase_order_id,
    )?));
    Ok(response)
}

/// Lists purchase orders matching a filter.
///
/// # Errors
///
/// Returns an error if the status filter is invalid or the query fails.
pub fn list_purchases(
    persistence: &mut Persistence,
    query: &ListPurchasesQuery,
) -> Result<Vec<PurchaseOrderResponse>, ApiError> {
    let filter: PurchaseOrderFilter = PurchaseOrderFilter {
        status: parse_filter(query.status.as_deref())?,
        book_id: query.book,
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
    };

    Ok(persistence
        .list_purchase_orders(&filter)
        .map_err(order_error)?
        .into_iter()
        .map(PurchaseOrderResponse::from)
        .collect())
}

/// Returns one purchase order.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the order does not exist.
pub fn get_purchase(
    persistence: &mut Persistence,
    purchase_order_id: i64,
) -> Result<PurchaseOrderResponse, ApiError> {
    debug!(purchase_order_id, "Loading purchase order");
    load_order(persistence, purchase_order_id).map(PurchaseOrderResponse::from)
}

/// Orders copies of a catalogued book. Admin or manager.
///
/// # Errors
///
/// Returns an error if unauthorized, a field is invalid, or the book does
/// not exist.
pub fn create_purchase(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreatePurchaseRequest,
) -> Result<PurchaseOrderResponse, ApiError> {
    authorize(actor, Action::ManagePurchases)?;

    let terms: OrderTerms = validate_terms(request.quantity, request.unit_price, &request.supplier)?;
    let notes: Option<String> = optional_text("notes", request.notes.as_deref(), LONG_TEXT_MAX_LEN)?;
    let book: BookData = load_book(persistence, request.book_id).map_err(|e| match e {
        ApiError::ResourceNotFound { message, .. } => ApiError::InvalidInput {
            field: String::from("book_id"),
            message,
        },
        other => other,
    })?;

    let purchase_order_id: i64 = persistence
        .create_purchase_order(
            &NewPurchaseOrder {
                book_id: book.book_id,
                quantity: terms.quantity,
                unit_price: terms.unit_price,
                total_amount: terms.total_amount,
                supplier: terms.supplier,
                notes,
            },
            actor.user_id,
        )
        .map_err(order_error)?;

    let order: PurchaseOrderData = load_order(persistence, purchase_order_id)?;
    info!(
        actor = %actor.username,
        order = %order.order_number(),
        book_id = order.book_id,
        quantity = order.quantity,
        total = %order.total_amount,
        "Created purchase order"
    );
    Ok(PurchaseOrderResponse::from(order))
}

/// Adds a new book to the catalog together with a pending order for it.
/// Admin or manager.
///
/// The book starts with no stock and a retail price marked up from the
/// unit price. Both rows are written or neither is.
///
/// # Errors
///
/// Returns an error if unauthorized, a field is invalid, the category does
/// not exist, or the ISBN is already catalogued.
pub fn create_purchase_with_new_book(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreatePurchaseWithBookRequest,
) -> Result<CreatePurchaseWithBookResponse, ApiError> {
    authorize(actor, Action::ManagePurchases)?;

    let fields: BookFields = validate_book_fields(
        &request.isbn,
        &request.title,
        &request.author,
        &request.publisher,
        request.description.as_deref(),
    )?;
    let terms: OrderTerms = validate_terms(request.quantity, request.unit_price, &request.supplier)?;
    let notes: Option<String> = optional_text("notes", request.notes.as_deref(), LONG_TEXT_MAX_LEN)?;
    ensure_category_exists(persistence, request.category_id)?;

    let new_book: NewBook = NewBook {
        isbn: fields.isbn,
        title: fields.title,
        author: fields.author,
        publisher: fields.publisher,
        category_id: request.category_id,
        price: markup_price(terms.unit_price),
        stock: 0,
        description: fields.description,
    };
    let new_order: NewPurchaseOrder = NewPurchaseOrder {
        book_id: 0,
        quantity: terms.quantity,
        unit_price: terms.unit_price,
        total_amount: terms.total_amount,
        supplier: terms.supplier,
        notes,
    };

    let (book_id, purchase_order_id): (i64, i64) = persistence
        .create_book_with_purchase_order(&new_book, &new_order, actor.user_id)
        .map_err(|e| translate_persistence_error("Book", e))?;

    let book: BookData = load_book(persistence, book_id)?;
    let order: PurchaseOrderData = load_order(persistence, purchase_order_id)?;
    info!(
        actor = %actor.username,
        isbn = %book.isbn,
        price = %book.price,
        order = %order.order_number(),
        "Created book with purchase order"
    );

    Ok(CreatePurchaseWithBookResponse {
        book: BookResponse::from(book),
        purchase_order: PurchaseOrderResponse::from(order),
    })
}

/// Applies a partial update to a pending order and recomputes its total.
/// Admin or manager.
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` if the order is no longer
/// pending, or an error if unauthorized or a field is invalid.
pub fn update_purchase(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    purchase_order_id: i64,
    request: &UpdatePurchaseRequest,
) -> Result<PurchaseOrderResponse, ApiError> {
    authorize(actor, Action::ManagePurchases)?;

    let current: PurchaseOrderData = load_order(persistence, purchase_order_id)?;
    if !current.status.is_editable() {
        return Err(not_pending(&current, "edited"));
    }

    let terms: OrderTerms = validate_terms(
        request.quantity.unwrap_or(current.quantity),
        request.unit_price.unwrap_or(current.unit_price),
        request.supplier.as_deref().unwrap_or(&current.supplier),
    )?;
    let notes: Option<String> = optional_text_update(
        "notes",
        request.notes.as_ref().map(Option::as_deref),
        LONG_TEXT_MAX_LEN,
    )?
    .unwrap_or(current.notes);

    persistence
        .update_purchase_order(
            purchase_order_id,
            &PurchaseOrderUpdate {
                quantity: terms.quantity,
                unit_price: terms.unit_price,
                total_amount: terms.total_amount,
                supplier: terms.supplier,
                notes,
            },
        )
        .map_err(order_error)?;

    let order: PurchaseOrderData = load_order(persistence, purchase_order_id)?;
    info!(
        actor = %actor.username,
        order = %order.order_number(),
        total = %order.total_amount,
        "Updated purchase order"
    );
    Ok(PurchaseOrderResponse::from(order))
}

/// Deletes an order that never moved money or stock (pending or returned).
/// Admin only.
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` if the order has been paid, or
/// an error if unauthorized or it does not exist.
pub fn delete_purchase(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    purchase_order_id: i64,
) -> Result<MessageResponse, ApiError> {
    authorize(actor, Action::DeletePurchase)?;

    let order: PurchaseOrderData = load_order(persistence, purchase_order_id)?;
    if !order.status.is_deletable() {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("purchase_order_deletable"),
            message: format!(
                "Purchase order {} is {} and can no longer be deleted",
                order.order_number(),
                order.status
            ),
        });
    }

    persistence
        .delete_purchase_order(purchase_order_id)
        .map_err(order_error)?;

    info!(actor = %actor.username, order = %order.order_number(), "Deleted purchase order");
    Ok(MessageResponse::new(format!(
        "Purchase order {} deleted",
        order.order_number()
    )))
}

/// Pays a pending order and records the purchase expense. Admin or manager.
///
/// # Errors
///
/// Returns an error if unauthorized, the order does not exist, or it is not
/// pending.
pub fn pay_purchase(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    purchase_order_id: i64,
) -> Result<InventoryActionResponse, ApiError> {
    order_action(
        persistence,
        actor,
        InventoryRequest::PayPurchaseOrder { purchase_order_id },
        purchase_order_id,
    )
}

/// Puts a paid order's copies on the shelf. Admin or manager.
///
/// # Errors
///
/// Returns an error if unauthorized, the order does not exist, or it is not
/// paid.
pub fn shelve_purchase(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    purchase_order_id: i64,
) -> Result<InventoryActionResponse, ApiError> {
    order_action(
        persistence,
        actor,
        InventoryRequest::ShelvePurchaseOrder { purchase_order_id },
        purchase_order_id,
    )
}

/// Sends a pending order back to the supplier. Admin or manager.
///
/// # Errors
///
/// Returns an error if unauthorized, the order does not exist, or it is not
/// pending.
pub fn return_purchase(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    purchase_order_id: i64,
) -> Result<InventoryActionResponse, ApiError> {
    order_action(
        persistence,
        actor,
        InventoryRequest::ReturnPurchaseOrder { purchase_order_id },
        purchase_order_id,
    )
}
