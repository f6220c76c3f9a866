// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sale handlers.

use bookstore::{SaleLine, TransitionResult};
use bookstore_domain::money::validate_positive;
use bookstore_domain::{SaleStatus, validate_quantity};
use bookstore_persistence::{
    InventoryRequest, PersistedTransition, Persistence, PersistenceError, SaleData, SaleFilter,
};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::{
    LONG_TEXT_MAX_LEN, SHORT_TEXT_MAX_LEN, authorize, optional_text, optional_text_update,
    parse_filter, run_inventory_action,
};
use crate::auth::{Action, AuthenticatedActor};
use crate::error::{
    ApiError, translate_domain_error, translate_inventory_error, translate_persistence_error,
};
use crate::request_response::{
    CreateSaleBatchRequest, CreateSaleRequest, InventoryActionResponse, ListSalesQuery,
    MessageResponse, SaleBatchResponse, SaleResponse, UpdateSaleRequest,
};

const RESOURCE: &str = "Sale";

fn sale_error(err: PersistenceError) -> ApiError {
    translate_persistence_error(RESOURCE, err)
}

fn load_sale(persistence: &mut Persistence, sale_id: i64) -> Result<SaleData, ApiError> {
    persistence
        .get_sale(sale_id)
        .map_err(sale_error)?
        .ok_or_else(|| ApiError::not_found(RESOURCE, sale_id))
}

fn validated_line(
    book_id: i64,
    quantity: i64,
    unit_price: Option<Decimal>,
) -> Result<SaleLine, ApiError> {
    Ok(SaleLine {
        book_id,
        quantity: validate_quantity("quantity", quantity).map_err(translate_domain_error)?,
        unit_price: unit_price
            .map(|price| validate_positive("unit_price", price))
            .transpose()
            .map_err(translate_domain_error)?,
    })
}

fn sale_created_by_transition(
    persistence: &mut Persistence,
    persisted: PersistedTransition,
) -> Result<SaleData, ApiError> {
    let sale_id: i64 = persisted.sale_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Sale transition did not record a sale"),
    })?;
    load_sale(persistence, sale_id)
}

/// Lists sales matching a filter.
///
/// # Errors
///
/// Returns an error if the status filter is invalid or the query fails.
pub fn list_sales(
    persistence: &mut Persistence,
    query: &ListSalesQuery,
) -> Result<Vec<SaleResponse>, ApiError> {
    let filter: SaleFilter = SaleFilter {
        status: parse_filter(query.status.as_deref())?,
        book_id: query.book,
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
    };

    Ok(persistence
        .list_sales(&filter)
        .map_err(sale_error)?
        .into_iter()
        .map(SaleResponse::from)
        .collect())
}

/// Returns one sale.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the sale does not exist.
pub fn get_sale(persistence: &mut Persistence, sale_id: i64) -> Result<SaleResponse, ApiError> {
    debug!(sale_id, "Loading sale");
    load_sale(persistence, sale_id).map(SaleResponse::from)
}

/// Sells copies of one book and records the income.
///
/// Without a unit price the book's list price is charged.
///
/// # Errors
///
/// Returns an error if a field is invalid, the book is not available, or
/// there is not enough stock. Nothing is written in that case.
pub fn create_sale(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateSaleRequest,
) -> Result<InventoryActionResponse, ApiError> {
    authorize(actor, Action::RecordSales)?;

    let line: SaleLine = validated_line(request.book_id, request.quantity, request.unit_price)?;
    let customer: Option<String> =
        optional_text("customer", request.customer.as_deref(), SHORT_TEXT_MAX_LEN)?;
    let notes: Option<String> = optional_text("notes", request.notes.as_deref(), LONG_TEXT_MAX_LEN)?;

    let (mut response, persisted): (InventoryActionResponse, PersistedTransition) =
        run_inventory_action(
            persistence,
            actor,
            RESOURCE,
            InventoryRequest::RecordSale {
                book_id: line.book_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                customer,
                notes,
            },
        )?;

    response.sale = Some(SaleResponse::from(sale_created_by_transition(
        persistence,
        persisted,
    )?));
    Ok(response)
}

/// Sells several lines as one unit: every line is recorded or none is.
///
/// # Errors
///
/// Returns an error if the batch is empty, a line is invalid, or any line
/// cannot be filled from stock.
pub fn create_sale_batch(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateSaleBatchRequest,
) -> Result<SaleBatchResponse, ApiError> {
    authorize(actor, Action::RecordSales)?;

    let lines: Vec<SaleLine> = request
        .items
        .iter()
        .map(|item| validated_line(item.book_id, item.quantity, item.unit_price))
        .collect::<Result<_, _>>()?;
    let customer: Option<String> =
        optional_text("customer", request.customer.as_deref(), SHORT_TEXT_MAX_LEN)?;
    let notes: Option<String> = optional_text("notes", request.notes.as_deref(), LONG_TEXT_MAX_LEN)?;

    let results: Vec<(TransitionResult, PersistedTransition)> = persistence
        .create_sale_batch(&lines, customer.as_deref(), notes.as_deref(), actor.user_id)
        .map_err(|e| translate_inventory_error(RESOURCE, e))?;

    let mut sales: Vec<SaleResponse> = Vec::with_capacity(results.len());
    let mut total_amount: Decimal = Decimal::ZERO;
    for (_, persisted) in results {
        let sale: SaleData = sale_created_by_transition(persistence, persisted)?;
        total_amount += sale.total_amount;
        sales.push(SaleResponse::from(sale));
    }

    info!(
        actor = %actor.username,
        lines = sales.len(),
        total = %total_amount,
        "Recorded sale batch"
    );
    Ok(SaleBatchResponse {
        sales,
        total_amount,
    })
}

/// Edits a sale's customer and notes. Quantity and price are fixed once
/// recorded.
///
/// # Errors
///
/// Returns an error if a field is too long or the sale does not exist.
pub fn update_sale(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    sale_id: i64,
    request: &UpdateSaleRequest,
) -> Result<SaleResponse, ApiError> {
    authorize(actor, Action::RecordSales)?;

    let current: SaleData = load_sale(persistence, sale_id)?;
    let customer: Option<String> = optional_text_update(
        "customer",
        request.customer.as_ref().map(Option::as_deref),
        SHORT_TEXT_MAX_LEN,
    )?
    .unwrap_or(current.customer);
    let notes: Option<String> = optional_text_update(
        "notes",
        request.notes.as_ref().map(Option::as_deref),
        LONG_TEXT_MAX_LEN,
    )?
    .unwrap_or(current.notes);

    persistence
        .update_sale_details(sale_id, customer.as_deref(), notes.as_deref())
        .map_err(sale_error)?;

    let sale: SaleData = load_sale(persistence, sale_id)?;
    info!(actor = %actor.username, sale = %sale.sale_number(), "Updated sale");
    Ok(SaleResponse::from(sale))
}

/// Deletes a returned sale. Admin only.
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` if the sale has not been
/// returned, or an error if unauthorized or it does not exist.
pub fn delete_sale(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    sale_id: i64,
) -> Result<MessageResponse, ApiError> {
    authorize(actor, Action::DeleteSale)?;

    let sale: SaleData = load_sale(persistence, sale_id)?;
    if sale.status != SaleStatus::Returned {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("sale_returned"),
            message: format!(
                "Sale {} is {}; only returned sales can be deleted",
                sale.sale_number(),
                sale.status
            ),
        });
    }

    persistence.delete_sale(sale_id).map_err(sale_error)?;

    info!(actor = %actor.username, sale = %sale.sale_number(), "Deleted sale");
    Ok(MessageResponse::new(format!(
        "Sale {} deleted",
        sale.sale_number()
    )))
}

/// Takes back a completed sale, restoring stock and recording the refund.
///
/// # Errors
///
/// Returns an error if the sale does not exist or was already returned.
pub fn process_return(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    sale_id: i64,
) -> Result<InventoryActionResponse, ApiError> {
    authorize(actor, Action::RecordSales)?;

    let (mut response, _): (InventoryActionResponse, _) = run_inventory_action(
        persistence,
        actor,
        RESOURCE,
        InventoryRequest::ReturnSale { sale_id },
    )?;
    response.sale = Some(SaleResponse::from(load_sale(persistence, sale_id)?));
    Ok(response)
}
