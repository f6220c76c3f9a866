// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions, one per operation.
//!
//! Every handler authorizes the actor first, then validates input, then
//! touches persistence. Handlers never see HTTP types; the server maps
//! their results to responses.

pub mod catalog;
pub mod financial;
pub mod purchases;
pub mod sales;
pub mod users;

use std::str::FromStr;

use bookstore::TransitionResult;
use bookstore_domain::{DomainError, validate_optional_text, validate_required_text};
use bookstore_persistence::{
    BookData, InventoryRequest, LedgerEntryData, Persistence, PersistedTransition,
};
use tracing::info;

use crate::auth::{Action, AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_domain_error, translate_inventory_error, translate_persistence_error,
};
use crate::request_response::{BookResponse, InventoryActionResponse, LedgerEntryResponse};

pub(crate) const NAME_MAX_LEN: usize = 150;
pub(crate) const SHORT_TEXT_MAX_LEN: usize = 100;
pub(crate) const TITLE_MAX_LEN: usize = 200;
pub(crate) const LONG_TEXT_MAX_LEN: usize = 1000;

pub(crate) fn authorize(actor: &AuthenticatedActor, action: Action) -> Result<(), ApiError> {
    AuthorizationService::authorize(actor, action).map_err(ApiError::from)
}

/// Parses a string-backed enum field.
pub(crate) fn parse_field<T>(value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    T::from_str(value.trim()).map_err(translate_domain_error)
}

/// Parses an optional filter; a blank value means "no filter".
pub(crate) fn parse_filter<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_field(raw).map(Some),
    }
}

pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ApiError> {
    validate_required_text(field, value, max).map_err(translate_domain_error)
}

pub(crate) fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ApiError> {
    validate_optional_text(field, value, max).map_err(translate_domain_error)
}

/// Validates a nullable field of a partial update, preserving the
/// distinction between "unchanged" and "cleared".
pub(crate) fn optional_text_update(
    field: &'static str,
    value: Option<Option<&str>>,
    max: usize,
) -> Result<Option<Option<String>>, ApiError> {
    value
        .map(|inner| optional_text(field, inner, max))
        .transpose()
}

/// Text that may be empty but is length-bounded, such as first names.
pub(crate) fn bounded_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ApiError> {
    Ok(optional_text(field, Some(value), max)?.unwrap_or_default())
}

pub(crate) fn load_book(persistence: &mut Persistence, book_id: i64) -> Result<BookData, ApiError> {
    persistence
        .get_book(book_id)
        .map_err(|e| translate_persistence_error("Book", e))?
        .ok_or_else(|| ApiError::not_found("Book", book_id))
}

pub(crate) fn load_ledger_entry(
    persistence: &mut Persistence,
    transaction_id: i64,
) -> Result<LedgerEntryData, ApiError> {
    persistence
        .get_ledger_entry(transaction_id)
        .map_err(|e| translate_persistence_error("Ledger entry", e))?
        .ok_or_else(|| ApiError::not_found("Ledger entry", transaction_id))
}

/// Runs an inventory transition and reports the book and ledger entry as
/// they stand afterwards.
///
/// The caller fills in the order or sale the transition moved.
pub(crate) fn run_inventory_action(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    resource_type: &str,
    request: InventoryRequest,
) -> Result<(InventoryActionResponse, PersistedTransition), ApiError> {
    let (result, persisted): (TransitionResult, PersistedTransition) = persistence
        .apply_inventory_transition(request, actor.user_id)
        .map_err(|e| translate_inventory_error(resource_type, e))?;

    info!(
        actor = %actor.username,
        action = result.action,
        book_id = result.book_id,
        previous_stock = result.previous_stock,
        new_stock = result.new_stock,
        "{}",
        result.details
    );

    let book: BookData = load_book(persistence, result.book_id)?;
    let ledger_entry: Option<LedgerEntryResponse> = persisted
        .ledger_entry_id
        .map(|id| load_ledger_entry(persistence, id))
        .transpose()?
        .map(LedgerEntryResponse::from);

    Ok((
        InventoryActionResponse {
            message: result.details,
            book: BookResponse::from(book),
            purchase_order: None,
            sale: None,
            ledger_entry,
        },
        persisted,
    ))
}
