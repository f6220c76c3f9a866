// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger handlers.

use bookstore_domain::money::validate_positive;
use bookstore_domain::{LedgerSummary, TransactionCategory, TransactionType};
use bookstore_persistence::{
    LedgerEntryData, LedgerEntryUpdate, LedgerFilter, NewLedgerEntry, Persistence,
    PersistenceError,
};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::{authorize, load_ledger_entry, parse_field, parse_filter, required_text};
use crate::auth::{Action, AuthenticatedActor};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    CreateLedgerEntryRequest, LedgerEntryResponse, ListLedgerQuery, MessageResponse,
    UpdateLedgerEntryRequest,
};

const DESCRIPTION_MAX_LEN: usize = 255;

fn ledger_error(err: PersistenceError) -> ApiError {
    translate_persistence_error("Ledger entry", err)
}

fn validated_amount(amount: Decimal) -> Result<Decimal, ApiError> {
    validate_positive("amount", amount).map_err(translate_domain_error)
}

/// Entries written by purchases and sales belong to those records.
fn ensure_manual(entry: &LedgerEntryData) -> Result<(), ApiError> {
    if entry.is_system {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("manual_entry"),
            message: format!(
                "{} was recorded by a purchase order or sale and cannot be changed",
                entry.transaction_number()
            ),
        });
    }
    Ok(())
}

/// Lists ledger entries, newest first. Admin or manager.
///
/// # Errors
///
/// Returns an error if unauthorized, a filter is invalid, or the query
/// fails.
pub fn list_ledger_entries(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &ListLedgerQuery,
) -> Result<Vec<LedgerEntryResponse>, ApiError> {
    authorize(actor, Action::ViewLedger)?;

    let filter: LedgerFilter = LedgerFilter {
        transaction_type: parse_filter(query.transaction_type.as_deref())?,
        category: parse_filter(query.category.as_deref())?,
    };

    Ok(persistence
        .list_ledger_entries(&filter)
        .map_err(ledger_error)?
        .into_iter()
        .map(LedgerEntryResponse::from)
        .collect())
}

/// Returns one ledger entry. Admin or manager.
///
/// # Errors
///
/// Returns an error if unauthorized or the entry does not exist.
pub fn get_ledger_entry(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    transaction_id: i64,
) -> Result<LedgerEntryResponse, ApiError> {
    authorize(actor, Action::ViewLedger)?;

    debug!(transaction_id, "Loading ledger entry");
    load_ledger_entry(persistence, transaction_id).map(LedgerEntryResponse::from)
}

/// Records a manual income or expense. Admin only.
///
/// # Errors
///
/// Returns an error if unauthorized or a field is invalid.
pub fn create_ledger_entry(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateLedgerEntryRequest,
) -> Result<LedgerEntryResponse, ApiError> {
    authorize(actor, Action::EditLedger)?;

    let entry: NewLedgerEntry = NewLedgerEntry {
        transaction_type: parse_field::<TransactionType>(&request.transaction_type)?,
        category: parse_field::<TransactionCategory>(&request.category)?,
        amount: validated_amount(request.amount)?,
        description: required_text("description", &request.description, DESCRIPTION_MAX_LEN)?,
    };

    let transaction_id: i64 = persistence
        .create_ledger_entry(&entry, actor.user_id)
        .map_err(ledger_error)?;

    let created: LedgerEntryData = load_ledger_entry(persistence, transaction_id)?;
    info!(
        actor = %actor.username,
        entry = %created.transaction_number(),
        kind = %created.transaction_type,
        amount = %created.amount,
        "Created ledger entry"
    );
    Ok(LedgerEntryResponse::from(created))
}

/// Applies a partial update to a manual entry. Admin only.
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` for entries recorded by orders
/// or sales, or an error if unauthorized, a field is invalid, or the entry
/// does not exist.
pub fn update_ledger_entry(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    transaction_id: i64,
    request: &UpdateLedgerEntryRequest,
) -> Result<LedgerEntryResponse, ApiError> {
    authorize(actor, Action::EditLedger)?;

    let update: LedgerEntryUpdate = LedgerEntryUpdate {
        transaction_type: request
            .transaction_type
            .as_deref()
            .map(parse_field)
            .transpose()?,
        category: request.category.as_deref().map(parse_field).transpose()?,
        amount: request.amount.map(validated_amount).transpose()?,
        description: request
            .description
            .as_deref()
            .map(|description| required_text("description", description, DESCRIPTION_MAX_LEN))
            .transpose()?,
    };

    ensure_manual(&load_ledger_entry(persistence, transaction_id)?)?;

    let updated: LedgerEntryData = persistence
        .update_ledger_entry(transaction_id, &update)
        .map_err(ledger_error)?;

    info!(
        actor = %actor.username,
        entry = %updated.transaction_number(),
        "Updated ledger entry"
    );
    Ok(LedgerEntryResponse::from(updated))
}

/// Deletes a manual entry. Admin only.
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` for entries recorded by orders
/// or sales, or an error if unauthorized or the entry does not exist.
pub fn delete_ledger_entry(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    transaction_id: i64,
) -> Result<MessageResponse, ApiError> {
    authorize(actor, Action::EditLedger)?;

    let entry: LedgerEntryData = load_ledger_entry(persistence, transaction_id)?;
    ensure_manual(&entry)?;

    persistence
        .delete_ledger_entry(transaction_id)
        .map_err(ledger_error)?;

    info!(
        actor = %actor.username,
        entry = %entry.transaction_number(),
        "Deleted ledger entry"
    );
    Ok(MessageResponse::new(format!(
        "{} deleted",
        entry.transaction_number()
    )))
}

/// Totals income and expense across the whole ledger. Admin or manager.
///
/// # Errors
///
/// Returns an error if unauthorized or the query fails.
pub fn ledger_summary(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<LedgerSummary, ApiError> {
    authorize(actor, Action::ViewLedger)?;
    persistence.ledger_summary().map_err(ledger_error)
}
