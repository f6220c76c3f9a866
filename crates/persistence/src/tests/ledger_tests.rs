// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Manual ledger entry and summary tests.

use bookstore_domain::{LedgerSummary, TransactionCategory, TransactionType};

use super::{dec, new_book, setup};
use crate::{
    InventoryRequest, LedgerEntryData, LedgerEntryUpdate, LedgerFilter, NewLedgerEntry,
    PersistedTransition, PersistenceError,
};

fn rent(amount: &str) -> NewLedgerEntry {
    NewLedgerEntry {
        transaction_type: TransactionType::Expense,
        category: TransactionCategory::Rent,
        amount: dec(amount),
        description: String::from("Monthly rent"),
    }
}

#[test]
fn test_manual_entry_round_trip() {
    let (mut persistence, admin_id) = setup();

    let entry_id: i64 = persistence.create_ledger_entry(&rent("1200.00"), admin_id).unwrap();
    let entry: LedgerEntryData = persistence.get_ledger_entry(entry_id).unwrap().unwrap();

    assert!(!entry.is_system);
    assert_eq!(entry.amount, dec("1200.00"));
    assert_eq!(entry.created_by_username, "admin");
    assert_eq!(entry.transaction_number(), format!("FT-{entry_id:06}"));
    assert_eq!(entry.purchase_order_id, None);
    assert_eq!(entry.sale_id, None);
}

#[test]
fn test_update_manual_entry() {
    let (mut persistence, admin_id) = setup();
    let entry_id: i64 = persistence.create_ledger_entry(&rent("1200.00"), admin_id).unwrap();

    let updated: LedgerEntryData = persistence
        .update_ledger_entry(
            entry_id,
            &LedgerEntryUpdate {
                amount: Some(dec("1250.00")),
                category: Some(TransactionCategory::Utility),
                ..LedgerEntryUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.amount, dec("1250.00"));
    assert_eq!(updated.category, TransactionCategory::Utility);
    assert_eq!(updated.transaction_type, TransactionType::Expense);
    assert_eq!(updated.description, "Monthly rent");
}

#[test]
fn test_system_entries_are_immutable() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 2)).unwrap();
    let (_, persisted): (_, PersistedTransition) = persistence
        .apply_inventory_transition(
            InventoryRequest::RecordSale {
                book_id,
                quantity: 1,
                unit_price: None,
                customer: None,
                notes: None,
            },
            admin_id,
        )
        .unwrap();
    let entry_id: i64 = persisted.ledger_entry_id.unwrap();

    let update: Result<LedgerEntryData, PersistenceError> = persistence.update_ledger_entry(
        entry_id,
        &LedgerEntryUpdate {
            amount: Some(dec("1.00")),
            ..LedgerEntryUpdate::default()
        },
    );
    let delete: Result<(), PersistenceError> = persistence.delete_ledger_entry(entry_id);

    assert!(matches!(update, Err(PersistenceError::ConcurrentModification(_))));
    assert!(matches!(delete, Err(PersistenceError::ConcurrentModification(_))));
    assert_eq!(
        persistence.get_ledger_entry(entry_id).unwrap().unwrap().amount,
        dec("25.00")
    );
}

#[test]
fn test_delete_manual_entry() {
    let (mut persistence, admin_id) = setup();
    let entry_id: i64 = persistence.create_ledger_entry(&rent("100.00"), admin_id).unwrap();

    persistence.delete_ledger_entry(entry_id).unwrap();

    assert!(persistence.get_ledger_entry(entry_id).unwrap().is_none());
}

#[test]
fn test_list_filters_by_type() {
    let (mut persistence, admin_id) = setup();
    persistence.create_ledger_entry(&rent("100.00"), admin_id).unwrap();
    persistence
        .create_ledger_entry(
            &NewLedgerEntry {
                transaction_type: TransactionType::Income,
                category: TransactionCategory::Other,
                amount: dec("5.00"),
                description: String::from("Found money"),
            },
            admin_id,
        )
        .unwrap();

    let income: Vec<LedgerEntryData> = persistence
        .list_ledger_entries(&LedgerFilter {
            transaction_type: Some(TransactionType::Income),
            ..LedgerFilter::default()
        })
        .unwrap();

    assert_eq!(income.len(), 1);
    assert_eq!(income[0].category, TransactionCategory::Other);
}

#[test]
fn test_summary_is_income_minus_expense() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 4)).unwrap();
    persistence
        .apply_inventory_transition(
            InventoryRequest::RecordSale {
                book_id,
                quantity: 4,
                unit_price: None,
                customer: None,
                notes: None,
            },
            admin_id,
        )
        .unwrap();
    persistence.create_ledger_entry(&rent("30.50"), admin_id).unwrap();

    let summary: LedgerSummary = persistence.ledger_summary().unwrap();

    assert_eq!(summary.total_income, dec("100.00"));
    assert_eq!(summary.total_expense, dec("30.50"));
    assert_eq!(summary.net_balance, dec("69.50"));
    assert_eq!(summary.transaction_count, 2);
}

#[test]
fn test_empty_summary_is_zero() {
    let (mut persistence, _) = setup();

    let summary: LedgerSummary = persistence.ledger_summary().unwrap();

    assert_eq!(summary, LedgerSummary::default());
}
