// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inventory transition tests: stock, status and ledger move together.

use bookstore::{CoreError, SaleLine, TransitionResult};
use bookstore_domain::{
    BookStatus, DomainError, PurchaseOrderStatus, SaleStatus, TransactionCategory,
    TransactionType,
};

use super::{dec, new_book, new_order, setup};
use crate::{
    BookData, InventoryError, InventoryRequest, LedgerEntryData, LedgerFilter,
    PersistedTransition, Persistence, PersistenceError, SaleData, SaleFilter,
};

fn stock_of(persistence: &mut Persistence, book_id: i64) -> (i64, BookStatus) {
    let book: BookData = persistence.get_book(book_id).unwrap().unwrap();
    (book.stock, book.status)
}

fn ledger(persistence: &mut Persistence) -> Vec<LedgerEntryData> {
    persistence
        .list_ledger_entries(&LedgerFilter::default())
        .unwrap()
}

#[test]
fn test_adjust_stock_updates_book_without_ledger() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 0)).unwrap();

    let (result, persisted): (TransitionResult, PersistedTransition) = persistence
        .apply_inventory_transition(InventoryRequest::AdjustStock { book_id, delta: 7 }, admin_id)
        .unwrap();

    assert_eq!(result.new_stock, 7);
    assert_eq!(persisted, PersistedTransition::default());
    assert_eq!(stock_of(&mut persistence, book_id), (7, BookStatus::InStock));
    assert!(ledger(&mut persistence).is_empty());
}

#[test]
fn test_adjust_stock_below_zero_is_rejected() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 2)).unwrap();

    let result: Result<(TransitionResult, PersistedTransition), InventoryError> = persistence
        .apply_inventory_transition(InventoryRequest::AdjustStock { book_id, delta: -3 }, admin_id);

    assert!(matches!(
        result,
        Err(InventoryError::Rejected(CoreError::DomainViolation(
            DomainError::InvalidStockAdjustment { .. }
        )))
    ));
    assert_eq!(stock_of(&mut persistence, book_id), (2, BookStatus::InStock));
}

#[test]
fn test_change_status_to_discontinued() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 2)).unwrap();

    persistence
        .apply_inventory_transition(
            InventoryRequest::ChangeStatus {
                book_id,
                status: BookStatus::Discontinued,
            },
            admin_id,
        )
        .unwrap();

    assert_eq!(
        stock_of(&mut persistence, book_id),
        (2, BookStatus::Discontinued)
    );
}

#[test]
fn test_pay_writes_exactly_one_expense() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 0)).unwrap();
    let order_id: i64 = persistence
        .create_purchase_order(&new_order(book_id, 4), admin_id)
        .unwrap();

    let (_, persisted): (TransitionResult, PersistedTransition) = persistence
        .apply_inventory_transition(
            InventoryRequest::PayPurchaseOrder {
                purchase_order_id: order_id,
            },
            admin_id,
        )
        .unwrap();

    let entries: Vec<LedgerEntryData> = ledger(&mut persistence);
    assert_eq!(entries.len(), 1);
    assert_eq!(Some(entries[0].transaction_id), persisted.ledger_entry_id);
    assert_eq!(entries[0].transaction_type, TransactionType::Expense);
    assert_eq!(entries[0].category, TransactionCategory::Purchase);
    assert_eq!(entries[0].amount, dec("50.00"));
    assert_eq!(entries[0].purchase_order_id, Some(order_id));
    assert!(entries[0].is_system);
    assert_eq!(
        persistence.get_purchase_order(order_id).unwrap().unwrap().status,
        PurchaseOrderStatus::Paid
    );
    assert_eq!(stock_of(&mut persistence, book_id), (0, BookStatus::OutOfStock));
}

#[test]
fn test_paying_twice_is_rejected_and_writes_nothing_more() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 0)).unwrap();
    let order_id: i64 = persistence
        .create_purchase_order(&new_order(book_id, 4), admin_id)
        .unwrap();
    let request: InventoryRequest = InventoryRequest::PayPurchaseOrder {
        purchase_order_id: order_id,
    };
    persistence
        .apply_inventory_transition(request.clone(), admin_id)
        .unwrap();

    let second: Result<(TransitionResult, PersistedTransition), InventoryError> =
        persistence.apply_inventory_transition(request, admin_id);

    assert!(matches!(
        second,
        Err(InventoryError::Rejected(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        )))
    ));
    assert_eq!(ledger(&mut persistence).len(), 1);
}

#[test]
fn test_shelve_raises_stock_and_flips_status() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 0)).unwrap();
    let order_id: i64 = persistence
        .create_purchase_order(&new_order(book_id, 4), admin_id)
        .unwrap();
    persistence
        .apply_inventory_transition(
            InventoryRequest::PayPurchaseOrder {
                purchase_order_id: order_id,
            },
            admin_id,
        )
        .unwrap();

    persistence
        .apply_inventory_transition(
            InventoryRequest::ShelvePurchaseOrder {
                purchase_order_id: order_id,
            },
            admin_id,
        )
        .unwrap();

    assert_eq!(stock_of(&mut persistence, book_id), (4, BookStatus::InStock));
    assert_eq!(
        persistence.get_purchase_order(order_id).unwrap().unwrap().status,
        PurchaseOrderStatus::Shelved
    );
    assert_eq!(ledger(&mut persistence).len(), 1, "shelving adds no ledger entry");
}

#[test]
fn test_shelving_unpaid_order_is_rejected() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 0)).unwrap();
    let order_id: i64 = persistence
        .create_purchase_order(&new_order(book_id, 4), admin_id)
        .unwrap();

    let result: Result<(TransitionResult, PersistedTransition), InventoryError> = persistence
        .apply_inventory_transition(
            InventoryRequest::ShelvePurchaseOrder {
                purchase_order_id: order_id,
            },
            admin_id,
        );

    assert!(matches!(result, Err(InventoryError::Rejected(_))));
    assert_eq!(stock_of(&mut persistence, book_id), (0, BookStatus::OutOfStock));
}

#[test]
fn test_unknown_order_is_not_found() {
    let (mut persistence, admin_id) = setup();

    let result: Result<(TransitionResult, PersistedTransition), InventoryError> = persistence
        .apply_inventory_transition(
            InventoryRequest::PayPurchaseOrder {
                purchase_order_id: 404,
            },
            admin_id,
        );

    assert!(matches!(
        result,
        Err(InventoryError::Persistence(PersistenceError::NotFound(_)))
    ));
}

#[test]
fn test_sale_records_sale_stock_and_income_together() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 3)).unwrap();

    let (_, persisted): (TransitionResult, PersistedTransition) = persistence
        .apply_inventory_transition(
            InventoryRequest::RecordSale {
                book_id,
                quantity: 3,
                unit_price: None,
                customer: None,
                notes: None,
            },
            admin_id,
        )
        .unwrap();

    let sale_id: i64 = persisted.sale_id.unwrap();
    let sale: SaleData = persistence.get_sale(sale_id).unwrap().unwrap();
    assert_eq!(sale.status, SaleStatus::Completed);
    assert_eq!(sale.unit_price, dec("25.00"));
    assert_eq!(sale.total_amount, dec("75.00"));
    assert_eq!(stock_of(&mut persistence, book_id), (0, BookStatus::OutOfStock));

    let entries: Vec<LedgerEntryData> = ledger(&mut persistence);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].transaction_type, TransactionType::Income);
    assert_eq!(entries[0].category, TransactionCategory::Sale);
    assert_eq!(entries[0].sale_id, Some(sale_id));
    assert_eq!(entries[0].amount, dec("75.00"));
}

#[test]
fn test_overselling_leaves_stock_and_ledger_unchanged() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 2)).unwrap();

    let result: Result<(TransitionResult, PersistedTransition), InventoryError> = persistence
        .apply_inventory_transition(
            InventoryRequest::RecordSale {
                book_id,
                quantity: 3,
                unit_price: None,
                customer: None,
                notes: None,
            },
            admin_id,
        );

    assert!(matches!(
        result,
        Err(InventoryError::Rejected(CoreError::DomainViolation(
            DomainError::InsufficientStock { .. }
        )))
    ));
    assert_eq!(stock_of(&mut persistence, book_id), (2, BookStatus::InStock));
    assert!(ledger(&mut persistence).is_empty());
    assert!(persistence.list_sales(&SaleFilter::default()).unwrap().is_empty());
}

#[test]
fn test_second_sale_of_last_copy_is_rejected() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 1)).unwrap();
    let request: InventoryRequest = InventoryRequest::RecordSale {
        book_id,
        quantity: 1,
        unit_price: None,
        customer: None,
        notes: None,
    };

    persistence
        .apply_inventory_transition(request.clone(), admin_id)
        .unwrap();
    let second: Result<(TransitionResult, PersistedTransition), InventoryError> =
        persistence.apply_inventory_transition(request, admin_id);

    assert!(matches!(second, Err(InventoryError::Rejected(_))));
    assert_eq!(persistence.list_sales(&SaleFilter::default()).unwrap().len(), 1);
}

#[test]
fn test_return_sale_restores_stock_and_writes_refund() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 2)).unwrap();
    let (_, sold): (TransitionResult, PersistedTransition) = persistence
        .apply_inventory_transition(
            InventoryRequest::RecordSale {
                book_id,
                quantity: 2,
                unit_price: Some(dec("20.00")),
                customer: None,
                notes: None,
            },
            admin_id,
        )
        .unwrap();
    let sale_id: i64 = sold.sale_id.unwrap();

    persistence
        .apply_inventory_transition(InventoryRequest::ReturnSale { sale_id }, admin_id)
        .unwrap();

    assert_eq!(stock_of(&mut persistence, book_id), (2, BookStatus::InStock));
    assert_eq!(
        persistence.get_sale(sale_id).unwrap().unwrap().status,
        SaleStatus::Returned
    );
    let refunds: Vec<LedgerEntryData> = persistence
        .list_ledger_entries(&LedgerFilter {
            category: Some(TransactionCategory::Refund),
            ..LedgerFilter::default()
        })
        .unwrap();
    assert_eq!(refunds.len(), 1);
    assert_eq!(refunds[0].transaction_type, TransactionType::Expense);
    assert_eq!(refunds[0].amount, dec("40.00"));
    assert_eq!(refunds[0].sale_id, Some(sale_id));
}

#[test]
fn test_batch_sale_writes_every_line() {
    let (mut persistence, admin_id) = setup();
    let first: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 5)).unwrap();
    let second: i64 = persistence.create_book(&new_book("0306406152", "Emma", 1)).unwrap();

    let written: Vec<(TransitionResult, PersistedTransition)> = persistence
        .create_sale_batch(
            &[
                SaleLine {
                    book_id: first,
                    quantity: 2,
                    unit_price: None,
                },
                SaleLine {
                    book_id: second,
                    quantity: 1,
                    unit_price: Some(dec("9.99")),
                },
            ],
            Some("Walk-in"),
            None,
            admin_id,
        )
        .unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(stock_of(&mut persistence, first), (3, BookStatus::InStock));
    assert_eq!(stock_of(&mut persistence, second), (0, BookStatus::OutOfStock));
    assert_eq!(ledger(&mut persistence).len(), 2);
    let sales: Vec<SaleData> = persistence.list_sales(&SaleFilter::default()).unwrap();
    assert!(sales.iter().all(|sale| sale.customer.as_deref() == Some("Walk-in")));
}

#[test]
fn test_batch_with_one_invalid_line_writes_nothing() {
    let (mut persistence, admin_id) = setup();
    let first: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 5)).unwrap();
    let second: i64 = persistence.create_book(&new_book("0306406152", "Emma", 1)).unwrap();

    let result: Result<Vec<(TransitionResult, PersistedTransition)>, InventoryError> = persistence
        .create_sale_batch(
            &[
                SaleLine {
                    book_id: first,
                    quantity: 2,
                    unit_price: None,
                },
                SaleLine {
                    book_id: second,
                    quantity: 2,
                    unit_price: None,
                },
            ],
            None,
            None,
            admin_id,
        );

    assert!(matches!(result, Err(InventoryError::Rejected(_))));
    assert_eq!(stock_of(&mut persistence, first), (5, BookStatus::InStock));
    assert_eq!(stock_of(&mut persistence, second), (1, BookStatus::InStock));
    assert!(ledger(&mut persistence).is_empty());
    assert!(persistence.list_sales(&SaleFilter::default()).unwrap().is_empty());
}

#[test]
fn test_batch_lines_for_same_book_share_stock() {
    let (mut persistence, admin_id) = setup();
    let book_id: i64 = persistence.create_book(&new_book("9780306406157", "Dune", 3)).unwrap();
    let line: SaleLine = SaleLine {
        book_id,
        quantity: 2,
        unit_price: None,
    };

    let result: Result<Vec<(TransitionResult, PersistedTransition)>, InventoryError> =
        persistence.create_sale_batch(&[line.clone(), line], None, None, admin_id);

    assert!(matches!(result, Err(InventoryError::Rejected(_))));
    assert_eq!(stock_of(&mut persistence, book_id), (3, BookStatus::InStock));
}

#[test]
fn test_batch_with_unknown_book_is_not_found() {
    let (mut persistence, admin_id) = setup();

    let result: Result<Vec<(TransitionResult, PersistedTransition)>, InventoryError> = persistence
        .create_sale_batch(
            &[SaleLine {
                book_id: 404,
                quantity: 1,
                unit_price: None,
            }],
            None,
            None,
            admin_id,
        );

    assert!(matches!(
        result,
        Err(InventoryError::Persistence(PersistenceError::NotFound(_)))
    ));
}
