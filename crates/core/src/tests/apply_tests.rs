// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_book, create_test_order, create_test_sale, dec};
use crate::{
    BookSnapshot, Command, CoreError, LedgerDraft, LedgerReference, SaleDraft, TransitionResult,
    apply,
};
use bookstore_domain::{
    BookStatus, DomainError, PurchaseOrderStatus, SaleStatus, TransactionCategory,
    TransactionType,
};

#[test]
fn test_adjust_stock_adds_and_removes() {
    let book: BookSnapshot = create_test_book(1, 5);

    let result: TransitionResult = apply(&book, Command::AdjustStock { delta: 3 }).unwrap();
    assert_eq!(result.previous_stock, 5);
    assert_eq!(result.new_stock, 8);
    assert_eq!(result.new_status, BookStatus::InStock);
    assert!(result.ledger.is_none());
    assert_eq!(result.action, "AdjustStock");

    let result: TransitionResult = apply(&book, Command::AdjustStock { delta: -5 }).unwrap();
    assert_eq!(result.new_stock, 0);
    assert_eq!(result.new_status, BookStatus::OutOfStock);
}

#[test]
fn test_adjust_stock_rejects_zero() {
    let book: BookSnapshot = create_test_book(1, 5);
    let result: Result<TransitionResult, CoreError> =
        apply(&book, Command::AdjustStock { delta: 0 });
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStockAdjustment { .. }
        ))
    ));
}

#[test]
fn test_adjust_stock_never_goes_negative() {
    let book: BookSnapshot = create_test_book(1, 2);
    let result: Result<TransitionResult, CoreError> =
        apply(&book, Command::AdjustStock { delta: -3 });
    assert!(result.is_err());
}

#[test]
fn test_adjust_stock_keeps_discontinued() {
    let mut book: BookSnapshot = create_test_book(1, 0);
    book.status = BookStatus::Discontinued;
    let result: TransitionResult = apply(&book, Command::AdjustStock { delta: 4 }).unwrap();
    assert_eq!(result.new_stock, 4);
    assert_eq!(result.new_status, BookStatus::Discontinued);
}

#[test]
fn test_change_status_to_discontinued_and_back() {
    let book: BookSnapshot = create_test_book(1, 3);
    let result: TransitionResult = apply(
        &book,
        Command::ChangeStatus {
            status: BookStatus::Discontinued,
        },
    )
    .unwrap();
    assert_eq!(result.new_status, BookStatus::Discontinued);
    assert_eq!(result.new_stock, 3);

    let discontinued: BookSnapshot = result.book_after(&book);
    let result: Result<TransitionResult, CoreError> = apply(
        &discontinued,
        Command::ChangeStatus {
            status: BookStatus::OutOfStock,
        },
    );
    assert!(result.is_err());

    let result: TransitionResult = apply(
        &discontinued,
        Command::ChangeStatus {
            status: BookStatus::InStock,
        },
    )
    .unwrap();
    assert_eq!(result.new_status, BookStatus::InStock);
}

#[test]
fn test_pay_pending_order_writes_expense_without_stock_change() {
    let book: BookSnapshot = create_test_book(1, 0);
    let order = create_test_order(1, 4, PurchaseOrderStatus::Pending);

    let result: TransitionResult = apply(&book, Command::PayPurchaseOrder { order }).unwrap();

    assert_eq!(result.new_stock, 0);
    assert!(!result.touches_book());
    let change = result.purchase_order.unwrap();
    assert_eq!(change.id, 11);
    assert_eq!(change.from, PurchaseOrderStatus::Pending);
    assert_eq!(change.to, PurchaseOrderStatus::Paid);

    let ledger: LedgerDraft = result.ledger.unwrap();
    assert_eq!(ledger.transaction_type, TransactionType::Expense);
    assert_eq!(ledger.category, TransactionCategory::Purchase);
    assert_eq!(ledger.amount, dec("50.00"));
    assert_eq!(ledger.reference, LedgerReference::PurchaseOrder(11));
}

#[test]
fn test_pay_non_pending_order_fails() {
    let book: BookSnapshot = create_test_book(1, 0);
    for status in [
        PurchaseOrderStatus::Paid,
        PurchaseOrderStatus::Shelved,
        PurchaseOrderStatus::Returned,
    ] {
        let order = create_test_order(1, 4, status);
        let result: Result<TransitionResult, CoreError> =
            apply(&book, Command::PayPurchaseOrder { order });
        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(
                DomainError::InvalidStatusTransition { .. }
            ))
        ));
    }
}

#[test]
fn test_shelve_paid_order_raises_stock_and_flips_status() {
    let book: BookSnapshot = create_test_book(1, 0);
    assert_eq!(book.status, BookStatus::OutOfStock);
    let order = create_test_order(1, 6, PurchaseOrderStatus::Paid);

    let result: TransitionResult = apply(&book, Command::ShelvePurchaseOrder { order }).unwrap();

    assert_eq!(result.new_stock, 6);
    assert_eq!(result.new_status, BookStatus::InStock);
    assert!(result.ledger.is_none());
    assert_eq!(
        result.purchase_order.unwrap().to,
        PurchaseOrderStatus::Shelved
    );
}

#[test]
fn test_shelve_pending_order_fails() {
    let book: BookSnapshot = create_test_book(1, 0);
    let order = create_test_order(1, 6, PurchaseOrderStatus::Pending);
    assert!(apply(&book, Command::ShelvePurchaseOrder { order }).is_err());
}

#[test]
fn test_return_pending_order_has_no_effects() {
    let book: BookSnapshot = create_test_book(1, 2);
    let order = create_test_order(1, 6, PurchaseOrderStatus::Pending);

    let result: TransitionResult = apply(&book, Command::ReturnPurchaseOrder { order }).unwrap();

    assert_eq!(result.new_stock, 2);
    assert!(result.ledger.is_none());
    assert_eq!(
        result.purchase_order.unwrap().to,
        PurchaseOrderStatus::Returned
    );
}

#[test]
fn test_order_for_other_book_is_rejected() {
    let book: BookSnapshot = create_test_book(1, 2);
    let order = create_test_order(2, 6, PurchaseOrderStatus::Pending);
    let result: Result<TransitionResult, CoreError> =
        apply(&book, Command::PayPurchaseOrder { order });
    assert_eq!(
        result.unwrap_err(),
        CoreError::BookMismatch {
            expected: 1,
            actual: 2
        }
    );
}

#[test]
fn test_record_sale_decrements_stock_and_writes_income() {
    let book: BookSnapshot = create_test_book(1, 3);

    let result: TransitionResult = apply(
        &book,
        Command::RecordSale {
            quantity: 3,
            unit_price: None,
            customer: Some(String::from("Walk-in")),
            notes: None,
        },
    )
    .unwrap();

    assert_eq!(result.new_stock, 0);
    assert_eq!(result.new_status, BookStatus::OutOfStock);

    let sale: SaleDraft = result.new_sale.unwrap();
    assert_eq!(sale.unit_price, dec("25.00"));
    assert_eq!(sale.total_amount, dec("75.00"));
    assert_eq!(sale.customer.as_deref(), Some("Walk-in"));

    let ledger: LedgerDraft = result.ledger.unwrap();
    assert_eq!(ledger.transaction_type, TransactionType::Income);
    assert_eq!(ledger.category, TransactionCategory::Sale);
    assert_eq!(ledger.amount, dec("75.00"));
    assert_eq!(ledger.reference, LedgerReference::NewSale);
}

#[test]
fn test_record_sale_uses_explicit_unit_price() {
    let book: BookSnapshot = create_test_book(1, 3);
    let result: TransitionResult = apply(
        &book,
        Command::RecordSale {
            quantity: 2,
            unit_price: Some(dec("19.99")),
            customer: None,
            notes: None,
        },
    )
    .unwrap();
    assert_eq!(result.new_sale.unwrap().total_amount, dec("39.98"));
}

#[test]
fn test_record_sale_more_than_stock_fails() {
    let book: BookSnapshot = create_test_book(1, 2);
    let result: Result<TransitionResult, CoreError> = apply(
        &book,
        Command::RecordSale {
            quantity: 3,
            unit_price: None,
            customer: None,
            notes: None,
        },
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InsufficientStock {
            book_id: 1,
            requested: 3,
            available: 2,
        }))
    ));
}

#[test]
fn test_record_sale_of_unavailable_book_fails() {
    let mut book: BookSnapshot = create_test_book(1, 5);
    book.status = BookStatus::Discontinued;
    let result: Result<TransitionResult, CoreError> = apply(
        &book,
        Command::RecordSale {
            quantity: 1,
            unit_price: None,
            customer: None,
            notes: None,
        },
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::BookNotAvailable { .. }
        ))
    ));
}

#[test]
fn test_record_sale_rejects_non_positive_quantity() {
    let book: BookSnapshot = create_test_book(1, 5);
    for quantity in [0, -2] {
        let result: Result<TransitionResult, CoreError> = apply(
            &book,
            Command::RecordSale {
                quantity,
                unit_price: None,
                customer: None,
                notes: None,
            },
        );
        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(
                DomainError::InvalidQuantity { .. }
            ))
        ));
    }
}

#[test]
fn test_record_sale_of_free_book_needs_price() {
    let mut book: BookSnapshot = create_test_book(1, 5);
    book.price = dec("0");
    let result: Result<TransitionResult, CoreError> = apply(
        &book,
        Command::RecordSale {
            quantity: 1,
            unit_price: None,
            customer: None,
            notes: None,
        },
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidAmount { .. }))
    ));
}

#[test]
fn test_return_sale_restores_stock_and_writes_refund() {
    let book: BookSnapshot = create_test_book(1, 0);
    let sale = create_test_sale(1, 2, SaleStatus::Completed);

    let result: TransitionResult = apply(&book, Command::ReturnSale { sale }).unwrap();

    assert_eq!(result.new_stock, 2);
    assert_eq!(result.new_status, BookStatus::InStock);
    assert_eq!(result.sale.unwrap().to, SaleStatus::Returned);
    let ledger: LedgerDraft = result.ledger.unwrap();
    assert_eq!(ledger.transaction_type, TransactionType::Expense);
    assert_eq!(ledger.category, TransactionCategory::Refund);
    assert_eq!(ledger.amount, dec("50.00"));
    assert_eq!(ledger.reference, LedgerReference::Sale(21));
}

#[test]
fn test_return_sale_twice_fails() {
    let book: BookSnapshot = create_test_book(1, 0);
    let sale = create_test_sale(1, 2, SaleStatus::Returned);
    assert!(apply(&book, Command::ReturnSale { sale }).is_err());
}
