// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BookStatus, DomainError, PurchaseOrderStatus, SaleStatus, TransactionCategory,
    TransactionType,
};
use std::str::FromStr;

#[test]
fn test_book_status_derive_follows_stock() {
    assert_eq!(BookStatus::derive(BookStatus::OutOfStock, 3), BookStatus::InStock);
    assert_eq!(BookStatus::derive(BookStatus::InStock, 0), BookStatus::OutOfStock);
    assert_eq!(BookStatus::derive(BookStatus::InStock, 1), BookStatus::InStock);
}

#[test]
fn test_book_status_discontinued_is_sticky() {
    assert_eq!(
        BookStatus::derive(BookStatus::Discontinued, 10),
        BookStatus::Discontinued
    );
    assert_eq!(
        BookStatus::derive(BookStatus::Discontinued, 0),
        BookStatus::Discontinued
    );
}

#[test]
fn test_book_status_change_must_match_stock() {
    assert!(BookStatus::validate_change(BookStatus::Discontinued, 4).is_ok());
    assert!(BookStatus::validate_change(BookStatus::InStock, 4).is_ok());
    assert!(BookStatus::validate_change(BookStatus::OutOfStock, 0).is_ok());

    let result: Result<(), DomainError> = BookStatus::validate_change(BookStatus::InStock, 0);
    assert!(matches!(result, Err(DomainError::StatusStockMismatch { .. })));
    assert!(BookStatus::validate_change(BookStatus::OutOfStock, 2).is_err());
}

#[test]
fn test_book_status_sellable() {
    assert!(BookStatus::InStock.is_sellable());
    assert!(!BookStatus::OutOfStock.is_sellable());
    assert!(!BookStatus::Discontinued.is_sellable());
}

#[test]
fn test_purchase_order_transitions() {
    let pending: PurchaseOrderStatus = PurchaseOrderStatus::Pending;
    assert!(pending.validate_transition(PurchaseOrderStatus::Paid).is_ok());
    assert!(pending.validate_transition(PurchaseOrderStatus::Returned).is_ok());
    assert!(pending.validate_transition(PurchaseOrderStatus::Shelved).is_err());

    let paid: PurchaseOrderStatus = PurchaseOrderStatus::Paid;
    assert!(paid.validate_transition(PurchaseOrderStatus::Shelved).is_ok());
    assert!(paid.validate_transition(PurchaseOrderStatus::Paid).is_err());
    assert!(paid.validate_transition(PurchaseOrderStatus::Returned).is_err());

    for terminal in [PurchaseOrderStatus::Shelved, PurchaseOrderStatus::Returned] {
        for target in [
            PurchaseOrderStatus::Pending,
            PurchaseOrderStatus::Paid,
            PurchaseOrderStatus::Returned,
            PurchaseOrderStatus::Shelved,
        ] {
            assert!(!terminal.can_transition_to(target));
        }
    }
}

#[test]
fn test_purchase_order_edit_and_delete_rules() {
    assert!(PurchaseOrderStatus::Pending.is_editable());
    assert!(!PurchaseOrderStatus::Paid.is_editable());
    assert!(PurchaseOrderStatus::Returned.is_deletable());
    assert!(!PurchaseOrderStatus::Shelved.is_deletable());
}

#[test]
fn test_sale_transitions() {
    assert!(
        SaleStatus::Completed
            .validate_transition(SaleStatus::Returned)
            .is_ok()
    );
    let err: DomainError = SaleStatus::Returned
        .validate_transition(SaleStatus::Returned)
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidStatusTransition { entity: "sale", .. }
    ));
}

#[test]
fn test_status_strings_parse() {
    assert_eq!(
        PurchaseOrderStatus::from_str("shelved").unwrap(),
        PurchaseOrderStatus::Shelved
    );
    assert_eq!(SaleStatus::from_str("completed").unwrap(), SaleStatus::Completed);
    assert_eq!(
        BookStatus::from_str("out_of_stock").unwrap(),
        BookStatus::OutOfStock
    );
    assert!(PurchaseOrderStatus::from_str("cancelled").is_err());
}

#[test]
fn test_ledger_enums_parse() {
    assert_eq!(TransactionType::from_str("income").unwrap(), TransactionType::Income);
    assert!(TransactionType::from_str("transfer").is_err());
    for category in TransactionCategory::ALL {
        assert_eq!(
            TransactionCategory::from_str(category.as_str()).unwrap(),
            category
        );
    }
    assert!(matches!(
        TransactionCategory::from_str("tax"),
        Err(DomainError::InvalidTransactionCategory(_))
    ));
}
