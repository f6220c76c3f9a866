// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_book, dec};
use crate::{BookSnapshot, CoreError, SaleLine, TransitionResult, apply_sale_batch};
use bookstore_domain::{BookStatus, DomainError};

#[test]
fn test_batch_applies_each_line() {
    let books: Vec<BookSnapshot> = vec![create_test_book(1, 5), create_test_book(2, 1)];
    let lines: Vec<SaleLine> = vec![
        SaleLine {
            book_id: 1,
            quantity: 2,
            unit_price: None,
        },
        SaleLine {
            book_id: 2,
            quantity: 1,
            unit_price: Some(dec("9.50")),
        },
    ];

    let results: Vec<TransitionResult> =
        apply_sale_batch(&books, &lines, Some("Library"), None).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].new_stock, 3);
    assert_eq!(results[1].new_stock, 0);
    assert_eq!(results[1].new_status, BookStatus::OutOfStock);
    let sale = results[1].new_sale.as_ref().unwrap();
    assert_eq!(sale.total_amount, dec("9.50"));
    assert_eq!(sale.customer.as_deref(), Some("Library"));
    assert!(results.iter().all(|r| r.ledger.is_some()));
}

#[test]
fn test_batch_chains_stock_for_repeated_book() {
    let books: Vec<BookSnapshot> = vec![create_test_book(1, 3)];
    let lines: Vec<SaleLine> = vec![
        SaleLine {
            book_id: 1,
            quantity: 2,
            unit_price: None,
        },
        SaleLine {
            book_id: 1,
            quantity: 2,
            unit_price: None,
        },
    ];

    let result: Result<Vec<TransitionResult>, CoreError> =
        apply_sale_batch(&books, &lines, None, None);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InsufficientStock {
            requested: 2,
            available: 1,
            ..
        }))
    ));
}

#[test]
fn test_batch_second_line_sees_first_line_stock() {
    let books: Vec<BookSnapshot> = vec![create_test_book(1, 4)];
    let lines: Vec<SaleLine> = vec![
        SaleLine {
            book_id: 1,
            quantity: 1,
            unit_price: None,
        },
        SaleLine {
            book_id: 1,
            quantity: 3,
            unit_price: None,
        },
    ];

    let results: Vec<TransitionResult> = apply_sale_batch(&books, &lines, None, None).unwrap();
    assert_eq!(results[1].previous_stock, 3);
    assert_eq!(results[1].new_stock, 0);
}

#[test]
fn test_batch_rejects_empty() {
    let result: Result<Vec<TransitionResult>, CoreError> =
        apply_sale_batch(&[], &[], None, None);
    assert_eq!(result.unwrap_err(), CoreError::EmptyBatch);
}

#[test]
fn test_batch_rejects_missing_snapshot() {
    let lines: Vec<SaleLine> = vec![SaleLine {
        book_id: 9,
        quantity: 1,
        unit_price: None,
    }];
    let result: Result<Vec<TransitionResult>, CoreError> =
        apply_sale_batch(&[], &lines, None, None);
    assert_eq!(result.unwrap_err(), CoreError::MissingSnapshot(9));
}
