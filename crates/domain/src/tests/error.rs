// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidRole(String::from("owner"));
    assert_eq!(
        format!("{err}"),
        "Invalid role: 'owner'. Must be one of admin, manager, staff"
    );

    let err: DomainError = DomainError::EmptyField { field: "title" };
    assert_eq!(format!("{err}"), "Field 'title' must not be empty");

    let err: DomainError = DomainError::InsufficientStock {
        book_id: 7,
        requested: 5,
        available: 2,
    };
    assert_eq!(
        format!("{err}"),
        "Insufficient stock for book 7: requested 5, available 2"
    );

    let err: DomainError = DomainError::InvalidStatusTransition {
        entity: "purchase order",
        from: String::from("paid"),
        to: String::from("paid"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid purchase order status transition from 'paid' to 'paid'"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let err: DomainError = DomainError::InvalidEmail(String::from("nope"));
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert_eq!(boxed.to_string(), "Invalid email address: 'nope'");
}
