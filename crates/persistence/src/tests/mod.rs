// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod inventory_tests;
mod ledger_tests;
mod user_tests;

use std::str::FromStr;

use bookstore_domain::Role;
use rust_decimal::Decimal;

use crate::{NewBook, NewPurchaseOrder, NewUser, Persistence};

pub fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).expect("valid decimal literal")
}

pub fn new_user(username: &str, role: Role) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: String::from("password123"),
        email: Some(format!("{username}@example.com")),
        first_name: String::from("Test"),
        last_name: String::from("User"),
        role,
        gender: None,
        phone: None,
        address: None,
        department: None,
        position: None,
        is_active: true,
        is_superuser: false,
    }
}

pub fn new_book(isbn: &str, title: &str, stock: i64) -> NewBook {
    NewBook {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: String::from("Test Author"),
        publisher: String::from("Test Press"),
        category_id: None,
        price: dec("25.00"),
        stock,
        description: None,
    }
}

pub fn new_order(book_id: i64, quantity: i64) -> NewPurchaseOrder {
    NewPurchaseOrder {
        book_id,
        quantity,
        unit_price: dec("12.50"),
        total_amount: dec("12.50") * Decimal::from(quantity),
        supplier: String::from("Acme Books"),
        notes: None,
    }
}

/// A fresh database with one admin user.
///
/// Returns the persistence adapter and the admin's user ID.
pub fn setup() -> (Persistence, i64) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin_id: i64 = persistence
        .create_user(&new_user("admin", Role::Admin))
        .unwrap();
    (persistence, admin_id)
}
