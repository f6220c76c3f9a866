// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the API crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod auth_tests;
mod authorization_tests;
mod password_tests;

use std::str::FromStr;

use bookstore_persistence::{Persistence, UserData};
use rust_decimal::Decimal;

use crate::handlers::{catalog, users};
use crate::{AuthenticatedActor, BookResponse, CreateBookRequest, CreateUserRequest, RegisterRequest};

pub const PASSWORD: &str = "secret123";

pub fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).expect("valid decimal literal")
}

pub fn register_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        password: PASSWORD.to_string(),
        password_confirmation: PASSWORD.to_string(),
        email: Some(format!("{username}@example.com")),
        first_name: String::from("Test"),
        last_name: String::from("User"),
    }
}

pub fn create_user_request(username: &str, role: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        password: PASSWORD.to_string(),
        password_confirmation: PASSWORD.to_string(),
        email: None,
        first_name: String::from("Test"),
        last_name: String::from("User"),
        role: Some(role.to_string()),
        gender: None,
        phone: None,
        address: None,
        department: None,
        position: None,
        is_active: None,
        is_superuser: None,
    }
}

pub fn actor_for(persistence: &mut Persistence, user_id: i64) -> AuthenticatedActor {
    let user: UserData = persistence.get_user_by_id(user_id).unwrap().unwrap();
    AuthenticatedActor::from_user(&user)
}

/// A fresh database with a bootstrapped administrator.
pub fn setup() -> (Persistence, AuthenticatedActor) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin = users::bootstrap(&mut persistence, register_request("admin")).unwrap();
    let actor: AuthenticatedActor = actor_for(&mut persistence, admin.id);
    (persistence, actor)
}

/// Creates a user with the given role and returns it as an actor.
pub fn add_actor(
    persistence: &mut Persistence,
    admin: &AuthenticatedActor,
    username: &str,
    role: &str,
) -> AuthenticatedActor {
    let user = users::create_user(persistence, admin, create_user_request(username, role)).unwrap();
    actor_for(persistence, user.id)
}

pub fn book_request(isbn: &str, title: &str, stock: i64) -> CreateBookRequest {
    CreateBookRequest {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: String::from("Test Author"),
        publisher: String::from("Test Press"),
        category_id: None,
        price: dec("20.00"),
        stock: Some(stock),
        description: None,
    }
}

pub fn add_book(
    persistence: &mut Persistence,
    admin: &AuthenticatedActor,
    isbn: &str,
    stock: i64,
) -> BookResponse {
    catalog::create_book(persistence, admin, &book_request(isbn, "Test Book", stock)).unwrap()
}
