// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the bookstore backend.
//!
//! This crate stores users, sessions, the catalog, purchase orders, sales
//! and the financial ledger in `SQLite` through Diesel. Migrations are
//! embedded and run when a connection is opened.
//!
//! ## Inventory Writes
//!
//! Book stock and status are only changed through
//! [`Persistence::apply_inventory_transition`] and
//! [`Persistence::create_sale_batch`]. Both compute the transition with the
//! `bookstore` core crate from rows read inside an immediate transaction,
//! and write the stock change together with its sale and ledger rows.
//!
//! ## Amounts
//!
//! Decimal amounts are stored as text with two places and decoded into
//! `rust_decimal::Decimal` on read.
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller its own shared-cache
//! in-memory database, so tests never observe each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use bookstore::{SaleLine, TransitionResult};
use bookstore_domain::LedgerSummary;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod connection;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    BookData, BookFilter, BookUpdate, CategoryData, InventoryRequest, LedgerEntryData,
    LedgerEntryUpdate, LedgerFilter, NewBook, NewLedgerEntry, NewPurchaseOrder, NewUser,
    PersistedTransition, PurchaseOrderData, PurchaseOrderFilter, PurchaseOrderUpdate, SaleData,
    SaleFilter, SessionData, UserData, UserFilter, UserUpdate,
};
pub use error::{InventoryError, PersistenceError};

use connection::Location;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let conn: SqliteConnection = connection::open(Location::Memory(db_id))?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = connection::open(Location::File(path_str))?;
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        connection::ensure_foreign_keys(&mut self.conn)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a user and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is taken or the insert fails.
    pub fn create_user(&mut self, user: &NewUser) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, user)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Retrieves a user by username, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_username(&mut self.conn, username)
    }

    /// Lists users matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_users(&mut self, filter: &UserFilter) -> Result<Vec<UserData>, PersistenceError> {
        queries::users::list_users(&mut self.conn, filter)
    }

    /// Applies a partial update to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the update fails.
    pub fn update_user(
        &mut self,
        user_id: i64,
        update: &UserUpdate,
    ) -> Result<UserData, PersistenceError> {
        mutations::users::update_user(&mut self.conn, user_id, update)
    }

    /// Activates or deactivates a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the update fails.
    pub fn set_user_active(&mut self, user_id: i64, is_active: bool) -> Result<(), PersistenceError> {
        mutations::users::set_user_active(&mut self.conn, user_id, is_active)
    }

    /// Replaces a user's password.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the user does not exist.
    pub fn update_password(
        &mut self,
        user_id: i64,
        new_password: &str,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_password(&mut self.conn, user_id, new_password)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash is malformed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::update_last_login(&mut self.conn, user_id)
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKeyViolation` if the user created
    /// orders, sales or ledger entries.
    pub fn delete_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::delete_user(&mut self.conn, user_id)
    }

    /// Counts all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    /// Counts active admins.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_active_admins(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_active_admins(&mut self.conn)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a session and returns its ID.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The unique session token
    /// * `user_id` - The session's user
    /// * `expires_at` - Expiry as `YYYY-MM-DD HH:MM:SS` UTC
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::users::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::users::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::users::delete_session(&mut self.conn, session_token)
    }

    /// Deletes every session of a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_sessions_for_user(&mut self, user_id: i64) -> Result<usize, PersistenceError> {
        mutations::users::delete_sessions_for_user(&mut self.conn, user_id)
    }

    /// Deletes all expired sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::users::delete_expired_sessions(&mut self.conn)
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Creates a category and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the insert fails.
    pub fn create_category(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::catalog::create_category(&mut self.conn, name, description)
    }

    /// Retrieves a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_category(
        &mut self,
        category_id: i64,
    ) -> Result<Option<CategoryData>, PersistenceError> {
        queries::catalog::get_category(&mut self.conn, category_id)
    }

    /// Lists all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_categories(&mut self) -> Result<Vec<CategoryData>, PersistenceError> {
        queries::catalog::list_categories(&mut self.conn)
    }

    /// Replaces a category's name and description.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist or the name is taken.
    pub fn update_category(
        &mut self,
        category_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::catalog::update_category(&mut self.conn, category_id, name, description)
    }

    /// Deletes a category, leaving its books uncategorized.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist.
    pub fn delete_category(&mut self, category_id: i64) -> Result<(), PersistenceError> {
        mutations::catalog::delete_category(&mut self.conn, category_id)
    }

    /// Creates a book and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the ISBN is taken, the category is missing or
    /// the insert fails.
    pub fn create_book(&mut self, book: &NewBook) -> Result<i64, PersistenceError> {
        mutations::catalog::create_book(&mut self.conn, book)
    }

    /// Retrieves a book.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_book(&mut self, book_id: i64) -> Result<Option<BookData>, PersistenceError> {
        queries::catalog::get_book(&mut self.conn, book_id)
    }

    /// Lists books matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_books(&mut self, filter: &BookFilter) -> Result<Vec<BookData>, PersistenceError> {
        queries::catalog::list_books(&mut self.conn, filter)
    }

    /// Applies a partial update to a book's catalog fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the book does not exist or a constraint rejects
    /// the update.
    pub fn update_book(
        &mut self,
        book_id: i64,
        update: &BookUpdate,
    ) -> Result<BookData, PersistenceError> {
        mutations::catalog::update_book(&mut self.conn, book_id, update)
    }

    /// Deletes a book.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKeyViolation` if orders or sales
    /// reference the book.
    pub fn delete_book(&mut self, book_id: i64) -> Result<(), PersistenceError> {
        mutations::catalog::delete_book(&mut self.conn, book_id)
    }

    // ========================================================================
    // Purchase Orders & Sales
    // ========================================================================

    /// Creates a pending purchase order and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the book or creator does not exist.
    pub fn create_purchase_order(
        &mut self,
        order: &NewPurchaseOrder,
        created_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::orders::create_purchase_order(&mut self.conn, order, created_by)
    }

    /// Creates a book and a pending purchase order for it atomically.
    ///
    /// # Returns
    ///
    /// The new book ID and purchase order ID.
    ///
    /// # Errors
    ///
    /// Returns an error if either insert fails.
    pub fn create_book_with_purchase_order(
        &mut self,
        book: &NewBook,
        order: &NewPurchaseOrder,
        created_by: i64,
    ) -> Result<(i64, i64), PersistenceError> {
        mutations::catalog::create_book_with_purchase_order(&mut self.conn, book, order, created_by)
    }

    /// Retrieves a purchase order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_purchase_order(
        &mut self,
        purchase_order_id: i64,
    ) -> Result<Option<PurchaseOrderData>, PersistenceError> {
        queries::orders::get_purchase_order(&mut self.conn, purchase_order_id)
    }

    /// Lists purchase orders matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_purchase_orders(
        &mut self,
        filter: &PurchaseOrderFilter,
    ) -> Result<Vec<PurchaseOrderData>, PersistenceError> {
        queries::orders::list_purchase_orders(&mut self.conn, filter)
    }

    /// Replaces the editable fields of a pending purchase order.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConcurrentModification` if the order is
    /// no longer pending.
    pub fn update_purchase_order(
        &mut self,
        purchase_order_id: i64,
        update: &PurchaseOrderUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::orders::update_purchase_order(&mut self.conn, purchase_order_id, update)
    }

    /// Deletes a pending or returned purchase order.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConcurrentModification` if the order is
    /// in any other status.
    pub fn delete_purchase_order(&mut self, purchase_order_id: i64) -> Result<(), PersistenceError> {
        mutations::orders::delete_purchase_order(&mut self.conn, purchase_order_id)
    }

    /// Retrieves a sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_sale(&mut self, sale_id: i64) -> Result<Option<SaleData>, PersistenceError> {
        queries::orders::get_sale(&mut self.conn, sale_id)
    }

    /// Lists sales matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_sales(&mut self, filter: &SaleFilter) -> Result<Vec<SaleData>, PersistenceError> {
        queries::orders::list_sales(&mut self.conn, filter)
    }

    /// Updates the customer and notes of a sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the sale does not exist.
    pub fn update_sale_details(
        &mut self,
        sale_id: i64,
        customer: Option<&str>,
        notes: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::orders::update_sale_details(&mut self.conn, sale_id, customer, notes)
    }

    /// Deletes a returned sale.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConcurrentModification` if the sale is not
    /// returned.
    pub fn delete_sale(&mut self, sale_id: i64) -> Result<(), PersistenceError> {
        mutations::orders::delete_sale(&mut self.conn, sale_id)
    }

    // ========================================================================
    // Inventory Transitions
    // ========================================================================

    /// Applies and stores one inventory transition atomically.
    ///
    /// # Arguments
    ///
    /// * `request` - The operation and the records it names
    /// * `actor_id` - The user performing the operation
    ///
    /// # Returns
    ///
    /// The transition that was written and the IDs of any rows it created.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Rejected` if the current state does not
    /// permit the transition; nothing is written.
    pub fn apply_inventory_transition(
        &mut self,
        request: InventoryRequest,
        actor_id: i64,
    ) -> Result<(TransitionResult, PersistedTransition), InventoryError> {
        mutations::inventory::apply_inventory_transition(&mut self.conn, request, actor_id)
    }

    /// Records a multi-book sale atomically.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Rejected` if any line is not permitted;
    /// nothing is written.
    pub fn create_sale_batch(
        &mut self,
        lines: &[SaleLine],
        customer: Option<&str>,
        notes: Option<&str>,
        actor_id: i64,
    ) -> Result<Vec<(TransitionResult, PersistedTransition)>, InventoryError> {
        mutations::inventory::create_sale_batch(&mut self.conn, lines, customer, notes, actor_id)
    }

    // ========================================================================
    // Ledger
    // ========================================================================

    /// Records a manual ledger entry and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_ledger_entry(
        &mut self,
        entry: &NewLedgerEntry,
        created_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::ledger::create_ledger_entry(&mut self.conn, entry, created_by)
    }

    /// Retrieves a ledger entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_ledger_entry(
        &mut self,
        transaction_id: i64,
    ) -> Result<Option<LedgerEntryData>, PersistenceError> {
        queries::ledger::get_ledger_entry(&mut self.conn, transaction_id)
    }

    /// Lists ledger entries matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_ledger_entries(
        &mut self,
        filter: &LedgerFilter,
    ) -> Result<Vec<LedgerEntryData>, PersistenceError> {
        queries::ledger::list_ledger_entries(&mut self.conn, filter)
    }

    /// Applies a partial update to a manual ledger entry.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConcurrentModification` for system entries.
    pub fn update_ledger_entry(
        &mut self,
        transaction_id: i64,
        update: &LedgerEntryUpdate,
    ) -> Result<LedgerEntryData, PersistenceError> {
        mutations::ledger::update_ledger_entry(&mut self.conn, transaction_id, update)
    }

    /// Deletes a manual ledger entry.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConcurrentModification` for system entries.
    pub fn delete_ledger_entry(&mut self, transaction_id: i64) -> Result<(), PersistenceError> {
        mutations::ledger::delete_ledger_entry(&mut self.conn, transaction_id)
    }

    /// Totals income and expense over the whole ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn ledger_summary(&mut self) -> Result<LedgerSummary, PersistenceError> {
        queries::ledger::ledger_summary(&mut self.conn)
    }
}
