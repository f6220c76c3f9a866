// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use bookstore_domain::Role;
use bookstore_persistence::{Persistence, PersistenceError, SessionData, UserData};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, error, info, warn};

use crate::error::AuthError;

/// Session timestamps are stored in the same shape as `CURRENT_TIMESTAMP`
/// so the database can compare them directly.
const SESSION_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// An authenticated user acting through the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user's ID.
    pub user_id: i64,
    /// The user's login name.
    pub username: String,
    /// The role the user acts with.
    pub role: Role,
    /// Whether the user is a superuser.
    pub is_superuser: bool,
}

impl AuthenticatedActor {
    /// Builds the actor for a stored user.
    #[must_use]
    pub fn from_user(user: &UserData) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username.clone(),
            role: user.role,
            is_superuser: user.is_superuser,
        }
    }

    /// Whether this actor is the given user.
    #[must_use]
    pub const fn is_user(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// An action guarded by role-based authorization.
///
/// Reads of the catalog, orders and sales are open to every
/// authenticated user and have no entry here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// List, create, update, delete, activate or deactivate users, or reset
    /// their passwords.
    ManageUsers,
    /// Create, update or delete categories.
    ManageCategories,
    /// Create or update books, adjust stock, change status.
    EditCatalog,
    /// Delete a book.
    DeleteBook,
    /// Create, update, pay, shelve or return purchase orders.
    ManagePurchases,
    /// Delete a purchase order.
    DeletePurchase,
    /// Record sales and process returns.
    RecordSales,
    /// Delete a returned sale.
    DeleteSale,
    /// Read ledger entries and the summary.
    ViewLedger,
    /// Create, update or delete manual ledger entries.
    EditLedger,
}

impl Action {
    /// Every guarded action.
    pub const ALL: [Self; 10] = [
        Self::ManageUsers,
        Self::ManageCategories,
        Self::EditCatalog,
        Self::DeleteBook,
        Self::ManagePurchases,
        Self::DeletePurchase,
        Self::RecordSales,
        Self::DeleteSale,
        Self::ViewLedger,
        Self::EditLedger,
    ];

    /// Stable identifier used in errors and the permissions listing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ManageUsers => "manage_users",
            Self::ManageCategories => "manage_categories",
            Self::EditCatalog => "edit_catalog",
            Self::DeleteBook => "delete_book",
            Self::ManagePurchases => "manage_purchases",
            Self::DeletePurchase => "delete_purchase",
            Self::RecordSales => "record_sales",
            Self::DeleteSale => "delete_sale",
            Self::ViewLedger => "view_ledger",
            Self::EditLedger => "edit_ledger",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ManageUsers => "Manage users",
            Self::ManageCategories => "Manage categories",
            Self::EditCatalog => "Edit books and stock",
            Self::DeleteBook => "Delete books",
            Self::ManagePurchases => "Manage purchase orders",
            Self::DeletePurchase => "Delete purchase orders",
            Self::RecordSales => "Record sales and returns",
            Self::DeleteSale => "Delete sales",
            Self::ViewLedger => "View the financial ledger",
            Self::EditLedger => "Edit manual ledger entries",
        }
    }

    /// The roles permitted to perform this action.
    #[must_use]
    pub const fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::ManageUsers
            | Self::ManageCategories
            | Self::DeleteBook
            | Self::DeletePurchase
            | Self::DeleteSale
            | Self::EditLedger => &[Role::Admin],
            Self::EditCatalog | Self::ManagePurchases | Self::ViewLedger => {
                &[Role::Admin, Role::Manager]
            }
            Self::RecordSales => &[Role::Admin, Role::Manager, Role::Staff],
        }
    }

    /// Whether `role` may perform this action.
    #[must_use]
    pub fn permits(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks whether an actor may perform an action.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action being attempted
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` naming the roles that would be
    /// permitted.
    pub fn authorize(actor: &AuthenticatedActor, action: Action) -> Result<(), AuthError> {
        if action.permits(actor.role) {
            return Ok(());
        }

        warn!(
            username = %actor.username,
            role = %actor.role,
            action = action.code(),
            "Authorization denied"
        );

        let required_role: String = action
            .allowed_roles()
            .iter()
            .map(Role::label)
            .collect::<Vec<&str>>()
            .join(" or ");

        Err(AuthError::Unauthorized {
            action: action.code().to_string(),
            required_role,
        })
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session lifetime.
    pub const DEFAULT_SESSION_TTL: Duration = Duration::hours(24);

    /// Verifies credentials and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `username` - The login name, matched case-insensitively
    /// * `password` - The plaintext password
    /// * `session_ttl` - How long the new session stays valid
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `user`, `expires_at`)
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the user is unknown, the
    /// password is wrong or the user is inactive, and `AuthError::Internal`
    /// if the session cannot be stored.
    pub fn login(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
        session_ttl: Duration,
    ) -> Result<(String, AuthenticatedActor, UserData, String), AuthError> {
        let invalid_credentials = || AuthError::AuthenticationFailed {
            reason: String::from("Invalid username or password"),
        };

        let Some(user) = persistence
            .get_user_by_username(username.trim())
            .map_err(Self::map_persistence_error)?
        else {
            warn!(username, "Login attempt for unknown user");
            return Err(invalid_credentials());
        };

        let password_ok: bool = persistence
            .verify_password(password, &user.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_ok {
            warn!(username = %user.username, "Login attempt with wrong password");
            return Err(invalid_credentials());
        }

        if !user.is_active {
            warn!(username = %user.username, "Login attempt for inactive user");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("User account is inactive"),
            });
        }

        let session_token: String = Self::generate_session_token();
        let expires_at: String = Self::format_expiry(OffsetDateTime::now_utc() + session_ttl)?;

        // The token is handed out only once every write has succeeded.
        persistence
            .update_last_login(user.user_id)
            .map_err(Self::map_persistence_error)?;
        persistence
            .create_session(&session_token, user.user_id, &expires_at)
            .map_err(Self::map_persistence_error)?;

        info!(username = %user.username, role = %user.role, "User logged in");

        let actor: AuthenticatedActor = AuthenticatedActor::from_user(&user);
        Ok((session_token, actor, user, expires_at))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// Expired sessions are deleted on sight.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_actor`, `user`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or the user
    /// no longer exists or is inactive.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, UserData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            PrimitiveDateTime::parse(&session.expires_at, SESSION_TIME_FORMAT)
                .map_err(|e| {
                    error!(
                        error = %e,
                        session_id = session.session_id,
                        "Unreadable session expiration"
                    );
                    AuthError::Internal {
                        message: String::from("Session record is corrupt"),
                    }
                })?
                .assume_utc();

        if OffsetDateTime::now_utc() > expires_at {
            debug!(session_id = session.session_id, "Session expired");
            persistence
                .delete_session(session_token)
                .map_err(Self::map_persistence_error)?;
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        if !user.is_active {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("User account is inactive"),
            });
        }

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok((AuthenticatedActor::from_user(&user), user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be deleted.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(Self::map_persistence_error)?;
        debug!("Session deleted");
        Ok(())
    }

    /// Generates a 256-bit random session token, hex encoded.
    fn generate_session_token() -> String {
        hex::encode(rand::random::<[u8; 32]>())
    }

    fn format_expiry(expires_at: OffsetDateTime) -> Result<String, AuthError> {
        expires_at
            .format(SESSION_TIME_FORMAT)
            .map_err(|e| {
                error!(error = %e, "Failed to format session expiration");
                AuthError::Internal {
                    message: String::from("Failed to create session"),
                }
            })
    }

    /// Storage failures are server faults, not rejected credentials. The
    /// database message is logged and kept out of the response.
    pub(crate) fn map_persistence_error(err: PersistenceError) -> AuthError {
        error!(error = %err, "Session storage failure");
        AuthError::Internal {
            message: String::from("Session storage is unavailable"),
        }
    }
}
