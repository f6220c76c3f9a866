// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use bookstore::CoreError;
use bookstore_domain::DomainError;
use bookstore_persistence::{InventoryError, PersistenceError};
use thiserror::Error;
use tracing::error;

use crate::password_policy::PasswordPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Authentication could not be completed because of a server fault.
    #[error("Internal error: {message}")]
    Internal {
        /// A description safe to show the client.
        message: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain, core and persistence errors and
/// represent the API contract. The server maps each variant to one HTTP
/// status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Credentials or session were rejected.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor does not have permission.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A field failed validation.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A business rule forbids the operation in the current state.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The write conflicts with existing data.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The offending field, for errors that name one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }

    pub(crate) fn not_found(resource_type: &str, id: i64) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: format!("{resource_type} {id} does not exist"),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
            AuthError::Internal { message } => Self::Internal { message },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        let field: &str = match err {
            PasswordPolicyError::ConfirmationMismatch => "password_confirmation",
            _ => "password",
        };
        Self::InvalidInput {
            field: field.to_string(),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// Parse and format failures become `InvalidInput` naming the field;
/// state rules become `DomainRuleViolation`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let invalid = |field: &str| ApiError::InvalidInput {
        field: field.to_string(),
        message: message.clone(),
    };
    let rule = |rule: &str| ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message: message.clone(),
    };

    match err {
        DomainError::InvalidRole(_) => invalid("role"),
        DomainError::InvalidGender(_) => invalid("gender"),
        DomainError::InvalidBookStatus(_)
        | DomainError::InvalidPurchaseOrderStatus(_)
        | DomainError::InvalidSaleStatus(_) => invalid("status"),
        DomainError::InvalidTransactionType(_) => invalid("transaction_type"),
        DomainError::InvalidTransactionCategory(_) => invalid("category"),
        DomainError::InvalidUsername { .. } => invalid("username"),
        DomainError::InvalidEmail(_) => invalid("email"),
        DomainError::InvalidIsbn { .. } => invalid("isbn"),
        DomainError::EmptyField { field }
        | DomainError::FieldTooLong { field, .. }
        | DomainError::InvalidAmount { field, .. }
        | DomainError::InvalidQuantity { field, .. } => invalid(field),
        DomainError::InvalidStockAdjustment { .. } => rule("non_negative_stock"),
        DomainError::InvalidStatusTransition { .. } => rule("status_transition"),
        DomainError::InsufficientStock { .. } => rule("sufficient_stock"),
        DomainError::BookNotAvailable { .. } => rule("book_available"),
        DomainError::StatusStockMismatch { .. } => rule("status_matches_stock"),
        DomainError::AmountOverflow { .. } => invalid("total_amount"),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::BookMismatch { .. } => ApiError::DomainRuleViolation {
            rule: String::from("same_book"),
            message: err.to_string(),
        },
        CoreError::MissingSnapshot(book_id) => ApiError::not_found("Book", book_id),
        CoreError::EmptyBatch => ApiError::InvalidInput {
            field: String::from("items"),
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// # Arguments
///
/// * `resource_type` - The resource the failed operation acted on, used
///   in not-found and conflict messages
/// * `err` - The persistence error
#[must_use]
pub fn translate_persistence_error(resource_type: &str, err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message,
        },
        PersistenceError::UniqueViolation(message) => ApiError::Conflict {
            message: format!("{resource_type} already exists: {message}"),
        },
        PersistenceError::ForeignKeyViolation(message) => ApiError::Conflict {
            message: format!("{resource_type} is referenced by other records: {message}"),
        },
        PersistenceError::ConcurrentModification(message) => ApiError::Conflict {
            message: format!("{resource_type} was modified concurrently: {message}"),
        },
        PersistenceError::CheckViolation(message) => ApiError::InvalidInput {
            field: resource_type.to_lowercase(),
            message,
        },
        other => {
            error!(error = %other, resource_type, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}

/// Translates an inventory transition error into an API error.
#[must_use]
pub fn translate_inventory_error(resource_type: &str, err: InventoryError) -> ApiError {
    match err {
        InventoryError::Rejected(core_err) => translate_core_error(core_err),
        InventoryError::Persistence(persistence_err) => {
            translate_persistence_error(resource_type, persistence_err)
        }
    }
}
