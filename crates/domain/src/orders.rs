// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Purchase order and sale lifecycles.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle of a purchase order.
///
/// Valid transitions:
/// - `Pending` → `Paid`
/// - `Pending` → `Returned`
/// - `Paid` → `Shelved`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    /// Ordered from the supplier, not yet paid.
    Pending,
    /// Paid; copies not yet on the shelf.
    Paid,
    /// Sent back to the supplier before payment.
    Returned,
    /// Copies received and added to stock.
    Shelved,
}

impl PurchaseOrderStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Returned => "returned",
            Self::Shelved => "shelved",
        }
    }

    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Paid | Self::Returned) | (Self::Paid, Self::Shelved)
        )
    }

    /// Validates a transition from this status to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the lifecycle does
    /// not permit the move.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                entity: "purchase order",
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }

    /// Whether the order's fields may still be edited or the order deleted.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the order may be deleted without losing inventory history.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        matches!(self, Self::Pending | Self::Returned)
    }
}

impl FromStr for PurchaseOrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "returned" => Ok(Self::Returned),
            "shelved" => Ok(Self::Shelved),
            _ => Err(DomainError::InvalidPurchaseOrderStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a sale: `Completed` → `Returned`, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Completed,
    Returned,
}

impl SaleStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Returned => "returned",
        }
    }

    /// Validates a transition from this status to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` unless this is
    /// `Completed` and `target` is `Returned`.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if matches!((self, target), (Self::Completed, Self::Returned)) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                entity: "sale",
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }
}

impl FromStr for SaleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Self::Completed),
            "returned" => Ok(Self::Returned),
            _ => Err(DomainError::InvalidSaleStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
