// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Book availability status.
//!
//! A book's status follows its stock: `out_of_stock` at zero copies and
//! `in_stock` otherwise. `discontinued` is set only by an explicit status
//! change and stays in place while stock moves.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Availability of a catalog book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// At least one copy is on the shelf.
    InStock,
    /// No copies on the shelf.
    OutOfStock,
    /// Withdrawn from sale regardless of stock.
    Discontinued,
}

impl BookStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::OutOfStock => "out_of_stock",
            Self::Discontinued => "discontinued",
        }
    }

    /// Status implied by a stock level for a book currently in `current`.
    ///
    /// `Discontinued` is sticky; any other status is recomputed from `stock`.
    #[must_use]
    pub const fn derive(current: Self, stock: i64) -> Self {
        match current {
            Self::Discontinued => Self::Discontinued,
            Self::InStock | Self::OutOfStock => {
                if stock > 0 {
                    Self::InStock
                } else {
                    Self::OutOfStock
                }
            }
        }
    }

    /// Validates an explicit status change to `target` for a book holding
    /// `stock` copies.
    ///
    /// Any book may become `Discontinued`. Every other target must be the
    /// status the stock implies.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StatusStockMismatch` if `target` contradicts the
    /// stock level.
    pub fn validate_change(target: Self, stock: i64) -> Result<(), DomainError> {
        if target == Self::Discontinued {
            return Ok(());
        }

        let implied: Self = Self::derive(Self::InStock, stock);
        if implied == target {
            Ok(())
        } else {
            Err(DomainError::StatusStockMismatch {
                status: target.as_str().to_string(),
                stock,
            })
        }
    }

    /// Whether a book in this status may be sold.
    #[must_use]
    pub const fn is_sellable(&self) -> bool {
        matches!(self, Self::InStock)
    }
}

impl FromStr for BookStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_stock" => Ok(Self::InStock),
            "out_of_stock" => Ok(Self::OutOfStock),
            "discontinued" => Ok(Self::Discontinued),
            _ => Err(DomainError::InvalidBookStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
