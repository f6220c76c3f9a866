// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Staff role of an account.
///
/// Roles gate what an authenticated user may do through the API.
/// New accounts default to `Staff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full control, including user management and manual ledger writes.
    Admin,
    /// Catalog and purchasing authority, ledger read access.
    Manager,
    /// Front-desk sales and read-only catalog access.
    #[default]
    Staff,
}

impl Role {
    /// Every role, in descending order of authority.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Manager, Self::Staff];

    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Staff => "staff",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Manager => "Manager",
            Self::Staff => "Staff",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional gender recorded on a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

impl Gender {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            "O" => Ok(Self::Other),
            _ => Err(DomainError::InvalidGender(s.to_string())),
        }
    }
}

/// A validated, normalized ISBN.
///
/// Hyphens and spaces are stripped on parse. ISBN-13 values must carry a
/// valid mod-10 check digit; ISBN-10 values a valid mod-11 check digit,
/// where the final position may be `X`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isbn(String);

impl Isbn {
    /// Parses and normalizes an ISBN.
    ///
    /// # Arguments
    ///
    /// * `raw` - The ISBN as entered, possibly containing hyphens or spaces
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIsbn` if the value has the wrong length,
    /// contains characters other than digits (and a trailing `X` for
    /// ISBN-10), or fails its checksum.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized: String = raw
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let invalid = |reason: &str| DomainError::InvalidIsbn {
            isbn: raw.to_string(),
            reason: reason.to_string(),
        };

        match normalized.len() {
            13 => {
                if !normalized.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid("ISBN-13 must contain only digits"));
                }
                if !isbn13_checksum_ok(&normalized) {
                    return Err(invalid("ISBN-13 check digit mismatch"));
                }
            }
            10 => {
                let (body, check) = normalized.split_at(9);
                if !body.chars().all(|c| c.is_ascii_digit())
                    || !check.chars().all(|c| c.is_ascii_digit() || c == 'X')
                {
                    return Err(invalid(
                        "ISBN-10 must contain nine digits followed by a digit or X",
                    ));
                }
                if !isbn10_checksum_ok(&normalized) {
                    return Err(invalid("ISBN-10 check digit mismatch"));
                }
            }
            _ => return Err(invalid("must be 10 or 13 characters")),
        }

        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn isbn13_checksum_ok(digits: &str) -> bool {
    let sum: u32 = digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d } else { d * 3 })
        .sum();
    sum % 10 == 0
}

fn isbn10_checksum_ok(chars: &str) -> bool {
    let sum: u32 = chars
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let value: u32 = if c == 'X' { 10 } else { c.to_digit(10).unwrap_or(0) };
            // Weights run 10 down to 1.
            value * (10 - u32::try_from(i).unwrap_or(0))
        })
        .sum();
    sum % 11 == 0
}
