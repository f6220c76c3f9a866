// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(DomainError::InvalidTransactionType(s.to_string())),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a ledger entry pays for or is paid by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    Sale,
    Purchase,
    Refund,
    Salary,
    Rent,
    Utility,
    Other,
}

impl TransactionCategory {
    pub const ALL: [Self; 7] = [
        Self::Sale,
        Self::Purchase,
        Self::Refund,
        Self::Salary,
        Self::Rent,
        Self::Utility,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Purchase => "purchase",
            Self::Refund => "refund",
            Self::Salary => "salary",
            Self::Rent => "rent",
            Self::Utility => "utility",
            Self::Other => "other",
        }
    }
}

impl FromStr for TransactionCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::InvalidTransactionCategory(s.to_string()))
    }
}

impl std::fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate totals over a set of ledger entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    pub transaction_count: i64,
}

impl LedgerSummary {
    /// Folds ledger entries into income, expense and net totals.
    ///
    /// # Arguments
    ///
    /// * `entries` - `(type, amount)` pairs to sum
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (TransactionType, Decimal)>,
    {
        let mut summary: Self = Self::default();
        for (kind, amount) in entries {
            match kind {
                TransactionType::Income => summary.total_income += amount,
                TransactionType::Expense => summary.total_expense += amount,
            }
            summary.transaction_count += 1;
        }
        summary.net_balance = summary.total_income - summary.total_expense;
        summary
    }
}
