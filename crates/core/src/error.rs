// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookstore_domain::DomainError;
use thiserror::Error;

/// Errors that can occur during inventory transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The order or sale in the command belongs to a different book than
    /// the snapshot it was applied to.
    #[error("Record references book {actual}, but the transition was applied to book {expected}")]
    BookMismatch {
        /// The book the transition was applied to.
        expected: i64,
        /// The book the order or sale references.
        actual: i64,
    },
    /// A batch named a book with no snapshot supplied.
    #[error("No snapshot supplied for book {0}")]
    MissingSnapshot(i64),
    /// A batch contained no lines.
    #[error("A batch must contain at least one item")]
    EmptyBatch,
}
