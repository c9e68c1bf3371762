//! Domain validation errors.
//!
//! Raised when a catalog snapshot would violate its integrity rules or when
//! user-facing identifiers cannot be interpreted.

use thiserror::Error;

use super::category::Category;
use super::id::IndexCode;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Index codes must be unique within a category.
    #[error("duplicate {category} index {code}")]
    DuplicateIndex {
        /// Category the duplicate was found in.
        category: Category,
        /// The repeated code.
        code: IndexCode,
    },

    /// Index codes must not be empty after normalization.
    #[error("empty index code in {0}")]
    EmptyIndexCode(Category),

    /// The keyword does not name a category.
    #[error("unknown index category: {0}")]
    UnknownCategory(String),
}
