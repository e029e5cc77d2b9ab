// Copyright 2025 Keydex Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for Keydex
//!
//! All index operations surface failures synchronously through this enum;
//! nothing is retried internally. Counters and the dirty bit are only
//! touched on success, so a caller observing an error can assume the index
//! state is unchanged.

use thiserror::Error;

use super::types::{DataType, IndexMethod, Operator};

/// Result type alias for Keydex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for index operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // =========================================================================
    // Index errors
    // =========================================================================
    /// Unique-key index already holds an equal key
    #[error("duplicate key in unique index '{index}': {key}")]
    DuplicateKey { index: String, key: String },

    /// A key column's type has no defined ordering
    #[error("key column type {0} has no defined ordering")]
    UnsupportedKeyType(DataType),

    /// The factory was handed a method tag it cannot instantiate
    #[error("index method '{0}' is not supported")]
    UnsupportedIndexMethod(IndexMethod),

    // =========================================================================
    // Predicate errors
    // =========================================================================
    /// The predicate engine hit an operator/outcome pair outside the known set
    #[error("unsupported predicate: operator {op} against {outcome} comparison")]
    UnsupportedPredicate { op: Operator, outcome: &'static str },

    // =========================================================================
    // Value errors
    // =========================================================================
    /// Value type does not match the column it is being stored into
    #[error("type mismatch for column '{column}': expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        got: DataType,
    },

    /// Invalid argument (length mismatch, out-of-range column index, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // =========================================================================
    // Resource errors
    // =========================================================================
    /// Variable-length pool exhausted
    #[error("out of memory: pool limit {limit} bytes, requested {requested} more")]
    OutOfMemory { requested: usize, limit: usize },

    // =========================================================================
    // Catalog errors
    // =========================================================================
    /// Table already registered
    #[error("table '{0}' already exists")]
    TableAlreadyExists(String),

    /// Table not found in the catalog
    #[error("table '{0}' not found")]
    TableNotFound(String),
}

impl Error {
    /// Create a new DuplicateKey error
    pub fn duplicate_key(index: impl Into<String>, key: impl Into<String>) -> Self {
        Error::DuplicateKey {
            index: index.into(),
            key: key.into(),
        }
    }

    /// Create a new InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Create a new TypeMismatch error
    pub fn type_mismatch(column: impl Into<String>, expected: DataType, got: DataType) -> Self {
        Error::TypeMismatch {
            column: column.into(),
            expected,
            got,
        }
    }

    /// Check if this is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Error::DuplicateKey { .. })
    }

    /// Check if this error indicates a mis-planned predicate
    pub fn is_predicate_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedPredicate { .. } | Error::InvalidArgument(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::duplicate_key("idx_ab", "(100, a)").to_string(),
            "duplicate key in unique index 'idx_ab': (100, a)"
        );
        assert_eq!(
            Error::UnsupportedKeyType(DataType::List).to_string(),
            "key column type LIST has no defined ordering"
        );
        assert_eq!(
            Error::OutOfMemory {
                requested: 64,
                limit: 32
            }
            .to_string(),
            "out of memory: pool limit 32 bytes, requested 64 more"
        );
        assert_eq!(
            Error::invalid_argument("3 columns, 2 values").to_string(),
            "invalid argument: 3 columns, 2 values"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::duplicate_key("i", "k").is_constraint_violation());
        assert!(!Error::TableNotFound("t".to_string()).is_constraint_violation());

        assert!(Error::UnsupportedPredicate {
            op: Operator::Eq,
            outcome: "incomparable"
        }
        .is_predicate_error());
        assert!(Error::invalid_argument("x").is_predicate_error());
        assert!(!Error::duplicate_key("i", "k").is_predicate_error());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            Error::TableNotFound("t".to_string()),
            Error::TableNotFound("t".to_string())
        );
        assert_ne!(
            Error::TableNotFound("t".to_string()),
            Error::TableAlreadyExists("t".to_string())
        );
    }
}
