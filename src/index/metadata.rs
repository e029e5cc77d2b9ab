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

//! Index metadata - identity, key projection, and variant selection
//!
//! The tuple schema is shared with the catalog (the index never owns its
//! table's schema); the key schema is owned by the metadata and released
//! with it.

use std::fmt;
use std::sync::Arc;

use crate::core::{IndexConstraint, IndexMethod, Schema};

/// Descriptor from which the factory instantiates an index
#[derive(Debug, Clone)]
pub struct IndexMetadata {
    name: String,
    oid: u32,
    method: IndexMethod,
    constraint: IndexConstraint,
    tuple_schema: Arc<Schema>,
    key_schema: Arc<Schema>,
    key_attrs: Vec<usize>,
    unique_keys: bool,
    /// True iff every key column is an integer width; a specialisation
    /// hint, never a behaviour switch
    ints_only: bool,
}

impl IndexMetadata {
    /// Create index metadata
    ///
    /// `key_attrs` lists the tuple-schema positions the key columns are
    /// drawn from, parallel to the key schema's columns.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        oid: u32,
        method: IndexMethod,
        constraint: IndexConstraint,
        tuple_schema: Arc<Schema>,
        key_schema: Schema,
        key_attrs: Vec<usize>,
        unique_keys: bool,
    ) -> Self {
        let ints_only = key_schema
            .columns()
            .iter()
            .all(|column| column.data_type.is_integer());

        Self {
            name: name.into(),
            oid,
            method,
            constraint,
            tuple_schema,
            key_schema: Arc::new(key_schema),
            key_attrs,
            unique_keys,
            ints_only,
        }
    }

    /// Index name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Numeric index id
    pub fn oid(&self) -> u32 {
        self.oid
    }

    /// Representation selector
    pub fn method(&self) -> IndexMethod {
        self.method
    }

    /// Constraint class
    pub fn constraint(&self) -> IndexConstraint {
        self.constraint
    }

    /// The owning table's tuple schema (shared)
    pub fn tuple_schema(&self) -> &Arc<Schema> {
        &self.tuple_schema
    }

    /// The key schema (owned)
    pub fn key_schema(&self) -> &Arc<Schema> {
        &self.key_schema
    }

    /// Tuple-schema positions forming the key
    pub fn key_attrs(&self) -> &[usize] {
        &self.key_attrs
    }

    /// Whether the index rejects duplicate keys
    pub fn unique_keys(&self) -> bool {
        self.unique_keys
    }

    /// Whether every key column is an integer width
    pub fn ints_only(&self) -> bool {
        self.ints_only
    }

    /// Number of key columns
    pub fn key_column_count(&self) -> usize {
        self.key_schema.column_count()
    }

    /// One-line description for the catalog layer
    pub fn info(&self) -> String {
        format!(
            "INDEX METADATA: [{}] {} key_attrs {:?}",
            self.name,
            if self.unique_keys {
                "UNIQUE"
            } else {
                "NON-UNIQUE"
            },
            self.key_attrs,
        )
    }
}

impl fmt::Display for IndexMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info())
    }
}
