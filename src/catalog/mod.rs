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

//! Schema catalog - the registry the index engine consumes
//!
//! The catalog keeps one shared tuple schema per table name and builds
//! [`IndexMetadata`] by projecting a key schema out of a registered tuple
//! schema. The engine itself never mutates the catalog; the surrounding
//! DDL layer does.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::core::{Error, IndexConstraint, IndexMethod, Result, Schema};
use crate::index::IndexMetadata;

/// Table-name to tuple-schema registry
#[derive(Debug, Default)]
pub struct Catalog {
    tables: RwLock<FxHashMap<String, Arc<Schema>>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table's tuple schema
    pub fn register_table(&self, name: impl Into<String>, schema: Schema) -> Result<Arc<Schema>> {
        let name = name.into();
        let mut tables = self.tables.write();
        if tables.contains_key(&name) {
            return Err(Error::TableAlreadyExists(name));
        }
        let schema = Arc::new(schema);
        tables.insert(name, Arc::clone(&schema));
        Ok(schema)
    }

    /// Look up a table's tuple schema
    pub fn tuple_schema(&self, name: &str) -> Option<Arc<Schema>> {
        self.tables.read().get(name).cloned()
    }

    /// Drop a table; returns true if it was registered
    pub fn drop_table(&self, name: &str) -> bool {
        self.tables.write().remove(name).is_some()
    }

    /// Build index metadata for a registered table
    ///
    /// Projects the key schema out of the table's tuple schema and records
    /// the key-attribute projection on it.
    #[allow(clippy::too_many_arguments)]
    pub fn index_metadata(
        &self,
        table: &str,
        index_name: impl Into<String>,
        oid: u32,
        method: IndexMethod,
        constraint: IndexConstraint,
        key_attrs: Vec<usize>,
        unique_keys: bool,
    ) -> Result<IndexMetadata> {
        let tuple_schema = self
            .tuple_schema(table)
            .ok_or_else(|| Error::TableNotFound(table.to_string()))?;
        let key_schema = tuple_schema.project(&key_attrs)?;

        Ok(IndexMetadata::new(
            index_name,
            oid,
            method,
            constraint,
            tuple_schema,
            key_schema,
            key_attrs,
            unique_keys,
        ))
    }
}
