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

//! # Keydex - typed, ordered, concurrent secondary-index engine
//!
//! Keydex maps composite typed index keys to opaque item pointers for a
//! relational storage layer. It provides point lookups, predicate-driven
//! range scans in both directions, insertion, and deletion under
//! concurrent access from multiple worker threads.
//!
//! ## Key Features
//!
//! - **Typed keys** - integer widths, FLOAT, BOOLEAN, CHAR/VARCHAR, and
//!   TIMESTAMP columns with a total composite ordering
//! - **Two duplicate semantics** - a unique-key variant that rejects
//!   duplicate keys and a multi-map variant that admits any number of
//!   `(key, item)` pairs, selected by the factory
//! - **Predicate engine** - conjunctive predicate lists over
//!   `{=, !=, <, <=, >, >=, IN}` with lower-bound anchoring for scans
//! - **Thread safety** - reader/writer latching with per-key
//!   linearizability; no cooperative suspension points
//! - **In-memory** - no durability; the structure is rebuilt at process
//!   start
//!
//! ## Quick Start
//!
//! ```rust
//! use keydex::{
//!     Catalog, Column, DataType, Index, IndexConstraint, IndexFactory, IndexMethod,
//!     ItemPointer, Operator, ScanDirection, Tuple, Value, VarlenPool,
//! };
//!
//! // Register the owning table's schema
//! let catalog = Catalog::new();
//! catalog
//!     .register_table(
//!         "orders",
//!         keydex::Schema::new(vec![
//!             Column::fixed(DataType::Integer, "A", true),
//!             Column::varchar(1024, "B"),
//!         ]),
//!     )
//!     .unwrap();
//!
//! // Build an index over (A, B)
//! let metadata = catalog
//!     .index_metadata(
//!         "orders",
//!         "orders_ab",
//!         125,
//!         IndexMethod::BTree,
//!         IndexConstraint::Default,
//!         vec![0, 1],
//!         false,
//!     )
//!     .unwrap();
//! let index = IndexFactory::build(metadata).unwrap();
//!
//! // Insert and look up a key
//! let pool = VarlenPool::new();
//! let mut key = Tuple::new(index.metadata().key_schema().clone());
//! key.set_value(0, Value::integer(100), &pool).unwrap();
//! key.set_value(1, Value::varchar("a"), &pool).unwrap();
//! index.insert(&key, ItemPointer::new(120, 5)).unwrap();
//!
//! let mut found = Vec::new();
//! index.scan_key(&key, &mut found).unwrap();
//! assert_eq!(found, vec![ItemPointer::new(120, 5)]);
//!
//! // Range scan: every key with A = 100
//! let mut out = Vec::new();
//! index
//!     .scan(
//!         &[Value::integer(100)],
//!         &[0],
//!         &[Operator::Eq],
//!         ScanDirection::Forward,
//!         &mut out,
//!     )
//!     .unwrap();
//! assert_eq!(out.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - values, types, schemas, tuples, errors
//! - [`common`] - the variable-length pool
//! - [`catalog`] - schema registry and metadata construction
//! - [`index`] - metadata, predicate engine, ordered index variants,
//!   factory, counters

pub mod catalog;
pub mod common;
pub mod core;
pub mod index;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use common::VarlenPool;
pub use core::{
    Column, CompareResult, DataType, Error, IndexConstraint, IndexMethod, ItemPointer, Operator,
    Result, ScanDirection, Schema, Tuple, Value,
};
pub use index::{
    CompositeKey, Index, IndexFactory, IndexMetadata, IndexStats, MultiTreeIndex, UniqueTreeIndex,
};
