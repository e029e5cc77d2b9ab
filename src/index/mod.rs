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

//! Ordered secondary-index engine
//!
//! This module provides the index subsystem:
//!
//! - [`IndexMetadata`] - naming, identity, key projection, variant flags
//! - [`predicate`] - the predicate engine (`matches`, `lower_bound_key`)
//! - [`UniqueTreeIndex`] / [`MultiTreeIndex`] - the concurrent ordered map
//!   in its unique-key and multi-map variants
//! - [`IndexFactory`] - instantiates a variant from metadata
//! - [`IndexStats`] - per-operation counters and the dirty bit

pub mod factory;
pub mod metadata;
pub mod ordered;
pub mod predicate;
pub mod stats;

pub use factory::IndexFactory;
pub use metadata::IndexMetadata;
pub use ordered::{CompositeKey, MultiTreeIndex, UniqueTreeIndex};
pub use stats::IndexStats;

use crate::core::{ItemPointer, Operator, Result, ScanDirection, Tuple, Value};

/// The operation set shared by both index variants
///
/// Keys are borrowed for the duration of a call; the index deep-copies
/// whatever it stores. All operations are safe to call from multiple
/// threads; they block and complete in work bounded by the structure's
/// depth plus the reported result size.
pub trait Index: Send + Sync {
    /// The metadata this index was built from
    fn metadata(&self) -> &IndexMetadata;

    /// Operation counters and the dirty bit
    fn stats(&self) -> &IndexStats;

    /// Install a `(key, item)` pair
    ///
    /// The unique variant rejects an equal key with `DuplicateKey`
    /// regardless of the item pointer; the multi-map variant always
    /// appends, exact duplicates included.
    fn insert(&self, key: &Tuple, item: ItemPointer) -> Result<()>;

    /// Remove at most one entry matching `(key, item)` exactly
    ///
    /// Returns true if an entry was removed. A matching key with a
    /// mismatched item pointer removes nothing.
    fn delete(&self, key: &Tuple, item: ItemPointer) -> Result<bool>;

    /// Append every item pointer stored under a key equal to `key`
    fn scan_key(&self, key: &Tuple, out: &mut Vec<ItemPointer>) -> Result<()>;

    /// Append every item pointer in the index
    fn scan_all(&self, out: &mut Vec<ItemPointer>) -> Result<()>;

    /// Positioned range scan driven by a predicate list
    ///
    /// Anchors at the predicate's lower-bound key, walks in `direction`,
    /// and appends the item pointers of every key the predicate accepts.
    /// A pure point predicate short-circuits into a key lookup.
    fn scan(
        &self,
        values: &[Value],
        key_column_ids: &[usize],
        expr_types: &[Operator],
        direction: ScanDirection,
        out: &mut Vec<ItemPointer>,
    ) -> Result<()>;

    /// Reports the duplicate-handling variant
    fn has_unique_keys(&self) -> bool {
        self.metadata().unique_keys()
    }

    /// Index name
    fn name(&self) -> &str {
        self.metadata().name()
    }

    /// Numeric index id
    fn oid(&self) -> u32 {
        self.metadata().oid()
    }

    /// Descriptive string for the catalog layer
    fn info(&self) -> String {
        let metadata = self.metadata();
        format!(
            "INDEX {} ({}) {} :: key schema {}",
            metadata.method(),
            metadata.name(),
            if metadata.unique_keys() {
                "UNIQUE"
            } else {
                "NON-UNIQUE"
            },
            metadata.key_schema(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify trait is object-safe
    fn _assert_object_safe(_: &dyn Index) {}
}
