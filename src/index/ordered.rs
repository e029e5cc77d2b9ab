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

//! Concurrent ordered index - unique-key and multi-map variants
//!
//! Both variants keep an ordered map from [`CompositeKey`] to item
//! pointers behind a `parking_lot::RwLock`: readers (the three scans)
//! share the lock, writers (insert, delete) take it exclusively, which
//! yields per-key linearizability without exposing suspension points.
//!
//! Keys handed in by callers are validated against the key schema and
//! deep-copied before storage, so the comparator only ever runs on
//! same-family columns and stays total.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use parking_lot::RwLock;
use smallvec::SmallVec;

use super::metadata::IndexMetadata;
use super::predicate::{lower_bound_key, matches};
use super::stats::IndexStats;
use super::Index;
use crate::common::VarlenPool;
use crate::core::{
    CompareResult, DataType, Error, ItemPointer, Operator, Result, ScanDirection, Tuple, Value,
};

/// Item pointers stored per key; most keys carry exactly one
type ItemList = SmallVec<[ItemPointer; 1]>;

// ============================================================================
// CompositeKey - ordered key for the BTreeMap
// ============================================================================

/// Composite key wrapping the deep-copied column values of an index key
///
/// Ordering is the lexicographic order induced by per-column
/// [`Value::compare`]. Keys are validated against the key schema before
/// storage, so the `Incomparable` outcome cannot occur between stored
/// keys; the comparator maps it to `Equal` to stay total.
#[derive(Debug, Clone)]
pub struct CompositeKey(Vec<Value>);

impl CompositeKey {
    fn from_values(values: &[Value]) -> Self {
        Self(values.to_vec())
    }

    /// The key's column values in schema order
    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

impl PartialEq for CompositeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CompositeKey {}

impl PartialOrd for CompositeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CompositeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            match a.compare(b) {
                CompareResult::Equal | CompareResult::Incomparable => continue,
                CompareResult::Less => return std::cmp::Ordering::Less,
                CompareResult::Greater => return std::cmp::Ordering::Greater,
            }
        }
        // If all compared columns are equal, shorter is less
        self.0.len().cmp(&other.0.len())
    }
}

// ============================================================================
// Shared state and helpers
// ============================================================================

/// State common to both variants: metadata, the index-owned pool for
/// search-key construction, and the operation counters
struct IndexCore {
    metadata: IndexMetadata,
    pool: VarlenPool,
    stats: IndexStats,
}

impl IndexCore {
    fn new(metadata: IndexMetadata) -> Self {
        Self {
            metadata,
            pool: VarlenPool::new(),
            stats: IndexStats::new(),
        }
    }

    /// Validate a caller key against the key schema and deep-copy it
    fn checked_key(&self, key: &Tuple) -> Result<CompositeKey> {
        let key_schema = self.metadata.key_schema();
        if key.column_count() != key_schema.column_count() {
            return Err(Error::invalid_argument(format!(
                "key has {} columns, key schema has {}",
                key.column_count(),
                key_schema.column_count()
            )));
        }

        for (i, value) in key.values().iter().enumerate() {
            let got = value.data_type();
            if !got.is_orderable() {
                return Err(Error::UnsupportedKeyType(got));
            }
            let expected = key_schema.data_type(i);
            let is_string = |dt: DataType| matches!(dt, DataType::Char | DataType::Varchar);
            let same_family = got == expected
                || (got.is_numeric() && expected.is_numeric())
                || (is_string(got) && is_string(expected));
            if !value.is_null() && !same_family {
                return Err(Error::type_mismatch(
                    &key_schema.column(i).name,
                    expected,
                    got,
                ));
            }
        }

        Ok(CompositeKey::from_values(key.values()))
    }

    /// Build the scan anchor from a predicate list
    ///
    /// Returns the anchor tuple and whether the predicate is a pure point
    /// query. The anchor's varlen columns draw from the index's own pool.
    fn anchor(
        &self,
        values: &[Value],
        key_column_ids: &[usize],
        expr_types: &[Operator],
    ) -> Result<(Tuple, bool)> {
        let mut anchor = Tuple::new(self.metadata.key_schema().clone());
        let all_eq = lower_bound_key(&mut anchor, values, key_column_ids, expr_types, &self.pool)?;
        Ok((anchor, all_eq))
    }
}

/// Walk pre-positioned map entries, filter them through the predicate, and
/// hand accepted entries to `emit`
fn filter_entries<'a, V: 'a>(
    entries: impl Iterator<Item = (&'a CompositeKey, &'a V)>,
    key_column_ids: &[usize],
    expr_types: &[Operator],
    values: &[Value],
    mut emit: impl FnMut(&'a V),
) -> Result<()> {
    for (key, items) in entries {
        if matches(key.values(), key_column_ids, expr_types, values)? {
            emit(items);
        }
    }
    Ok(())
}

// ============================================================================
// Unique-key variant
// ============================================================================

/// Ordered index rejecting duplicate keys
///
/// At most one item pointer per key; a second insert of an equal key fails
/// with `DuplicateKey` whatever its item pointer.
pub struct UniqueTreeIndex {
    core: IndexCore,
    map: RwLock<BTreeMap<CompositeKey, ItemPointer>>,
}

impl UniqueTreeIndex {
    pub(crate) fn new(metadata: IndexMetadata) -> Self {
        Self {
            core: IndexCore::new(metadata),
            map: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Index for UniqueTreeIndex {
    fn metadata(&self) -> &IndexMetadata {
        &self.core.metadata
    }

    fn stats(&self) -> &IndexStats {
        &self.core.stats
    }

    fn insert(&self, key: &Tuple, item: ItemPointer) -> Result<()> {
        let composite = self.core.checked_key(key)?;
        let mut map = self.map.write();
        match map.entry(composite) {
            Entry::Occupied(_) => Err(Error::duplicate_key(
                self.core.metadata.name(),
                key.to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(item);
                self.core.stats.record_insert();
                Ok(())
            }
        }
    }

    fn delete(&self, key: &Tuple, item: ItemPointer) -> Result<bool> {
        let composite = self.core.checked_key(key)?;
        let mut map = self.map.write();
        // key equal but item different: leave the entry in place
        if map.get(&composite) == Some(&item) {
            map.remove(&composite);
            self.core.stats.record_delete();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn scan_key(&self, key: &Tuple, out: &mut Vec<ItemPointer>) -> Result<()> {
        let composite = self.core.checked_key(key)?;
        {
            let map = self.map.read();
            if let Some(&item) = map.get(&composite) {
                out.push(item);
            }
        }
        self.core.stats.record_lookup();
        Ok(())
    }

    fn scan_all(&self, out: &mut Vec<ItemPointer>) -> Result<()> {
        {
            let map = self.map.read();
            out.extend(map.values().copied());
        }
        self.core.stats.record_lookup();
        Ok(())
    }

    fn scan(
        &self,
        values: &[Value],
        key_column_ids: &[usize],
        expr_types: &[Operator],
        direction: ScanDirection,
        out: &mut Vec<ItemPointer>,
    ) -> Result<()> {
        let (anchor, all_eq) = self.core.anchor(values, key_column_ids, expr_types)?;
        if all_eq {
            return self.scan_key(&anchor, out);
        }

        let anchor_key = CompositeKey::from_values(anchor.values());
        {
            let map = self.map.read();
            let emit = |item: &ItemPointer| out.push(*item);
            match direction {
                ScanDirection::Forward => filter_entries(
                    map.range(anchor_key..),
                    key_column_ids,
                    expr_types,
                    values,
                    emit,
                )?,
                ScanDirection::Backward => filter_entries(
                    map.range(anchor_key..).rev(),
                    key_column_ids,
                    expr_types,
                    values,
                    emit,
                )?,
            }
        }
        self.core.stats.record_lookup();
        Ok(())
    }
}

// ============================================================================
// Multi-map variant
// ============================================================================

/// Ordered index admitting duplicate keys and duplicate `(key, item)` pairs
pub struct MultiTreeIndex {
    core: IndexCore,
    map: RwLock<BTreeMap<CompositeKey, ItemList>>,
}

impl MultiTreeIndex {
    pub(crate) fn new(metadata: IndexMetadata) -> Self {
        Self {
            core: IndexCore::new(metadata),
            map: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Index for MultiTreeIndex {
    fn metadata(&self) -> &IndexMetadata {
        &self.core.metadata
    }

    fn stats(&self) -> &IndexStats {
        &self.core.stats
    }

    fn insert(&self, key: &Tuple, item: ItemPointer) -> Result<()> {
        let composite = self.core.checked_key(key)?;
        {
            let mut map = self.map.write();
            map.entry(composite).or_default().push(item);
        }
        self.core.stats.record_insert();
        Ok(())
    }

    fn delete(&self, key: &Tuple, item: ItemPointer) -> Result<bool> {
        let composite = self.core.checked_key(key)?;
        let removed = {
            let mut map = self.map.write();
            match map.get_mut(&composite) {
                Some(items) => match items.iter().position(|stored| *stored == item) {
                    Some(at) => {
                        items.remove(at);
                        if items.is_empty() {
                            map.remove(&composite);
                        }
                        true
                    }
                    None => false,
                },
                None => false,
            }
        };
        if removed {
            self.core.stats.record_delete();
        }
        Ok(removed)
    }

    fn scan_key(&self, key: &Tuple, out: &mut Vec<ItemPointer>) -> Result<()> {
        let composite = self.core.checked_key(key)?;
        {
            let map = self.map.read();
            if let Some(items) = map.get(&composite) {
                out.extend_from_slice(items);
            }
        }
        self.core.stats.record_lookup();
        Ok(())
    }

    fn scan_all(&self, out: &mut Vec<ItemPointer>) -> Result<()> {
        {
            let map = self.map.read();
            for items in map.values() {
                out.extend_from_slice(items);
            }
        }
        self.core.stats.record_lookup();
        Ok(())
    }

    fn scan(
        &self,
        values: &[Value],
        key_column_ids: &[usize],
        expr_types: &[Operator],
        direction: ScanDirection,
        out: &mut Vec<ItemPointer>,
    ) -> Result<()> {
        let (anchor, all_eq) = self.core.anchor(values, key_column_ids, expr_types)?;
        if all_eq {
            return self.scan_key(&anchor, out);
        }

        let anchor_key = CompositeKey::from_values(anchor.values());
        {
            let map = self.map.read();
            let emit = |items: &ItemList| out.extend_from_slice(items);
            match direction {
                ScanDirection::Forward => filter_entries(
                    map.range(anchor_key..),
                    key_column_ids,
                    expr_types,
                    values,
                    emit,
                )?,
                ScanDirection::Backward => filter_entries(
                    map.range(anchor_key..).rev(),
                    key_column_ids,
                    expr_types,
                    values,
                    emit,
                )?,
            }
        }
        self.core.stats.record_lookup();
        Ok(())
    }
}
