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

//! Index factory - instantiates a concrete variant from metadata

use tracing::debug;

use super::metadata::IndexMetadata;
use super::ordered::{MultiTreeIndex, UniqueTreeIndex};
use super::Index;
use crate::core::{Error, IndexMethod, Result};

/// Builds index objects from metadata
pub struct IndexFactory;

impl IndexFactory {
    /// Instantiate the index variant the metadata selects
    ///
    /// Both tree method tags map onto the ordered-map implementation; the
    /// duplicate-handling variant follows the `unique_keys` flag. `Hash`
    /// cannot serve ordered scans and is rejected. The `ints_only` hint is
    /// available to callers but selects no specialised path here.
    pub fn build(metadata: IndexMetadata) -> Result<Box<dyn Index>> {
        match metadata.method() {
            IndexMethod::BTree | IndexMethod::BwTree => {
                debug!(
                    name = metadata.name(),
                    oid = metadata.oid(),
                    method = %metadata.method(),
                    unique = metadata.unique_keys(),
                    ints_only = metadata.ints_only(),
                    "building index"
                );
                if metadata.unique_keys() {
                    Ok(Box::new(UniqueTreeIndex::new(metadata)))
                } else {
                    Ok(Box::new(MultiTreeIndex::new(metadata)))
                }
            }
            IndexMethod::Hash => Err(Error::UnsupportedIndexMethod(IndexMethod::Hash)),
        }
    }
}
