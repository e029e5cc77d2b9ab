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

//! Core types and definitions for Keydex
//!
//! This module contains the fundamental types used throughout the engine:
//!
//! - [`DataType`] - column/value types (integer widths, FLOAT, CHAR, ...)
//! - [`Operator`] - comparison operators for index predicates
//! - [`Value`] - runtime values with type information
//! - [`Schema`] / [`Column`] - ordered typed column lists
//! - [`Tuple`] - a fixed-schema row
//! - [`ItemPointer`] - opaque (block, offset) row locator
//! - [`Error`] - error taxonomy for all index operations

pub mod error;
pub mod schema;
pub mod tuple;
pub mod types;
pub mod value;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use schema::{Column, Schema};
pub use tuple::Tuple;
pub use types::{
    CompareResult, DataType, IndexConstraint, IndexMethod, ItemPointer, Operator, ScanDirection,
};
pub use value::Value;
