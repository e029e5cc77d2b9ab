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

//! Value type for Keydex - runtime values with type information
//!
//! A unified Value enum representing key columns and predicate operands.
//! Every value knows its [`DataType`]; comparison is a total three-way
//! `compare` within a type family, with [`CompareResult::Incomparable`]
//! reserved for the IN-list case where no ordering is defined.
//!
//! Note: Char and Varchar use Arc<str> for cheap cloning during key
//! copies. String payloads are interned into a [`VarlenPool`] when a value
//! is stored into a tuple, so an index key stays self-contained.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::{Error, Result};
use super::types::{CompareResult, DataType};
use crate::common::VarlenPool;

/// A runtime value with type information
///
/// Each variant carries its data directly; no interface indirection or
/// separate value references.
#[derive(Debug, Clone)]
pub enum Value {
    /// NULL value with a type hint
    Null(DataType),

    /// 8-bit signed integer
    TinyInt(i8),

    /// 16-bit signed integer
    SmallInt(i16),

    /// 32-bit signed integer
    Integer(i32),

    /// 64-bit signed integer
    BigInt(i64),

    /// 64-bit floating point
    Float(f64),

    /// Boolean value
    Boolean(bool),

    /// Short fixed-length string (Arc for cheap cloning)
    Char(Arc<str>),

    /// Variable-length string (Arc for cheap cloning; payload pool-owned)
    Varchar(Arc<str>),

    /// Timestamp (UTC)
    Timestamp(DateTime<Utc>),

    /// IN-list operand; only valid as a predicate right-hand side
    List(Arc<[Value]>),
}

impl Value {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a NULL value with a type hint
    pub fn null(data_type: DataType) -> Self {
        Value::Null(data_type)
    }

    /// Create a tinyint value
    pub fn tiny_int(value: i8) -> Self {
        Value::TinyInt(value)
    }

    /// Create a smallint value
    pub fn small_int(value: i16) -> Self {
        Value::SmallInt(value)
    }

    /// Create an integer value
    pub fn integer(value: i32) -> Self {
        Value::Integer(value)
    }

    /// Create a bigint value
    pub fn big_int(value: i64) -> Self {
        Value::BigInt(value)
    }

    /// Create a float value
    pub fn float(value: f64) -> Self {
        Value::Float(value)
    }

    /// Create a boolean value
    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    /// Create a fixed-length string value
    pub fn char_str(value: impl Into<String>) -> Self {
        Value::Char(Arc::from(value.into().as_str()))
    }

    /// Create a variable-length string value
    pub fn varchar(value: impl Into<String>) -> Self {
        Value::Varchar(Arc::from(value.into().as_str()))
    }

    /// Create a timestamp value
    pub fn timestamp(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }

    /// Create an IN-list value
    pub fn list(values: impl Into<Vec<Value>>) -> Self {
        Value::List(Arc::from(values.into()))
    }

    // =========================================================================
    // Type accessors
    // =========================================================================

    /// Returns the data type of this value
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null(dt) => *dt,
            Value::TinyInt(_) => DataType::TinyInt,
            Value::SmallInt(_) => DataType::SmallInt,
            Value::Integer(_) => DataType::Integer,
            Value::BigInt(_) => DataType::BigInt,
            Value::Float(_) => DataType::Float,
            Value::Boolean(_) => DataType::Boolean,
            Value::Char(_) => DataType::Char,
            Value::Varchar(_) => DataType::Varchar,
            Value::Timestamp(_) => DataType::Timestamp,
            Value::List(_) => DataType::List,
        }
    }

    /// Returns true if this value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    // =========================================================================
    // Value extractors
    // =========================================================================

    /// Extract as i64 (integer widths only)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::TinyInt(v) => Some(*v as i64),
            Value::SmallInt(v) => Some(*v as i64),
            Value::Integer(v) => Some(*v as i64),
            Value::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract as f64 (any numeric)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    /// Extract as string reference (Char/Varchar only)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Char(s) | Value::Varchar(s) => Some(s),
            _ => None,
        }
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Three-way comparison against another value
    ///
    /// Total within a type family: integer widths promote to i64, mixed
    /// integer/float promotes to f64, Char and Varchar compare as strings.
    /// NULL orders before every non-null value and equal to NULL. A List on
    /// either side is `Incomparable` (the IN-list case); so is a comparison
    /// across unrelated families.
    pub fn compare(&self, other: &Value) -> CompareResult {
        if matches!(self, Value::List(_)) || matches!(other, Value::List(_)) {
            return CompareResult::Incomparable;
        }

        match (self.is_null(), other.is_null()) {
            (true, true) => return CompareResult::Equal,
            (true, false) => return CompareResult::Less,
            (false, true) => return CompareResult::Greater,
            (false, false) => {}
        }

        let (lhs, rhs) = (self.data_type(), other.data_type());

        if lhs.is_integer() && rhs.is_integer() {
            // Unwraps cannot fail: both sides are integer widths
            let a = self.as_i64().unwrap();
            let b = other.as_i64().unwrap();
            return CompareResult::from_ordering(a.cmp(&b));
        }

        if lhs.is_numeric() && rhs.is_numeric() {
            let a = self.as_f64().unwrap();
            let b = other.as_f64().unwrap();
            return CompareResult::from_ordering(compare_floats(a, b));
        }

        match (self, other) {
            (Value::Char(a) | Value::Varchar(a), Value::Char(b) | Value::Varchar(b)) => {
                CompareResult::from_ordering(a.as_ref().cmp(b.as_ref()))
            }
            (Value::Boolean(a), Value::Boolean(b)) => CompareResult::from_ordering(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => CompareResult::from_ordering(a.cmp(b)),
            _ => CompareResult::Incomparable,
        }
    }

    /// Set membership against an IN-list value
    ///
    /// Returns false when the right-hand side is not a List.
    pub fn in_list(&self, list: &Value) -> bool {
        match list {
            Value::List(items) => items
                .iter()
                .any(|item| self.compare(item) == CompareResult::Equal),
            _ => false,
        }
    }

    /// Representable minimum for an ordered type
    ///
    /// Used to pad key columns a predicate leaves open. String minima are
    /// allocated from the supplied pool so the resulting key tuple is
    /// self-contained.
    pub fn min_value(data_type: DataType, pool: &VarlenPool) -> Result<Value> {
        match data_type {
            DataType::TinyInt => Ok(Value::TinyInt(i8::MIN)),
            DataType::SmallInt => Ok(Value::SmallInt(i16::MIN)),
            DataType::Integer => Ok(Value::Integer(i32::MIN)),
            DataType::BigInt => Ok(Value::BigInt(i64::MIN)),
            DataType::Float => Ok(Value::Float(f64::NEG_INFINITY)),
            DataType::Boolean => Ok(Value::Boolean(false)),
            DataType::Char => Ok(Value::Char(pool.allocate("")?)),
            DataType::Varchar => Ok(Value::Varchar(pool.allocate("")?)),
            DataType::Timestamp => Ok(Value::Timestamp(DateTime::<Utc>::MIN_UTC)),
            DataType::List => Err(Error::UnsupportedKeyType(DataType::List)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            _ => self.compare(other) == CompareResult::Equal,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null(_) => write!(f, "NULL"),
            Value::TinyInt(v) => write!(f, "{}", v),
            Value::SmallInt(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::BigInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Char(s) | Value::Varchar(s) => write!(f, "{}", s),
            Value::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Total float ordering: NaN sorts greater than all other values
fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
