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

//! Core type definitions for Keydex
//!
//! This module defines the fundamental types: DataType, CompareResult,
//! Operator, IndexMethod, IndexConstraint, ScanDirection, ItemPointer.

use std::fmt;
use std::str::FromStr;

use super::error::Error;

/// Data types supported for key and tuple columns
///
/// `List` only ever appears as the right-hand side of an `IN` predicate;
/// it is never a column type and has no ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataType {
    /// 8-bit signed integer
    TinyInt = 0,

    /// 16-bit signed integer
    SmallInt = 1,

    /// 32-bit signed integer
    Integer = 2,

    /// 64-bit signed integer
    BigInt = 3,

    /// 64-bit floating point number
    Float = 4,

    /// Boolean true/false
    Boolean = 5,

    /// Short fixed-length string
    Char = 6,

    /// Variable-length string (payload owned by a pool)
    Varchar = 7,

    /// Timestamp with timezone (stored as UTC)
    Timestamp = 8,

    /// IN-list right-hand side; not a column type
    List = 9,
}

impl DataType {
    /// Returns true for the signed integer widths
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::TinyInt | DataType::SmallInt | DataType::Integer | DataType::BigInt
        )
    }

    /// Returns true if this type is numeric (any integer width or FLOAT)
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, DataType::Float)
    }

    /// Returns true if values of this type admit a total ordering
    pub fn is_orderable(&self) -> bool {
        !matches!(self, DataType::List)
    }

    /// Returns true if the payload lives in a variable-length pool
    pub fn is_variable_length(&self) -> bool {
        matches!(self, DataType::Varchar)
    }

    /// Fixed byte width of the inlined representation, None for varlen
    pub fn fixed_length(&self) -> Option<usize> {
        match self {
            DataType::TinyInt | DataType::Boolean => Some(1),
            DataType::SmallInt => Some(2),
            DataType::Integer => Some(4),
            DataType::BigInt | DataType::Float | DataType::Timestamp => Some(8),
            DataType::Char | DataType::Varchar | DataType::List => None,
        }
    }

    /// Returns the type ID as u8 for serialization
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Create DataType from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DataType::TinyInt),
            1 => Some(DataType::SmallInt),
            2 => Some(DataType::Integer),
            3 => Some(DataType::BigInt),
            4 => Some(DataType::Float),
            5 => Some(DataType::Boolean),
            6 => Some(DataType::Char),
            7 => Some(DataType::Varchar),
            8 => Some(DataType::Timestamp),
            9 => Some(DataType::List),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::TinyInt => write!(f, "TINYINT"),
            DataType::SmallInt => write!(f, "SMALLINT"),
            DataType::Integer => write!(f, "INTEGER"),
            DataType::BigInt => write!(f, "BIGINT"),
            DataType::Float => write!(f, "FLOAT"),
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Char => write!(f, "CHAR"),
            DataType::Varchar => write!(f, "VARCHAR"),
            DataType::Timestamp => write!(f, "TIMESTAMP"),
            DataType::List => write!(f, "LIST"),
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TINYINT" => Ok(DataType::TinyInt),
            "SMALLINT" => Ok(DataType::SmallInt),
            "INTEGER" | "INT" => Ok(DataType::Integer),
            "BIGINT" => Ok(DataType::BigInt),
            "FLOAT" | "DOUBLE" | "REAL" => Ok(DataType::Float),
            "BOOLEAN" | "BOOL" => Ok(DataType::Boolean),
            "CHAR" => Ok(DataType::Char),
            "VARCHAR" | "TEXT" | "STRING" => Ok(DataType::Varchar),
            "TIMESTAMP" | "DATETIME" => Ok(DataType::Timestamp),
            _ => Err(Error::invalid_argument(format!("unknown data type: {}", s))),
        }
    }
}

/// Outcome of a three-way value comparison
///
/// `Incomparable` arises only when one side is an IN-list value; the
/// predicate engine maps it to set-membership semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareResult {
    Less,
    Equal,
    Greater,
    Incomparable,
}

impl CompareResult {
    pub fn from_ordering(ord: std::cmp::Ordering) -> Self {
        match ord {
            std::cmp::Ordering::Less => CompareResult::Less,
            std::cmp::Ordering::Equal => CompareResult::Equal,
            std::cmp::Ordering::Greater => CompareResult::Greater,
        }
    }
}

/// Comparison operators for index predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operator {
    /// Equality (=)
    Eq = 0,

    /// Inequality (!=)
    Ne = 1,

    /// Less than (<)
    Lt = 2,

    /// Less than or equal (<=)
    Le = 3,

    /// Greater than (>)
    Gt = 4,

    /// Greater than or equal (>=)
    Ge = 5,

    /// Value in list (IN)
    In = 6,
}

impl Operator {
    /// Returns the negation of this operator
    pub fn negate(&self) -> Option<Self> {
        match self {
            Operator::Eq => Some(Operator::Ne),
            Operator::Ne => Some(Operator::Eq),
            Operator::Lt => Some(Operator::Ge),
            Operator::Le => Some(Operator::Gt),
            Operator::Gt => Some(Operator::Le),
            Operator::Ge => Some(Operator::Lt),
            Operator::In => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq => write!(f, "="),
            Operator::Ne => write!(f, "!="),
            Operator::Lt => write!(f, "<"),
            Operator::Le => write!(f, "<="),
            Operator::Gt => write!(f, ">"),
            Operator::Ge => write!(f, ">="),
            Operator::In => write!(f, "IN"),
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "=" | "==" => Ok(Operator::Eq),
            "!=" | "<>" => Ok(Operator::Ne),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Ge),
            "IN" => Ok(Operator::In),
            _ => Err(Error::invalid_argument(format!("unknown operator: {}", s))),
        }
    }
}

/// Index representation selector
///
/// A selector only: the factory maps both tree tags onto the ordered-map
/// implementation. `Hash` has no ordered-scan story and is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexMethod {
    /// Latch-based balanced tree
    BTree,

    /// Lock-free tree variant
    BwTree,

    /// Hash table (unsupported by this engine)
    Hash,
}

impl fmt::Display for IndexMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexMethod::BTree => write!(f, "btree"),
            IndexMethod::BwTree => write!(f, "bwtree"),
            IndexMethod::Hash => write!(f, "hash"),
        }
    }
}

/// Constraint class the index enforces for the owning table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexConstraint {
    /// Plain secondary index
    #[default]
    Default,

    /// Backs a UNIQUE constraint
    Unique,

    /// Backs the primary key
    PrimaryKey,
}

impl fmt::Display for IndexConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexConstraint::Default => write!(f, "default"),
            IndexConstraint::Unique => write!(f, "unique"),
            IndexConstraint::PrimaryKey => write!(f, "primary_key"),
        }
    }
}

/// Direction of a positioned range scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    Forward,
    Backward,
}

/// Locator of a row in the owning table: block id plus slot offset
///
/// Opaque to the index; compared only for equality by the delete path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemPointer {
    /// Block (tile group / page) id
    pub block: u32,
    /// Slot offset within the block
    pub offset: u32,
}

impl ItemPointer {
    /// Create a new item pointer
    pub fn new(block: u32, offset: u32) -> Self {
        Self { block, offset }
    }
}

impl fmt::Display for ItemPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.block, self.offset)
    }
}
