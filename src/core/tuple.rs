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

//! Tuple type - a fixed-schema row of values
//!
//! Tuples are single-owner: either owned exclusively by their constructor
//! or handed off whole. String payloads are interned into the pool passed
//! to `set_value`, so the pool must outlive the tuple's string handles'
//! last use through it (the `Arc` handles themselves survive the pool).

use std::fmt;
use std::sync::Arc;

use super::error::{Error, Result};
use super::schema::Schema;
use super::value::Value;
use crate::common::VarlenPool;

/// A row conforming to a schema
#[derive(Debug, Clone)]
pub struct Tuple {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Tuple {
    /// Create a tuple with every column set to a typed NULL
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = schema
            .columns()
            .iter()
            .map(|column| Value::null(column.data_type))
            .collect();
        Self { schema, values }
    }

    /// The schema this tuple conforms to
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.values.len()
    }

    /// Value at column `index`
    pub fn value(&self, index: usize) -> &Value {
        &self.values[index]
    }

    /// All column values in schema order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Store `value` into column `index`
    ///
    /// The value's type must match the column's family; string payloads
    /// are interned into `pool` and retagged to the column's string type.
    pub fn set_value(&mut self, index: usize, value: Value, pool: &VarlenPool) -> Result<()> {
        let column_count = self.schema.column_count();
        if index >= column_count {
            return Err(Error::invalid_argument(format!(
                "column index {} out of range for schema with {} columns",
                index, column_count
            )));
        }

        let column = self.schema.column(index);
        let expected = column.data_type;

        let stored = match value {
            Value::Null(_) => Value::null(expected),
            Value::Char(s) | Value::Varchar(s) if expected.is_variable_length() => {
                Value::Varchar(pool.allocate(&s)?)
            }
            Value::Char(s) | Value::Varchar(s) if expected == super::types::DataType::Char => {
                Value::Char(pool.allocate(&s)?)
            }
            other if other.data_type() == expected => other,
            other => {
                return Err(Error::type_mismatch(
                    &column.name,
                    expected,
                    other.data_type(),
                ))
            }
        };

        self.values[index] = stored;
        Ok(())
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Column;
    use crate::core::types::DataType;

    fn key_schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Column::fixed(DataType::Integer, "A", true),
            Column::varchar(1024, "B"),
        ]))
    }

    #[test]
    fn test_new_tuple_is_null() {
        let tuple = Tuple::new(key_schema());
        assert_eq!(tuple.column_count(), 2);
        assert!(tuple.value(0).is_null());
        assert_eq!(tuple.value(0).data_type(), DataType::Integer);
        assert_eq!(tuple.value(1).data_type(), DataType::Varchar);
    }

    #[test]
    fn test_set_and_get() {
        let pool = VarlenPool::new();
        let mut tuple = Tuple::new(key_schema());
        tuple.set_value(0, Value::integer(100), &pool).unwrap();
        tuple.set_value(1, Value::varchar("a"), &pool).unwrap();

        assert_eq!(*tuple.value(0), Value::integer(100));
        assert_eq!(tuple.value(1).as_str(), Some("a"));
        assert_eq!(tuple.to_string(), "(100, a)");
    }

    #[test]
    fn test_string_payload_goes_through_pool() {
        let pool = VarlenPool::new();
        let mut tuple = Tuple::new(key_schema());
        tuple.set_value(1, Value::varchar("hello"), &pool).unwrap();
        assert_eq!(pool.allocated_bytes(), 5);

        // pool release does not invalidate the stored handle
        pool.release_all();
        assert_eq!(tuple.value(1).as_str(), Some("hello"));
    }

    #[test]
    fn test_char_retag_into_varchar_column() {
        let pool = VarlenPool::new();
        let mut tuple = Tuple::new(key_schema());
        tuple.set_value(1, Value::char_str("x"), &pool).unwrap();
        assert_eq!(tuple.value(1).data_type(), DataType::Varchar);
    }

    #[test]
    fn test_type_mismatch() {
        let pool = VarlenPool::new();
        let mut tuple = Tuple::new(key_schema());
        let err = tuple.set_value(0, Value::varchar("1"), &pool).unwrap_err();
        assert_eq!(
            err,
            Error::type_mismatch("A", DataType::Integer, DataType::Varchar)
        );
    }

    #[test]
    fn test_out_of_range_index() {
        let pool = VarlenPool::new();
        let mut tuple = Tuple::new(key_schema());
        assert!(tuple.set_value(5, Value::integer(1), &pool).is_err());
    }

    #[test]
    fn test_null_retyped_to_column() {
        let pool = VarlenPool::new();
        let mut tuple = Tuple::new(key_schema());
        tuple
            .set_value(0, Value::null(DataType::Varchar), &pool)
            .unwrap();
        assert_eq!(tuple.value(0).data_type(), DataType::Integer);
    }
}
