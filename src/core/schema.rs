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

//! Schema types for Keydex - column and schema definitions
//!
//! A schema is an ordered list of typed columns. A key schema additionally
//! carries an `indexed_columns` projection: the positions in the owning
//! table's tuple schema its key columns are drawn from.

use std::fmt;

use super::error::{Error, Result};
use super::types::DataType;

/// A column definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Data type of the column
    pub data_type: DataType,

    /// Byte length: the fixed width for inlined types, the declared
    /// maximum for variable-length types
    pub length: usize,

    /// Whether the column rejects NULL values
    pub not_null: bool,
}

impl Column {
    /// Create a new column definition
    pub fn new(data_type: DataType, length: usize, name: impl Into<String>, not_null: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            length,
            not_null,
        }
    }

    /// Create a fixed-width column using the type's inlined width
    pub fn fixed(data_type: DataType, name: impl Into<String>, not_null: bool) -> Self {
        let length = data_type.fixed_length().unwrap_or(0);
        Self::new(data_type, length, name, not_null)
    }

    /// Create a VARCHAR column with a declared maximum length
    pub fn varchar(length: usize, name: impl Into<String>) -> Self {
        Self::new(DataType::Varchar, length, name, false)
    }

    /// Returns true if the payload lives in a variable-length pool
    pub fn is_variable_length(&self) -> bool {
        self.data_type.is_variable_length()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if self.data_type.is_variable_length() {
            write!(f, "({})", self.length)?;
        }
        if self.not_null {
            write!(f, " NOT NULL")?;
        }
        Ok(())
    }
}

/// An ordered sequence of typed columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
    /// Tuple-schema positions this key schema is drawn from; empty for
    /// plain tuple schemas
    indexed_columns: Vec<usize>,
}

impl Schema {
    /// Create a schema from an ordered column list
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            indexed_columns: Vec::new(),
        }
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column definition at `index`
    ///
    /// Panics on out-of-range indices; callers bounds-check user input
    /// before reaching here.
    pub fn column(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    /// All columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Data type of the column at `index`
    pub fn data_type(&self, index: usize) -> DataType {
        self.columns[index].data_type
    }

    /// Record which tuple-schema positions this key schema projects
    pub fn set_indexed_columns(&mut self, positions: Vec<usize>) {
        self.indexed_columns = positions;
    }

    /// Tuple-schema positions this key schema projects
    pub fn indexed_columns(&self) -> &[usize] {
        &self.indexed_columns
    }

    /// Build a key schema from this tuple schema
    ///
    /// The projection is recorded on the result as its `indexed_columns`.
    pub fn project(&self, positions: &[usize]) -> Result<Schema> {
        let mut columns = Vec::with_capacity(positions.len());
        for &pos in positions {
            let column = self.columns.get(pos).ok_or_else(|| {
                Error::invalid_argument(format!(
                    "key attribute {} out of range for schema with {} columns",
                    pos,
                    self.columns.len()
                ))
            })?;
            columns.push(column.clone());
        }
        let mut schema = Schema::new(columns);
        schema.set_indexed_columns(positions.to_vec());
        Ok(schema)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", column)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema::new(vec![
            Column::fixed(DataType::Integer, "A", true),
            Column::varchar(1024, "B"),
            Column::fixed(DataType::Float, "C", true),
            Column::fixed(DataType::Integer, "D", true),
        ])
    }

    #[test]
    fn test_column_display() {
        assert_eq!(
            Column::fixed(DataType::Integer, "A", true).to_string(),
            "A INTEGER NOT NULL"
        );
        assert_eq!(Column::varchar(1024, "B").to_string(), "B VARCHAR(1024)");
    }

    #[test]
    fn test_schema_accessors() {
        let schema = sample_schema();
        assert_eq!(schema.column_count(), 4);
        assert_eq!(schema.column(1).name, "B");
        assert_eq!(schema.data_type(2), DataType::Float);
        assert!(schema.column(0).not_null);
        assert!(!schema.column(1).not_null);
    }

    #[test]
    fn test_project_key_schema() {
        let tuple_schema = sample_schema();
        let key_schema = tuple_schema.project(&[0, 1]).unwrap();
        assert_eq!(key_schema.column_count(), 2);
        assert_eq!(key_schema.column(0).name, "A");
        assert_eq!(key_schema.column(1).name, "B");
        assert_eq!(key_schema.indexed_columns(), &[0, 1]);
    }

    #[test]
    fn test_project_out_of_range() {
        let tuple_schema = sample_schema();
        assert!(tuple_schema.project(&[0, 9]).is_err());
    }

    #[test]
    fn test_schema_display() {
        let schema = sample_schema().project(&[0, 1]).unwrap();
        assert_eq!(schema.to_string(), "(A INTEGER NOT NULL, B VARCHAR(1024))");
    }
}
