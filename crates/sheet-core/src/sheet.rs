//! Relational sheet types consumed by the exporter

use crate::value::{Value, ValueKind};
use std::collections::BTreeMap;

/// A named sheet: a header plus rows keyed by an integer
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Sheet name, possibly path-like (e.g. "bgm/track1")
    pub name: String,
    /// Column definitions
    pub header: Header,
    /// Row data, in storage order (not necessarily sorted by key)
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create a new sheet with no rows
    pub fn new(name: impl Into<String>, header: Header) -> Self {
        Self {
            name: name.into(),
            header,
            rows: Vec::new(),
        }
    }

    /// Builder-style row insertion
    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.header.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a row by key
    pub fn find_row(&self, key: i32) -> Option<&Row> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Rows ordered by ascending key
    pub fn rows_by_key(&self) -> Vec<&Row> {
        let mut rows: Vec<&Row> = self.rows.iter().collect();
        rows.sort_by_key(|r| r.key);
        rows
    }
}

/// Ordered column definitions; the order is the CSV column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub columns: Vec<Column>,
}

impl Header {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A column definition
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column index, unique within the sheet
    pub index: u32,
    /// Column name (may be empty)
    pub name: String,
    /// Declared value type tag (e.g. "int32", "str", "bool", "single")
    pub value_type: String,
}

impl Column {
    /// Create a new column
    pub fn new(index: u32, name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            value_type: value_type.into(),
        }
    }

    /// The value kind named by this column's type tag
    pub fn kind(&self) -> ValueKind {
        ValueKind::from_tag(&self.value_type)
    }
}

/// A row of data, addressed by column index
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Row key, unique within the sheet
    pub key: i32,
    /// Values by column index; a missing entry is a null cell
    values: BTreeMap<u32, Value>,
}

impl Row {
    /// Create an empty row
    pub fn new(key: i32) -> Self {
        Self {
            key,
            values: BTreeMap::new(),
        }
    }

    /// Set the value at a column index; `None` makes the cell null
    pub fn set(&mut self, index: u32, value: Option<Value>) {
        match value {
            Some(value) => {
                self.values.insert(index, value);
            }
            None => {
                self.values.remove(&index);
            }
        }
    }

    /// Builder-style [`Row::set`]
    pub fn with(mut self, index: u32, value: impl Into<Option<Value>>) -> Self {
        self.set(index, value.into());
        self
    }

    /// Get a cell value by column index. Indices with nothing stored read as null.
    pub fn get(&self, index: u32) -> Option<&Value> {
        self.values.get(&index)
    }

    /// Number of non-null cells
    pub fn value_count(&self) -> usize {
        self.values.len()
    }
}
