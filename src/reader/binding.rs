//! Header analysis and column-to-field binding
//!
//! This module maps header column names to positions and intersects them with
//! a record descriptor to produce the binding table used for every data line.

use crate::constants::{DELIMITER, UTF8_BOM};
use crate::error::SchemaError;
use crate::record::{FieldSetter, FieldType, RecordDescriptor};
use std::collections::HashMap;
use tracing::debug;

/// Column name to position mapping parsed from a header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPositions {
    name_to_index: HashMap<String, usize>,
    column_count: usize,
}

impl ColumnPositions {
    /// Parse a header line into column positions.
    ///
    /// A byte-order mark is stripped from the first column only. Names are not
    /// trimmed; a repeated name maps to its right-most position.
    pub fn parse(header: &str) -> Result<Self, SchemaError> {
        if header.is_empty() {
            return Err(SchemaError::EmptyHeader);
        }

        let mut name_to_index = HashMap::new();
        let mut column_count = 0;

        for (index, name) in header.split(DELIMITER).enumerate() {
            let name = if index == 0 {
                name.strip_prefix(UTF8_BOM).unwrap_or(name)
            } else {
                name
            };
            name_to_index.insert(name.to_string(), index);
            column_count = index + 1;
        }

        Ok(Self {
            name_to_index,
            column_count,
        })
    }

    /// Get the index for a given column name
    pub fn get(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Check if a column exists in the header
    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// Number of columns in the header line
    pub fn len(&self) -> usize {
        self.column_count
    }

    pub fn is_empty(&self) -> bool {
        self.column_count == 0
    }
}

/// Binding of one column position to a record field
pub struct FieldBinding<T> {
    column: usize,
    name: &'static str,
    setter: FieldSetter<T>,
}

impl<T> FieldBinding<T> {
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn setter(&self) -> &FieldSetter<T> {
        &self.setter
    }

    pub fn field_type(&self) -> FieldType {
        self.setter.field_type()
    }
}

impl<T> std::fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("column", &self.column)
            .field("name", &self.name)
            .field("type", &self.field_type())
            .finish()
    }
}

/// Immutable column position to field binding table, built once per file
pub struct BindingTable<T> {
    slots: Vec<Option<FieldBinding<T>>>,
}

impl<T> std::fmt::Debug for BindingTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.bindings()).finish()
    }
}

impl<T> BindingTable<T> {
    /// Bind a header line onto a record descriptor.
    ///
    /// Every required descriptor field must have a header column. Columns
    /// without a matching field stay unbound and are ignored when assembling.
    /// Unsupported field types are bound here and only fail when a value is
    /// assigned.
    pub fn build(header: &str, descriptor: &RecordDescriptor<T>) -> Result<Self, SchemaError> {
        let positions = ColumnPositions::parse(header)?;
        Self::from_positions(&positions, descriptor)
    }

    /// Bind already parsed column positions onto a record descriptor
    pub fn from_positions(
        positions: &ColumnPositions,
        descriptor: &RecordDescriptor<T>,
    ) -> Result<Self, SchemaError> {
        let mut slots: Vec<Option<FieldBinding<T>>> =
            std::iter::repeat_with(|| None).take(positions.len()).collect();

        for field in descriptor.fields() {
            match positions.get(field.name()) {
                Some(column) => {
                    slots[column] = Some(FieldBinding {
                        column,
                        name: field.name(),
                        setter: field.setter(),
                    });
                }
                None if field.is_required() => {
                    return Err(SchemaError::MissingColumn {
                        field: field.name().to_string(),
                    });
                }
                None => debug!("Optional field '{}' has no header column", field.name()),
            }
        }

        let table = Self { slots };
        debug!(
            "Column binding: {} columns, {} bound",
            positions.len(),
            table.len()
        );

        Ok(table)
    }

    /// Binding for a column position, if that column is bound
    pub fn get(&self, column: usize) -> Option<&FieldBinding<T>> {
        self.slots.get(column).and_then(Option::as_ref)
    }

    /// Bound bindings in ascending column order
    pub fn bindings(&self) -> impl Iterator<Item = &FieldBinding<T>> {
        self.slots.iter().flatten()
    }

    /// Bound column positions in ascending order
    pub fn bound_columns(&self) -> Vec<usize> {
        self.bindings().map(FieldBinding::column).collect()
    }

    /// Number of bound columns
    pub fn len(&self) -> usize {
        self.bindings().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
