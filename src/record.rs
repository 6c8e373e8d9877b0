//! Record descriptors: the static description of a target type's fields.
//!
//! A [`RecordDescriptor`] lists, for one record type, each settable field
//! together with its setter and declared type. Column names in a file header
//! are matched against the field names listed here. Setters are plain function
//! pointers, so a descriptor is `Send + Sync` whatever the record type and can
//! be shared by every worker without locking.
//!
//! ```rust
//! use csv_record_reader::record::{Record, RecordDescriptor};
//!
//! #[derive(Debug, Default)]
//! struct City {
//!     name: String,
//!     population: i64,
//! }
//!
//! impl Record for City {
//!     fn descriptor() -> RecordDescriptor<Self> {
//!         RecordDescriptor::new(City::default)
//!             .text("name", |city, value| {
//!                 city.name = value;
//!                 Ok(())
//!             })
//!             .int64("population", |city, value| {
//!                 city.population = value;
//!                 Ok(())
//!             })
//!     }
//! }
//! ```

use crate::error::SetterError;
use std::fmt;

/// Outcome of a setter call
pub type SetterResult = std::result::Result<(), SetterError>;

/// A type that can be loaded from a delimited file
pub trait Record: Sized + Send {
    /// Describe the fields that header columns may be bound to
    fn descriptor() -> RecordDescriptor<Self>;
}

/// Declared type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Int32,
    Int64,
    /// A type the converter cannot produce; assigning to it fails per line
    Unsupported(&'static str),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Int32 => write!(f, "int32"),
            FieldType::Int64 => write!(f, "int64"),
            FieldType::Unsupported(type_name) => write!(f, "{}", type_name),
        }
    }
}

/// Typed value produced from a raw token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Int32(i32),
    Int64(i64),
}

impl FieldValue {
    /// Declared type this value satisfies
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Int32(_) => FieldType::Int32,
            FieldValue::Int64(_) => FieldType::Int64,
        }
    }
}

/// Setter for one field, tagged by the value type it accepts
pub enum FieldSetter<T> {
    Text(fn(&mut T, String) -> SetterResult),
    Int32(fn(&mut T, i32) -> SetterResult),
    Int64(fn(&mut T, i64) -> SetterResult),
    Unsupported { type_name: &'static str },
}

impl<T> FieldSetter<T> {
    /// Declared type of the field this setter assigns
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldSetter::Text(_) => FieldType::Text,
            FieldSetter::Int32(_) => FieldType::Int32,
            FieldSetter::Int64(_) => FieldType::Int64,
            FieldSetter::Unsupported { type_name } => FieldType::Unsupported(type_name),
        }
    }

    /// Assign a converted value to the record
    pub fn apply(&self, record: &mut T, value: FieldValue) -> SetterResult {
        match (self, value) {
            (FieldSetter::Text(set), FieldValue::Text(value)) => set(record, value),
            (FieldSetter::Int32(set), FieldValue::Int32(value)) => set(record, value),
            (FieldSetter::Int64(set), FieldValue::Int64(value)) => set(record, value),
            (setter, value) => Err(SetterError::new(format!(
                "expected {} value, got {}",
                setter.field_type(),
                value.field_type()
            ))),
        }
    }
}

// Not derived: derive adds a `T: Clone` bound.
impl<T> Clone for FieldSetter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSetter<T> {}

impl<T> fmt::Debug for FieldSetter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldSetter")
            .field(&self.field_type())
            .finish()
    }
}

/// One settable field of a record type
pub struct FieldDescriptor<T> {
    name: &'static str,
    setter: FieldSetter<T>,
    required: bool,
}

impl<T> FieldDescriptor<T> {
    /// Describe a field; fields are required unless marked [`optional`](Self::optional)
    pub fn new(name: &'static str, setter: FieldSetter<T>) -> Self {
        Self {
            name,
            setter,
            required: true,
        }
    }

    pub fn text(name: &'static str, setter: fn(&mut T, String) -> SetterResult) -> Self {
        Self::new(name, FieldSetter::Text(setter))
    }

    pub fn int32(name: &'static str, setter: fn(&mut T, i32) -> SetterResult) -> Self {
        Self::new(name, FieldSetter::Int32(setter))
    }

    pub fn int64(name: &'static str, setter: fn(&mut T, i64) -> SetterResult) -> Self {
        Self::new(name, FieldSetter::Int64(setter))
    }

    pub fn unsupported(name: &'static str, type_name: &'static str) -> Self {
        Self::new(name, FieldSetter::Unsupported { type_name })
    }

    /// Allow the header to omit this field's column
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn setter(&self) -> FieldSetter<T> {
        self.setter
    }

    pub fn field_type(&self) -> FieldType {
        self.setter.field_type()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            setter: self.setter,
            required: self.required,
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("type", &self.field_type())
            .field("required", &self.required)
            .finish()
    }
}

/// Factory plus field list for one record type
pub struct RecordDescriptor<T> {
    factory: fn() -> T,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> RecordDescriptor<T> {
    /// Start a descriptor; `factory` builds the empty record each line starts from
    pub fn new(factory: fn() -> T) -> Self {
        Self {
            factory,
            fields: Vec::new(),
        }
    }

    /// Add a field
    pub fn field(mut self, field: FieldDescriptor<T>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn text(self, name: &'static str, setter: fn(&mut T, String) -> SetterResult) -> Self {
        self.field(FieldDescriptor::text(name, setter))
    }

    pub fn int32(self, name: &'static str, setter: fn(&mut T, i32) -> SetterResult) -> Self {
        self.field(FieldDescriptor::int32(name, setter))
    }

    pub fn int64(self, name: &'static str, setter: fn(&mut T, i64) -> SetterResult) -> Self {
        self.field(FieldDescriptor::int64(name, setter))
    }

    pub fn unsupported(self, name: &'static str, type_name: &'static str) -> Self {
        self.field(FieldDescriptor::unsupported(name, type_name))
    }

    pub fn factory(&self) -> fn() -> T {
        self.factory
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Build a fresh, unpopulated record
    pub fn create(&self) -> T {
        (self.factory)()
    }
}

impl<T> Clone for RecordDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory,
            fields: self.fields.clone(),
        }
    }
}

impl<T> fmt::Debug for RecordDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDescriptor")
            .field("fields", &self.fields)
            .finish()
    }
}
