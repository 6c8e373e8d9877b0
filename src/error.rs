//! Error handling for CSV record loading.
//!
//! Provides error types for construction-time configuration problems, fatal
//! file and schema failures, and isolated per-line failures. Everything that
//! happens while a file is being processed is delivered to an
//! [`OutcomeSink`](crate::reader::OutcomeSink) as a [`ProcessingError`]; only
//! construction returns [`ReaderError`] directly.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a reader, before any file is touched
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to create worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ReaderError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;

/// Failure returned by a field setter for reasons other than type conversion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SetterError {
    message: String,
}

impl SetterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Header could not be bound onto the record descriptor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Header line is empty")]
    EmptyHeader,

    #[error("No header column found for required field '{field}'")]
    MissingColumn { field: String },
}

/// Failure assembling a single record from one line
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Invalid value '{value}' for field '{field}' (column {column}): {source}")]
    Conversion {
        column: usize,
        field: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Field '{field}' (column {column}) has unsupported type '{type_name}'")]
    UnsupportedType {
        column: usize,
        field: String,
        type_name: String,
    },

    #[error("Setter for field '{field}' (column {column}) failed: {source}")]
    SetterInvocation {
        column: usize,
        field: String,
        #[source]
        source: SetterError,
    },
}

impl RecordError {
    /// Column index the failure was raised for
    pub fn column(&self) -> usize {
        match self {
            Self::Conversion { column, .. }
            | Self::UnsupportedType { column, .. }
            | Self::SetterInvocation { column, .. } => *column,
        }
    }

    /// Name of the field the failure was raised for
    pub fn field(&self) -> &str {
        match self {
            Self::Conversion { field, .. }
            | Self::UnsupportedType { field, .. }
            | Self::SetterInvocation { field, .. } => field,
        }
    }
}

/// Terminal failure reported through the sink's failure path
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Cannot read file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No header line found in file: {path}")]
    MissingHeader { path: PathBuf },

    #[error("Schema binding failed for file {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("Failed to read line '{line}': {source}")]
    Line {
        line: String,
        #[source]
        source: RecordError,
    },
}

impl ProcessingError {
    /// Create a file access error with path context
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create a schema error with path context
    pub fn schema(path: impl Into<PathBuf>, source: SchemaError) -> Self {
        Self::Schema {
            path: path.into(),
            source,
        }
    }

    /// Create a per-line error carrying the offending line content
    pub fn line(line: impl Into<String>, source: RecordError) -> Self {
        Self::Line {
            line: line.into(),
            source,
        }
    }

    /// Content of the offending line, for per-line failures
    pub fn line_content(&self) -> Option<&str> {
        match self {
            Self::Line { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Whether this failure stopped the whole file rather than a single line
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Line { .. })
    }
}
