//! CSV Record Reader Library
//!
//! Loads delimited text files into caller-defined record types. The first line
//! of a file names the columns; every following line becomes one record whose
//! fields are bound by column name.
//!
//! This library provides:
//! - Static record descriptors (field name, setter, declared type) in place of
//!   runtime introspection
//! - One-time header binding shared read-only by all workers
//! - Sequential line reading feeding a fixed-size worker pool
//! - Per-line failure isolation with success/failure delivery through a sink

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod reader;
pub mod record;

pub use config::ReaderConfig;
pub use error::{ProcessingError, ReaderError, RecordError, Result, SchemaError, SetterError};
pub use reader::{CallbackSink, CountingSink, CsvFileReader, LoadSummary, OutcomeSink};
pub use record::{FieldDescriptor, FieldType, FieldValue, Record, RecordDescriptor};
