//! Test utilities for reader testing
//!
//! Shared record types, sinks and temporary-file helpers used across the
//! reader test modules.

use std::io::{self, Read, Write};
use std::sync::Mutex;
use tempfile::NamedTempFile;

use crate::error::{ProcessingError, SetterError};
use crate::reader::OutcomeSink;
use crate::record::{FieldDescriptor, Record, RecordDescriptor};


/// Record with one field of each supported type
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestAccount {
    pub id: i64,
    pub name: String,
    pub balance: i32,
}

impl Record for TestAccount {
    fn descriptor() -> RecordDescriptor<Self> {
        RecordDescriptor::new(TestAccount::default)
            .int64("id", |account, value| {
                account.id = value;
                Ok(())
            })
            .text("name", |account, value| {
                account.name = value;
                Ok(())
            })
            .int32("balance", |account, value| {
                account.balance = value;
                Ok(())
            })
    }
}

/// Descriptor whose balance setter rejects negative values
pub fn strict_balance_descriptor() -> RecordDescriptor<TestAccount> {
    RecordDescriptor::new(TestAccount::default)
        .int64("id", |account, value| {
            account.id = value;
            Ok(())
        })
        .text("name", |account, value| {
            account.name = value;
            Ok(())
        })
        .int32("balance", |account, value| {
            if value < 0 {
                return Err(SetterError::new("balance cannot be negative"));
            }
            account.balance = value;
            Ok(())
        })
}

/// Descriptor whose balance setter panics on values above 1
pub fn panicking_balance_descriptor() -> RecordDescriptor<TestAccount> {
    RecordDescriptor::new(TestAccount::default)
        .int64("id", |account, value| {
            account.id = value;
            Ok(())
        })
        .text("name", |account, value| {
            account.name = value;
            Ok(())
        })
        .int32("balance", |account, value| {
            if value > 1 {
                panic!("balance {} out of range", value);
            }
            account.balance = value;
            Ok(())
        })
}

/// Descriptor with an optional column of a type the converter cannot produce
pub fn descriptor_with_unsupported() -> RecordDescriptor<TestAccount> {
    TestAccount::descriptor().field(FieldDescriptor::unsupported("opened", "date").optional())
}

/// Sink that keeps every outcome for inspection
#[derive(Debug, Default)]
pub struct CollectingSink<T> {
    pub successes: Mutex<Vec<T>>,
    pub failures: Mutex<Vec<ProcessingError>>,
}

impl<T> CollectingSink<T> {
    pub fn new() -> Self {
        Self {
            successes: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    pub fn success_count(&self) -> usize {
        self.successes.lock().unwrap().len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.lock().unwrap().len()
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<ProcessingError>) {
        (
            self.successes.into_inner().unwrap(),
            self.failures.into_inner().unwrap(),
        )
    }
}

impl<T: Send> OutcomeSink<T> for CollectingSink<T> {
    fn on_success(&self, record: T) {
        self.successes.lock().unwrap().push(record);
    }

    fn on_fail(&self, error: ProcessingError) {
        self.failures.lock().unwrap().push(error);
    }
}

/// Helper to create an account file with the given data lines
pub fn create_account_csv(lines: &[&str]) -> String {
    let mut content = String::from("id,name,balance\n");
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    content
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Helper to create a temporary file from raw bytes
pub fn create_temp_file_bytes(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Input that fails every read, for chaining after good content
pub struct FailingInput;

impl Read for FailingInput {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("device unplugged"))
    }
}
