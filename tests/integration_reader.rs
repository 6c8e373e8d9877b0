//! Integration tests for loading account files through the public API
//!
//! These tests drive the reader end to end: temporary files on disk, the
//! sample `Account` record, and caller-side sinks.

use csv_record_reader::models::Account;
use csv_record_reader::{
    CallbackSink, CountingSink, CsvFileReader, ProcessingError, ReaderConfig, Record,
    RecordDescriptor, SchemaError, SetterError,
};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn load_accounts(content: &str, workers: usize) -> (Vec<Account>, Vec<ProcessingError>) {
    let file = write_file(content);
    let reader = CsvFileReader::<Account>::new(file.path(), workers).unwrap();

    let loaded = Mutex::new(Vec::new());
    let failed = Mutex::new(Vec::new());
    let sink = CallbackSink::new(
        |account: Account| loaded.lock().unwrap().push(account),
        |error| failed.lock().unwrap().push(error),
    );

    reader.process(&sink);

    let mut loaded = loaded.into_inner().unwrap();
    loaded.sort();
    (loaded, failed.into_inner().unwrap())
}

/// Test the documented example line with quotes and mixed integer widths
#[test]
fn test_example_account_line() {
    let (accounts, failures) = load_accounts("id,name,balance\n7,\"Alice\",1500\n", 2);

    assert!(failures.is_empty());
    assert_eq!(
        accounts,
        vec![Account {
            id: 7,
            name: "Alice".to_string(),
            balance: 1500,
        }]
    );
}

/// Test that a bad line fails alone and later lines still load
#[test]
fn test_failure_does_not_stop_following_lines() {
    let (accounts, failures) =
        load_accounts("id,name,balance\n1,Ann,abc\n2,Ben,20\n3,Cal,30\n", 3);

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].name, "Ben");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].line_content(), Some("1,Ann,abc"));
    assert!(!failures[0].is_fatal());
}

/// Test that results are identical for one worker and many workers
#[test]
fn test_same_records_for_any_worker_count() {
    let mut content = String::from("\u{feff}id,name,balance\n");
    for i in 0..1_000i64 {
        content.push_str(&format!("{},\"customer-{}\",{}\n", i * 1_000_000_007, i, i % 97));
    }

    let (single, single_failures) = load_accounts(&content, 1);
    let (many, many_failures) = load_accounts(&content, 8);

    assert!(single_failures.is_empty());
    assert!(many_failures.is_empty());
    assert_eq!(single.len(), 1_000);
    assert_eq!(single, many);
}

/// Test that a missing column stops the load before any line is read
#[test]
fn test_schema_failure_reported_once() {
    let file = write_file("id,name\n1,Ann\n2,Ben\n");
    let reader = CsvFileReader::<Account>::new(file.path(), 4).unwrap();
    let sink = CountingSink::new(CallbackSink::new(
        |_: Account| panic!("no line should be dispatched"),
        |error| {
            assert!(matches!(
                error,
                ProcessingError::Schema {
                    source: SchemaError::MissingColumn { .. },
                    ..
                }
            ));
        },
    ));

    reader.process(&sink);

    let summary = sink.summary();
    assert_eq!(summary.fatal_errors, 1);
    assert_eq!(summary.total_lines, 0);
    assert!(!summary.is_successful());
}

/// Test configuration-driven construction end to end
#[test]
fn test_load_from_config() {
    let file = write_file("name,balance,id\n\"Zed\",5,99\nYan,6,98\n");
    let config = ReaderConfig::new(file.path()).with_workers(2);
    let reader = CsvFileReader::<Account>::from_config(&config).unwrap();

    let sink = CountingSink::new(CallbackSink::new(|_: Account| {}, |_| {}));
    reader.process(&sink);

    let summary = sink.summary();
    assert_eq!(summary.records_loaded, 2);
    assert_eq!(summary.success_rate(), 100.0);
    assert!(summary.is_successful());
}

#[derive(Debug, Default)]
struct Product {
    sku: String,
    stock: i32,
}

impl Record for Product {
    fn descriptor() -> RecordDescriptor<Self> {
        RecordDescriptor::new(Product::default)
            .text("sku", |product, value| {
                if value.is_empty() {
                    return Err(SetterError::new("sku is required"));
                }
                product.sku = value;
                Ok(())
            })
            .int32("stock", |product, value| {
                product.stock = value;
                Ok(())
            })
    }
}

/// Test a caller-defined record type with a validating setter
#[test]
fn test_custom_record_type() {
    let file = write_file("sku,stock,warehouse\nA-1,10,north\n,4,south\nB-2,0,east\n");
    let reader = CsvFileReader::<Product>::new(file.path(), 2).unwrap();

    let stock = Mutex::new(Vec::new());
    let sink = CountingSink::new(CallbackSink::new(
        |product: Product| stock.lock().unwrap().push((product.sku, product.stock)),
        |_| {},
    ));
    reader.process(&sink);

    let mut stock = std::mem::take(&mut *stock.lock().unwrap());
    stock.sort();
    assert_eq!(stock, vec![("A-1".to_string(), 10), ("B-2".to_string(), 0)]);
    assert_eq!(sink.summary().lines_failed, 1);
}
