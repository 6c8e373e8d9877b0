//! Concurrent CSV record reader
//!
//! The reader binds a file's header onto a record descriptor once, then reads
//! the remaining lines sequentially on the calling thread and hands each line
//! to a fixed-size worker pool for splitting, conversion and assembly.
//!
//! ## Architecture
//!
//! - [`binding`] - header parsing and column to field binding
//! - [`splitter`] - line splitting and quote stripping
//! - [`conversion`] - token to typed value conversion
//! - [`assembler`] - record assembly for one line
//! - [`sink`] - outcome delivery
//!
//! ## Usage
//!
//! ```rust,no_run
//! use csv_record_reader::models::Account;
//! use csv_record_reader::reader::{CallbackSink, CsvFileReader};
//!
//! # fn example() -> csv_record_reader::Result<()> {
//! let reader = CsvFileReader::<Account>::new("accounts.csv", 4)?;
//! let sink = CallbackSink::new(
//!     |account: Account| println!("Loaded {}", account),
//!     |error| eprintln!("Failed: {}", error),
//! );
//!
//! // Returns once every line has been reported to the sink
//! reader.process(&sink);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod binding;
pub mod conversion;
pub mod sink;
pub mod splitter;

#[cfg(test)]
pub mod tests;

pub use binding::{BindingTable, ColumnPositions, FieldBinding};
pub use sink::{CallbackSink, CountingSink, DiscardSink, LoadSummary, OutcomeSink};

use self::assembler::assemble_line;
use crate::config::ReaderConfig;
use crate::constants::WORKER_THREAD_PREFIX;
use crate::error::{ProcessingError, ReaderError, Result};
use crate::record::{Record, RecordDescriptor};

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Reader that loads one delimited file into records of type `T`
pub struct CsvFileReader<T> {
    file_path: PathBuf,
    workers: usize,
    descriptor: RecordDescriptor<T>,
    thread_pool: ThreadPool,
}

impl<T: Record> CsvFileReader<T> {
    /// Create a reader for a record type that describes itself
    pub fn new(file_path: impl Into<PathBuf>, workers: usize) -> Result<Self> {
        Self::with_descriptor(file_path, workers, T::descriptor())
    }

    /// Create a reader from validated configuration
    pub fn from_config(config: &ReaderConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.file_path.clone(), config.workers)
    }
}

impl<T: Send> CsvFileReader<T> {
    /// Create a reader with an explicit record descriptor
    pub fn with_descriptor(
        file_path: impl Into<PathBuf>,
        workers: usize,
        descriptor: RecordDescriptor<T>,
    ) -> Result<Self> {
        if workers == 0 {
            return Err(ReaderError::configuration("Worker count must be at least 1"));
        }

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("{}-{}", WORKER_THREAD_PREFIX, i))
            .build()?;

        Ok(Self {
            file_path: file_path.into(),
            workers,
            descriptor,
            thread_pool,
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn descriptor(&self) -> &RecordDescriptor<T> {
        &self.descriptor
    }

    /// Load every data line of the file, reporting each outcome to `sink`.
    ///
    /// Blocks until all dispatched lines have reached the sink. File and
    /// header failures are reported once through [`OutcomeSink::on_fail`] and
    /// no line is dispatched; this method never returns an error itself.
    pub fn process<S: OutcomeSink<T>>(&self, sink: &S) {
        info!(
            "Reading CSV file: {} ({} workers)",
            self.file_path.display(),
            self.workers
        );

        match File::open(&self.file_path) {
            Ok(file) => self.process_input(BufReader::new(file), sink),
            Err(e) => {
                warn!("Cannot open {}: {}", self.file_path.display(), e);
                sink.on_fail(ProcessingError::file_access(&self.file_path, e));
            }
        }
    }

    /// Header binding and line dispatch over an already opened input
    fn process_input<R: BufRead, S: OutcomeSink<T>>(&self, mut input: R, sink: &S) {
        let start_time = Instant::now();
        let mut buffer = Vec::new();

        let header = match read_line(&mut input, &mut buffer) {
            Ok(Some(header)) => header,
            Ok(None) => {
                warn!("No header line in {}", self.file_path.display());
                sink.on_fail(ProcessingError::MissingHeader {
                    path: self.file_path.clone(),
                });
                return;
            }
            Err(e) => {
                warn!("Cannot read header of {}: {}", self.file_path.display(), e);
                sink.on_fail(ProcessingError::file_access(&self.file_path, e));
                return;
            }
        };

        let bindings = match BindingTable::build(&header, &self.descriptor) {
            Ok(bindings) => bindings,
            Err(e) => {
                warn!("Header of {} does not bind: {}", self.file_path.display(), e);
                sink.on_fail(ProcessingError::schema(&self.file_path, e));
                return;
            }
        };
        debug!("Bound columns: {:?}", bindings.bound_columns());

        let bindings = &bindings;
        let factory = self.descriptor.factory();
        let mut dispatched = 0usize;

        // The scope returns only after every spawned line has finished.
        self.thread_pool.in_place_scope(|scope| {
            loop {
                let line = match read_line(&mut input, &mut buffer) {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!(
                            "Read error in {} after {} lines: {}",
                            self.file_path.display(),
                            dispatched,
                            e
                        );
                        sink.on_fail(ProcessingError::file_access(&self.file_path, e));
                        break;
                    }
                };

                dispatched += 1;
                scope.spawn(move |_| match assemble_line(&line, bindings, factory) {
                    Ok(record) => sink.on_success(record),
                    Err(e) => {
                        debug!("Line rejected: {}", e);
                        sink.on_fail(ProcessingError::line(line, e));
                    }
                });
            }
        });

        info!(
            "Processed {} lines from {} in {:.2}s",
            dispatched,
            self.file_path.display(),
            start_time.elapsed().as_secs_f64()
        );
    }
}

/// Read one line without its `\n` or `\r\n` terminator.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD so a badly encoded
/// line still reaches a worker. Returns `None` at end of input.
fn read_line<R: BufRead>(input: &mut R, buffer: &mut Vec<u8>) -> io::Result<Option<String>> {
    buffer.clear();
    if input.read_until(b'\n', buffer)? == 0 {
        return Ok(None);
    }

    if buffer.last() == Some(&b'\n') {
        buffer.pop();
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(buffer).into_owned()))
}

impl<T> fmt::Debug for CsvFileReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvFileReader")
            .field("file_path", &self.file_path)
            .field("workers", &self.workers)
            .field("descriptor", &self.descriptor)
            .finish()
    }
}
