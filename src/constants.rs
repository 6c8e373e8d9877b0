//! Application constants for the CSV record reader
//!
//! File-format characters, configuration sources and default values used
//! throughout the reader.

// =============================================================================
// File Format
// =============================================================================

/// Column delimiter for header and data lines
pub const DELIMITER: char = ',';

/// Character that marks a quoted token
pub const QUOTE: char = '"';

/// Byte-order mark that may prefix the first header column
pub const UTF8_BOM: char = '\u{feff}';

// =============================================================================
// Configuration
// =============================================================================

/// Environment variable consulted for the input file when none is given
pub const ENV_FILE_PATH: &str = "CSV_READER_FILE";

/// Environment variable consulted for the worker count
pub const ENV_WORKERS: &str = "CSV_READER_WORKERS";

/// Prefix for worker thread names
pub const WORKER_THREAD_PREFIX: &str = "csv-worker";

/// Default tracing filter target
pub const LOG_TARGET: &str = "csv_record_reader";

// =============================================================================
// Reporting
// =============================================================================

/// Success rate (percent) above which a load is reported as successful
pub const SUCCESS_RATE_THRESHOLD: f64 = 90.0;

/// Spinner refresh interval for the progress display
pub const PROGRESS_TICK_MS: u64 = 120;
