//! Configuration management and validation.
//!
//! The reader recognizes two settings: the file to load and the number of
//! worker threads that assemble records.

use crate::error::{ReaderError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Settings for one [`CsvFileReader`](crate::reader::CsvFileReader)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Path of the delimited file to load
    pub file_path: PathBuf,

    /// Number of worker threads for concurrent record assembly
    pub workers: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::new(),
            workers: num_cpus::get(),
        }
    }
}

impl ReaderConfig {
    /// Create configuration for a file with the default worker count
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Check that the configuration can drive a reader
    pub fn validate(&self) -> Result<()> {
        if self.file_path.as_os_str().is_empty() {
            return Err(ReaderError::configuration("No input file specified"));
        }

        if self.workers == 0 {
            return Err(ReaderError::configuration("Worker count must be at least 1"));
        }

        debug!(
            "Configuration valid: file={}, workers={}",
            self.file_path.display(),
            self.workers
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_available_cores() {
        let config = ReaderConfig::default();

        assert_eq!(config.workers, num_cpus::get());
        assert!(config.workers >= 1);
        assert!(config.file_path.as_os_str().is_empty());
    }

    #[test]
    fn test_builder() {
        let config = ReaderConfig::new("accounts.csv").with_workers(3);

        assert_eq!(config.file_path, PathBuf::from("accounts.csv"));
        assert_eq!(config.workers, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = ReaderConfig::new("accounts.csv").with_workers(0);

        match config.validate() {
            Err(ReaderError::Configuration { message }) => {
                assert!(message.contains("at least 1"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_missing_file() {
        let config = ReaderConfig::default();

        assert!(matches!(
            config.validate(),
            Err(ReaderError::Configuration { .. })
        ));
    }
}
