//! Logging and observability
//!
//! Structured logging through `tracing`, with console output and optional
//! JSON log files.
//!
//! # Example
//!
//! ```no_run
//! use coupe::logging::init_logging;
//! use coupe::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a bulk operation
///
/// # Example
///
/// ```no_run
/// use coupe::log_bulk_start;
///
/// log_bulk_start!("import", 12);
/// ```
#[macro_export]
macro_rules! log_bulk_start {
    ($operation:expr, $count:expr) => {
        tracing::info!(
            operation = $operation,
            count = $count,
            "Starting bulk operation"
        );
    };
}

/// Log the completion of a bulk operation
///
/// # Example
///
/// ```no_run
/// use coupe::log_bulk_complete;
/// use std::time::Duration;
///
/// log_bulk_complete!("delete", 9, 1, Duration::from_millis(40));
/// ```
#[macro_export]
macro_rules! log_bulk_complete {
    ($operation:expr, $succeeded:expr, $failed:expr, $duration:expr) => {
        tracing::info!(
            operation = $operation,
            succeeded = $succeeded,
            failed = $failed,
            duration_ms = $duration.as_millis() as u64,
            "Bulk operation completed"
        );
    };
}

/// Log a single failed entry inside a bulk operation
///
/// # Example
///
/// ```no_run
/// use coupe::log_record_failure;
/// use coupe::domain::CoupeError;
///
/// let error = CoupeError::Validation("name is required".to_string());
/// log_record_failure!("import", 3, &error);
/// ```
#[macro_export]
macro_rules! log_record_failure {
    ($operation:expr, $index:expr, $error:expr) => {
        tracing::warn!(
            operation = $operation,
            index = $index,
            error = %$error,
            "Record failed"
        );
    };
}
