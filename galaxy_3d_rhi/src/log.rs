//! Logging for render attachment layout building
//!
//! Everything the crate reports goes through one process-wide `Logger`
//! (see `Rhi::set_logger`). What is logged, by severity:
//! - `Trace`: each attachment added to the attachment table while `end()`
//!   resolves names (index, name, format, role, first subpass)
//! - `Debug`: the attachment and subpass counts of every layout built
//! - `Warn`: the first malformed declaration of a subpass, at the time it is
//!   declared, and a builder modified after `end()` without `reset()`
//! - `Error`: every error returned by `end()` or
//!   `RenderAttachmentConfiguration::new()`, with the file and line that
//!   reported it
//!
//! `DefaultLogger` prints colored lines to stdout.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Destination of the RHI log entries
///
/// Install one with `Rhi::set_logger` to forward layout diagnostics to an
/// editor console or a test harness.
///
/// # Example
///
/// ```no_run
/// use std::sync::Mutex;
/// use galaxy_3d_rhi::galaxy3d::log::{Logger, LogEntry, LogSeverity};
///
/// /// Keeps the layout errors for the material editor
/// struct LayoutErrorLog {
///     errors: Mutex<Vec<String>>,
/// }
///
/// impl Logger for LayoutErrorLog {
///     fn log(&self, entry: &LogEntry) {
///         if entry.severity == LogSeverity::Error {
///             self.errors.lock().unwrap().push(entry.message.clone());
///         }
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "galaxy3d::rhi::RenderAttachmentLayoutBuilder")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels, in increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-attachment detail
    Trace,
    /// Per-layout summary
    Debug,
    Info,
    /// Recoverable misuse, reported again by `end()`
    Warn,
    /// A layout or configuration could not be created
    Error,
}

impl LogSeverity {
    /// Fixed-width label used in log lines
    pub fn label(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Console logger installed until `Rhi::set_logger` replaces it
///
/// Line format: `[timestamp] [SEVERITY] [source] message`, followed by
/// `(file:line)` when the entry carries a location.
pub struct DefaultLogger;

fn local_timestamp(entry: &LogEntry) -> String {
    let datetime: DateTime<Local> = entry.timestamp.into();
    datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

fn location_suffix(entry: &LogEntry) -> String {
    match (entry.file, entry.line) {
        (Some(file), Some(line)) => format!(" ({}:{})", file, line),
        _ => String::new(),
    }
}

impl DefaultLogger {
    /// Format an entry without colors
    pub fn format_plain(entry: &LogEntry) -> String {
        format!(
            "[{}] [{}] [{}] {}{}",
            local_timestamp(entry),
            entry.severity.label(),
            entry.source,
            entry.message,
            location_suffix(entry)
        )
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let label = entry.severity.label();
        let severity = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };

        println!(
            "[{}] [{}] [{}] {}{}",
            local_timestamp(entry),
            severity,
            entry.source.bright_blue(),
            entry.message,
            location_suffix(entry)
        );
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
#[macro_export]
macro_rules! rhi_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Rhi::log(
            $crate::galaxy3d::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
///
/// # Example
///
/// ```ignore
/// rhi_debug!("galaxy3d::rhi::RenderAttachmentLayoutBuilder", "Built {} subpasses", count);
/// ```
#[macro_export]
macro_rules! rhi_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Rhi::log(
            $crate::galaxy3d::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! rhi_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Rhi::log(
            $crate::galaxy3d::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! rhi_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Rhi::log(
            $crate::galaxy3d::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! rhi_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Rhi::log_detailed(
            $crate::galaxy3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an error and return it from the current function
///
/// # Example
///
/// ```ignore
/// rhi_bail!("galaxy3d::rhi::RenderAttachmentLayoutBuilder",
///     Error::InvalidArgument("empty name".to_string()));
/// ```
#[macro_export]
macro_rules! rhi_bail {
    ($source:expr, $error:expr) => {{
        let error = $error;
        $crate::rhi_error!($source, "{}", error);
        return Err(error);
    }};
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
