//! Internal logging system for the Galaxy3D camera rig
//!
//! This module provides a small logging facade with:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error) with a global minimum
//! - Colored console output by default
//! - Thread-safe logger storage with RwLock
//! - File and line information for detailed ERROR logs

use colored::*;
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to route rig diagnostics into the host's own
/// log sink (file, in-game console, test capture, etc.)
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_camera_rig::galaxy3d::log::{Logger, LogEntry};
///
/// struct ConsoleOverlay;
///
/// impl Logger for ConsoleOverlay {
///     fn log(&self, entry: &LogEntry) {
///         // Push to the in-game console...
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
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source component (e.g., "galaxy3d::Rig", "galaxy3d::Clipping")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-tick details (probe results, degenerate casts)
    Trace,

    /// Development/debugging information
    Debug,

    /// Lifecycle events (activation, deactivation)
    Info,

    /// Potential issues
    Warn,

    /// Errors, logged with file:line details
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by the default logger
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let label = entry.severity.label();
        let severity_str = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            );
        } else {
            println!("[{}] [{}] [{}] {}", timestamp, severity_str, source, entry.message);
        }
    }
}

// ===== GLOBAL FACADE =====

struct LogState {
    logger: Box<dyn Logger>,
    min_severity: LogSeverity,
}

/// Global logger (initialized with DefaultLogger, Info and above)
static LOG_STATE: OnceLock<RwLock<LogState>> = OnceLock::new();

fn state() -> &'static RwLock<LogState> {
    LOG_STATE.get_or_init(|| {
        RwLock::new(LogState {
            logger: Box::new(DefaultLogger),
            min_severity: LogSeverity::Info,
        })
    })
}

/// Replace the current logger.
pub fn set_logger<L: Logger + 'static>(logger: L) {
    if let Ok(mut lock) = state().write() {
        lock.logger = Box::new(logger);
    }
}

/// Restore the DefaultLogger and the default minimum severity (Info).
pub fn reset_logger() {
    if let Ok(mut lock) = state().write() {
        lock.logger = Box::new(DefaultLogger);
        lock.min_severity = LogSeverity::Info;
    }
}

/// Drop every entry below `severity`.
pub fn set_min_severity(severity: LogSeverity) {
    if let Ok(mut lock) = state().write() {
        lock.min_severity = severity;
    }
}

/// Current minimum severity.
pub fn min_severity() -> LogSeverity {
    state()
        .read()
        .map(|lock| lock.min_severity)
        .unwrap_or(LogSeverity::Info)
}

/// Log without file:line (used by rig_trace! .. rig_warn!)
pub fn log(severity: LogSeverity, source: &str, message: String) {
    dispatch(severity, source, message, None, None);
}

/// Log with file:line (used by rig_error! and rig_err!)
pub fn log_detailed(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    dispatch(severity, source, message, Some(file), Some(line));
}

fn dispatch(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: Option<&'static str>,
    line: Option<u32>,
) {
    if let Ok(lock) = state().read() {
        if severity < lock.min_severity {
            return;
        }
        lock.logger.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file,
            line,
        });
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (per-tick details)
#[macro_export]
macro_rules! rig_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Trace, $source, format!($($arg)*))
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! rig_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Debug, $source, format!($($arg)*))
    };
}

/// Log an INFO message
///
/// # Example
///
/// ```no_run
/// galaxy_3d_camera_rig::rig_info!("galaxy3d::Rig", "Rig activated (zoom {})", -5.0);
/// ```
#[macro_export]
macro_rules! rig_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Info, $source, format!($($arg)*))
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! rig_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Warn, $source, format!($($arg)*))
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! rig_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR and build the matching `Error` variant.
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_camera_rig::rig_err;
///
/// let err = rig_err!("galaxy3d::RigHierarchy", MissingReference, "{} is not assigned", "XAxis");
/// ```
#[macro_export]
macro_rules! rig_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::galaxy3d::Error::$variant(message)
    }};
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
