//! Forwarding of the SDK's `log` records to a host-provided logger.
//!
//! The host registers a [`Logger`] once at startup; every record the SDK
//! emits through the `log` facade is forwarded to it. Debug and trace records
//! from other crates are dropped so host logs stay usable.

use std::sync::{Arc, OnceLock};

/// Sink for SDK log records, implemented by the host application.
#[uniffi::export(with_foreign)]
pub trait Logger: Send + Sync {
    /// Receives one log record.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a forwarded log record.
#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum LogLevel {
    /// Extremely detailed diagnostics.
    Trace,
    /// Debugging information.
    Debug,
    /// Progress of normal operation.
    Info,
    /// Potentially harmful situations.
    Warn,
    /// Failures the SDK recovered from or reported.
    Error,
}

static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// `log::Log` backend handing records to the registered [`Logger`].
struct ForeignLogger;

impl log::Log for ForeignLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let from_dropkit = record
            .module_path()
            .is_some_and(|path| path.starts_with("dropkit"));
        let verbose = matches!(record.level(), log::Level::Debug | log::Level::Trace);
        if verbose && !from_dropkit {
            return;
        }
        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(level_of(record.level()), format!("{}", record.args()));
        } else {
            eprintln!("logger not set: {}", record.args());
        }
    }

    fn flush(&self) {}
}

const fn level_of(level: log::Level) -> LogLevel {
    match level {
        log::Level::Error => LogLevel::Error,
        log::Level::Warn => LogLevel::Warn,
        log::Level::Info => LogLevel::Info,
        log::Level::Debug => LogLevel::Debug,
        log::Level::Trace => LogLevel::Trace,
    }
}

/// Registers the host logger and installs the forwarding backend.
///
/// Call once at application startup, before the first bridge operation.
/// Later calls are ignored, as is a `log` backend installed by someone else.
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>) {
    if LOGGER_INSTANCE.set(logger).is_err() {
        log::warn!("logger already set");
        return;
    }
    static FORWARDER: ForeignLogger = ForeignLogger;
    if log::set_logger(&FORWARDER).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}
