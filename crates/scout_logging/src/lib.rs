#![deny(missing_docs)]
//! Shared logging utilities for the mapscout workspace.
//!
//! This crate provides the `scout_*` logging macros used across the codebase,
//! a per-thread scan label that prefixes pipeline messages, and a minimal test
//! initializer for the global logger.

use std::cell::RefCell;

thread_local! {
    /// Label of the (category, city) pair currently being scanned on this thread.
    static SCAN_LABEL: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Sets the scan label for the current thread.
/// The orchestrator calls this once per (category, city) pair.
pub fn set_scan_label(label: impl Into<String>) {
    let label = label.into();
    SCAN_LABEL.with(|v| *v.borrow_mut() = label);
}

/// Clears the scan label for the current thread.
pub fn clear_scan_label() {
    SCAN_LABEL.with(|v| v.borrow_mut().clear());
}

/// Retrieves the scan label for the current thread.
/// Returns an empty string outside of a scan.
pub fn scan_label() -> String {
    SCAN_LABEL.with(|v| v.borrow().clone())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! scout_trace {
    ($($arg:tt)*) => {{
        log::trace!("[{}] {}", $crate::scan_label(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! scout_info {
    ($($arg:tt)*) => {{
        log::info!("[{}] {}", $crate::scan_label(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! scout_debug {
    ($($arg:tt)*) => {{
        log::debug!("[{}] {}", $crate::scan_label(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! scout_warn {
    ($($arg:tt)*) => {{
        log::warn!("[{}] {}", $crate::scan_label(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! scout_error {
    ($($arg:tt)*) => {{
        log::error!("[{}] {}", $crate::scan_label(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
