//! Tracing and logging setup shared by the stockroom binaries and tests.
//!
//! Diagnostics are emitted with the `tracing` macros everywhere else in the
//! workspace; this crate decides where they end up. The binary installs a
//! process-wide subscriber writing to the log file, tests install a scoped
//! one over a [`LogCapture`].

/// In-memory writer for asserting on log output.
pub mod capture;

/// `<timestamp> - <LEVEL> - <message>` line format.
pub mod format;

/// Subscriber construction and process-wide initialization.
pub mod subscriber;

pub use capture::LogCapture;
pub use format::LineFormat;
pub use subscriber::{LogConfig, init, open_log_file, subscriber_for};
