//! Entry point wiring for the `stockroom` binary.

pub mod config;
pub mod demo;

pub use config::AppConfig;
pub use demo::run_demo;
