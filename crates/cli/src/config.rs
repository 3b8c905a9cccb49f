//! Runtime configuration.

use std::path::PathBuf;

use stockroom_core::Quantity;
use stockroom_inventory::DEFAULT_LOW_STOCK_THRESHOLD;
use stockroom_observability::LogConfig;

/// Default stock file.
pub const DEFAULT_DATA_PATH: &str = "inventory.json";

/// Settings for one run. The binary always uses [`AppConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON stock file used for save/load.
    pub data_path: PathBuf,
    pub log: LogConfig,
    pub low_stock_threshold: Quantity,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            log: LogConfig::default(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}
