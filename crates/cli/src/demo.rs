//! Fixed demonstration sequence run by the binary.

use std::io::Write;

use anyhow::Context;

use stockroom_inventory::{ActivityLog, InventoryStore};

use crate::config::AppConfig;

/// Exercise the store end to end and print the results to `out`.
///
/// Store failures are absorbed and logged by the store itself; the only
/// error surfaced here is a failure to write to `out`.
pub fn run_demo<W: Write>(config: &AppConfig, out: &mut W) -> anyhow::Result<()> {
    let mut store = InventoryStore::new();
    let mut activity = ActivityLog::new();

    store.add("apple", 10, Some(&mut activity));
    store.add("banana", 2, Some(&mut activity));
    store.add("orange", 1, Some(&mut activity));

    store.remove("apple", 3);
    store.remove("grapes", 1);

    writeln!(out, "Apple stock: {}", store.quantity("apple")).context("failed to write stock line")?;
    writeln!(out, "Low items: {:?}", store.low_items(config.low_stock_threshold))
        .context("failed to write low items")?;

    store.save(&config.data_path);
    store.load(&config.data_path);
    store.write_report(out).context("failed to write report")?;

    tracing::info!("Program executed successfully.");

    writeln!(out, "\nActivity Logs:").context("failed to write activity header")?;
    for entry in &activity {
        writeln!(out, "{entry}").context("failed to write activity entry")?;
    }
    Ok(())
}
