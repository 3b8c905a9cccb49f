//! The in-memory stock store.

use std::io::{self, Write};
use std::path::Path;

use stockroom_core::{DomainError, DomainResult, ItemName, Quantity};

use crate::activity::ActivityLog;
use crate::persistence::{PersistenceError, StockMap, read_stock_file, write_stock_file};

/// Items strictly below this quantity count as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: Quantity = 5;

/// Result of a successful removal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Removal {
    /// Some stock is left.
    Partial { remaining: Quantity },
    /// The quantity reached zero or below and the item was dropped.
    OutOfStock,
}

/// Item name -> quantity mapping, kept in insertion order.
///
/// Invariant: a removal never leaves an item stored at zero or below.
/// Adds are unguarded, so a negative add can still produce such an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryStore {
    stock: StockMap,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stock(stock: StockMap) -> Self {
        Self { stock }
    }

    /// Add `qty` of `item`, creating the line if needed.
    ///
    /// Failures are logged and leave the store untouched. When `log` is
    /// given, a successful add is recorded into it.
    pub fn add(&mut self, item: &str, qty: Quantity, log: Option<&mut ActivityLog>) {
        match self.try_add(item, qty) {
            Ok(_) => {
                if let Some(log) = log {
                    log.record_added(item, qty);
                }
                tracing::info!("Added {qty} of {item}");
            }
            Err(DomainError::Validation(reason)) => {
                tracing::warn!("Invalid item or quantity: {item:?}, {qty} ({reason})");
            }
            Err(err) => {
                tracing::error!("Error adding item: {err}");
            }
        }
    }

    /// Fallible core of [`add`](Self::add). Returns the new quantity.
    ///
    /// Zero and negative quantities are accepted.
    pub fn try_add(&mut self, item: &str, qty: Quantity) -> DomainResult<Quantity> {
        let name = ItemName::parse(item)?;
        let updated = self
            .quantity(name.as_str())
            .checked_add(qty)
            .ok_or_else(|| DomainError::invariant(format!("quantity overflow adding {qty} of {name}")))?;

        // Existing keys keep their position.
        self.stock.insert(name.into_inner(), updated);
        Ok(updated)
    }

    /// Remove `qty` of `item`; the line is dropped once it reaches zero.
    ///
    /// Removing an unknown item is a logged no-op.
    pub fn remove(&mut self, item: &str, qty: Quantity) {
        match self.try_remove(item, qty) {
            Ok(Removal::OutOfStock) => {
                tracing::info!("Removed item: {item} (out of stock)");
            }
            Ok(Removal::Partial { .. }) => {
                tracing::info!("Removed {qty} of {item}");
            }
            Err(DomainError::NotFound(_)) => {
                tracing::warn!("Attempted to remove non-existent item: {item}");
            }
            Err(err) => {
                tracing::error!("Error removing item: {err}");
            }
        }
    }

    /// Fallible core of [`remove`](Self::remove).
    pub fn try_remove(&mut self, item: &str, qty: Quantity) -> DomainResult<Removal> {
        let Some(slot) = self.stock.get_mut(item) else {
            return Err(DomainError::not_found(item));
        };

        let remaining = slot
            .checked_sub(qty)
            .ok_or_else(|| DomainError::invariant(format!("quantity overflow removing {qty} of {item}")))?;

        if remaining > 0 {
            *slot = remaining;
            return Ok(Removal::Partial { remaining });
        }

        self.stock.shift_remove(item);
        Ok(Removal::OutOfStock)
    }

    /// Current quantity, or 0 for unknown items.
    pub fn quantity(&self, item: &str) -> Quantity {
        self.stock.get(item).copied().unwrap_or(0)
    }

    /// Names of items strictly below `threshold`, in insertion order.
    pub fn low_items(&self, threshold: Quantity) -> Vec<String> {
        self.stock
            .iter()
            .filter(|(_, qty)| **qty < threshold)
            .map(|(item, _)| item.clone())
            .collect()
    }

    pub fn low_items_default(&self) -> Vec<String> {
        self.low_items(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    /// Replace the whole inventory with the contents of `path`.
    ///
    /// A missing or unreadable file leaves the inventory empty; nothing is
    /// returned to the caller beyond the log record.
    pub fn load(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self.try_load(path) {
            Ok(()) => {
                tracing::info!("Loaded data from {}", path.display());
            }
            Err(PersistenceError::NotFound { .. }) => {
                tracing::warn!(
                    "File not found: {}. Starting with empty inventory.",
                    path.display()
                );
            }
            Err(PersistenceError::Malformed { source, .. }) => {
                tracing::error!(
                    "Invalid JSON format in {} ({source}). Starting with empty inventory.",
                    path.display()
                );
            }
            Err(err) => {
                tracing::error!("Error loading data: {err}. Starting with empty inventory.");
            }
        }
    }

    /// Fallible core of [`load`](Self::load). On error the inventory is left empty.
    pub fn try_load(&mut self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        match read_stock_file(path.as_ref()) {
            Ok(stock) => {
                self.stock = stock;
                Ok(())
            }
            Err(err) => {
                self.stock.clear();
                Err(err)
            }
        }
    }

    /// Persist the inventory to `path`. Failures are logged, not returned.
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self.try_save(path) {
            Ok(()) => tracing::info!("Saved data to {}", path.display()),
            Err(err) => tracing::error!("Error saving data: {err}"),
        }
    }

    pub fn try_save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        write_stock_file(path.as_ref(), &self.stock)
    }

    /// Render the items report.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Items Report:")?;
        for (item, qty) in &self.stock {
            writeln!(out, "{item} -> {qty}")?;
        }
        Ok(())
    }

    /// Print the items report to stdout.
    pub fn report(&self) {
        if let Err(err) = self.write_report(&mut io::stdout().lock()) {
            tracing::error!("Error printing report: {err}");
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.stock.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    pub fn clear(&mut self) {
        self.stock.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.stock.iter().map(|(item, qty)| (item.as_str(), *qty))
    }

    pub fn as_map(&self) -> &StockMap {
        &self.stock
    }
}

impl FromIterator<(String, Quantity)> for InventoryStore {
    fn from_iter<I: IntoIterator<Item = (String, Quantity)>>(iter: I) -> Self {
        Self {
            stock: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::captured;
    use proptest::prelude::*;

    fn stocked() -> InventoryStore {
        let mut store = InventoryStore::new();
        store.add("apple", 10, None);
        store.add("banana", 2, None);
        store.add("orange", 1, None);
        store
    }

    fn snapshot(store: &InventoryStore) -> Vec<(String, Quantity)> {
        store.iter().map(|(item, qty)| (item.to_string(), qty)).collect()
    }

    #[test]
    fn demo_scenario() {
        let mut store = stocked();

        store.remove("apple", 3);
        assert_eq!(store.quantity("apple"), 7);

        store.remove("grapes", 1);
        assert_eq!(
            snapshot(&store),
            vec![
                ("apple".to_string(), 7),
                ("banana".to_string(), 2),
                ("orange".to_string(), 1),
            ]
        );

        assert_eq!(store.low_items(5), vec!["banana", "orange"]);
        assert_eq!(store.low_items_default(), vec!["banana", "orange"]);
    }

    #[test]
    fn add_accumulates_and_records_activity() {
        let mut store = InventoryStore::new();
        let mut log = ActivityLog::new();

        let (_, capture) = captured(|| {
            store.add("apple", 4, Some(&mut log));
            store.add("apple", 6, Some(&mut log));
            store.add("pear", 1, None);
        });

        assert_eq!(store.quantity("apple"), 10);
        assert_eq!(store.quantity("pear"), 1);
        let messages: Vec<&str> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["Added 4 of apple", "Added 6 of apple"]);
        assert_eq!(
            capture.messages_at("INFO"),
            vec!["Added 4 of apple", "Added 6 of apple", "Added 1 of pear"]
        );
    }

    #[test]
    fn add_rejects_blank_name_with_warning() {
        let mut store = stocked();
        let before = store.clone();
        let mut log = ActivityLog::new();

        let (_, capture) = captured(|| store.add("  ", 3, Some(&mut log)));

        assert_eq!(store, before);
        assert!(log.is_empty());
        let warnings = capture.messages_at("WARNING");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Invalid item or quantity"));
    }

    #[test]
    fn add_accepts_negative_quantities() {
        let mut store = stocked();

        store.add("apple", -4, None);
        assert_eq!(store.quantity("apple"), 6);

        store.add("kiwi", -2, None);
        assert_eq!(store.quantity("kiwi"), -2);
        assert!(store.contains("kiwi"));
    }

    #[test]
    fn add_overflow_is_logged_as_error() {
        let mut store = InventoryStore::new();
        store.add("bolts", Quantity::MAX, None);

        let (_, capture) = captured(|| store.add("bolts", 1, None));

        assert_eq!(store.quantity("bolts"), Quantity::MAX);
        assert_eq!(capture.messages_at("ERROR").len(), 1);
    }

    #[test]
    fn remove_absent_item_is_noop_with_warning() {
        let mut store = stocked();
        let before = store.clone();

        let (_, capture) = captured(|| store.remove("grapes", 1));

        assert_eq!(store, before);
        assert_eq!(
            capture.messages_at("WARNING"),
            vec!["Attempted to remove non-existent item: grapes"]
        );
    }

    #[test]
    fn remove_to_zero_or_below_drops_item() {
        let mut store = stocked();

        let (_, capture) = captured(|| {
            store.remove("banana", 2);
            store.remove("orange", 5);
        });

        assert!(!store.contains("banana"));
        assert!(!store.contains("orange"));
        assert_eq!(store.quantity("orange"), 0);
        assert_eq!(
            capture.messages_at("INFO"),
            vec![
                "Removed item: banana (out of stock)",
                "Removed item: orange (out of stock)",
            ]
        );
    }

    #[test]
    fn try_remove_reports_outcome() {
        let mut store = stocked();

        assert_eq!(store.try_remove("apple", 3), Ok(Removal::Partial { remaining: 7 }));
        assert_eq!(store.try_remove("orange", 1), Ok(Removal::OutOfStock));
        assert_eq!(
            store.try_remove("grapes", 1),
            Err(DomainError::NotFound("grapes".to_string()))
        );
    }

    #[test]
    fn remove_keeps_order_of_remaining_items() {
        let mut store = stocked();
        store.remove("apple", 10);
        store.add("apple", 1, None);

        let names: Vec<&str> = store.iter().map(|(item, _)| item).collect();
        assert_eq!(names, vec!["banana", "orange", "apple"]);
    }

    #[test]
    fn remove_overflow_is_logged_as_error() {
        let mut store = InventoryStore::new();
        store.add("nuts", -5, None);

        let (_, capture) = captured(|| store.remove("nuts", Quantity::MAX));

        assert_eq!(store.quantity("nuts"), -5);
        assert_eq!(capture.messages_at("ERROR").len(), 1);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        let store = stocked();

        let (_, capture) = captured(|| store.save(&path));
        assert_eq!(
            capture.messages_at("INFO"),
            vec![format!("Saved data to {}", path.display())]
        );

        let mut reloaded = InventoryStore::new();
        reloaded.add("stale", 99, None);
        reloaded.load(&path);

        assert_eq!(reloaded, store);
    }

    #[test]
    fn load_missing_file_empties_inventory_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let mut store = stocked();

        let (_, capture) = captured(|| store.load(&path));

        assert!(store.is_empty());
        assert_eq!(
            capture.messages_at("WARNING"),
            vec![format!(
                "File not found: {}. Starting with empty inventory.",
                path.display()
            )]
        );
    }

    #[test]
    fn load_invalid_json_empties_inventory_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, "{\"apple\": ").unwrap();
        let mut store = stocked();

        let (_, capture) = captured(|| store.load(&path));

        assert!(store.is_empty());
        let errors = capture.messages_at("ERROR");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with(&format!("Invalid JSON format in {}", path.display())));
        assert!(errors[0].ends_with("Starting with empty inventory."));
    }

    #[test]
    fn try_load_surfaces_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = stocked();

        let err = store.try_load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, PersistenceError::NotFound { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn save_failure_is_logged_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("inventory.json");
        let store = stocked();

        let (_, capture) = captured(|| store.save(&path));

        assert!(!path.exists());
        let errors = capture.messages_at("ERROR");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error saving data: "));
    }

    #[test]
    fn report_lists_items_in_order() {
        let mut store = stocked();
        store.remove("apple", 3);

        let mut out = Vec::new();
        store.write_report(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Items Report:\napple -> 7\nbanana -> 2\norange -> 1\n"
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, Quantity),
        Remove(usize, Quantity),
    }

    const NAMES: [&str; 4] = ["apple", "banana", "orange", "pear"];

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..NAMES.len(), 1..50i64).prop_map(|(i, q)| Op::Add(i, q)),
            (0..NAMES.len(), 1..50i64).prop_map(|(i, q)| Op::Remove(i, q)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: quantity equals adds minus removals, and an item vanishes
        /// as soon as a removal takes it to zero or below.
        #[test]
        fn quantity_tracks_running_total(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut store = InventoryStore::new();
            let mut expected: [Option<Quantity>; NAMES.len()] = [None; NAMES.len()];

            for op in &ops {
                match *op {
                    Op::Add(i, q) => {
                        store.add(NAMES[i], q, None);
                        expected[i] = Some(expected[i].unwrap_or(0) + q);
                    }
                    Op::Remove(i, q) => {
                        store.remove(NAMES[i], q);
                        expected[i] = match expected[i] {
                            Some(current) if current - q > 0 => Some(current - q),
                            _ => None,
                        };
                    }
                }
            }

            for (i, name) in NAMES.iter().enumerate() {
                prop_assert_eq!(store.contains(name), expected[i].is_some());
                prop_assert_eq!(store.quantity(name), expected[i].unwrap_or(0));
            }
        }

        /// Property: low_items returns exactly the items strictly below the threshold.
        #[test]
        fn low_items_matches_threshold(
            quantities in prop::collection::vec(-10..20i64, 0..NAMES.len()),
            threshold in -5..25i64,
        ) {
            let store: InventoryStore = NAMES
                .iter()
                .zip(&quantities)
                .map(|(name, qty)| (name.to_string(), *qty))
                .collect();

            let low = store.low_items(threshold);
            for (name, qty) in store.iter() {
                prop_assert_eq!(low.iter().any(|l| l == name), qty < threshold);
            }
            prop_assert!(low.iter().all(|l| store.quantity(l) < threshold));
        }
    }
}
