//! Timer state storage.
//!
//! Persists settings, stats, and history to the key-value store. Reads never
//! fail: missing or unparsable values are replaced by defaults.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::records::{HistoryEntry, Settings, Stats};
use crate::core::KeyValueStore;
use crate::error::PomoError;

/// Key for the history list (JSON array of strings, newest first).
pub const HISTORY_KEY: &str = "history";
/// Key for cumulative stats.
pub const STATS_KEY: &str = "stats";
/// Key for user-chosen durations.
pub const TIME_SETTINGS_KEY: &str = "timeSettings";

/// Storage for timer settings, stats, and history.
pub struct FocusStorage<S> {
    store: S,
}

impl<S: KeyValueStore> FocusStorage<S> {
    /// Wrap a key-value store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Give back the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load settings, falling back to defaults.
    pub fn load_settings(&self) -> Settings {
        self.read_json::<Settings>(TIME_SETTINGS_KEY)
            .map(Settings::sanitized)
            .unwrap_or_default()
    }

    /// Save settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), PomoError> {
        self.write_json(TIME_SETTINGS_KEY, settings)
    }

    /// Load stats, falling back to zeroes.
    pub fn load_stats(&self) -> Stats {
        self.read_json(STATS_KEY).unwrap_or_default()
    }

    /// Save stats.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save_stats(&mut self, stats: &Stats) -> Result<(), PomoError> {
        self.write_json(STATS_KEY, stats)
    }

    /// Load history, newest first. Unparsable lines are dropped.
    pub fn load_history(&self) -> Vec<HistoryEntry> {
        let lines: Vec<String> = self.read_json(HISTORY_KEY).unwrap_or_default();
        let total = lines.len();

        let entries: Vec<HistoryEntry> = lines
            .iter()
            .filter_map(|line| HistoryEntry::parse_line(line))
            .collect();

        if entries.len() < total {
            tracing::debug!(
                dropped = total - entries.len(),
                "discarded unparsable history lines"
            );
        }

        entries
    }

    /// Save history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save_history(&mut self, history: &[HistoryEntry]) -> Result<(), PomoError> {
        let lines: Vec<String> = history.iter().map(HistoryEntry::to_line).collect();
        self.write_json(HISTORY_KEY, &lines)
    }

    /// Remove the stored history.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear_history(&mut self) -> Result<(), PomoError> {
        self.store.remove(HISTORY_KEY)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(key, error = %e, "failed to read stored value");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "discarded unparsable stored value");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), PomoError> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryStore;
    use chrono::NaiveDate;

    fn create_test_storage() -> FocusStorage<MemoryStore> {
        FocusStorage::new(MemoryStore::new())
    }

    fn entry(day: u32) -> HistoryEntry {
        HistoryEntry::work(
            NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_defaults_when_empty() {
        let storage = create_test_storage();

        assert_eq!(storage.load_settings(), Settings::default());
        assert_eq!(storage.load_stats(), Stats::default());
        assert!(storage.load_history().is_empty());
    }

    #[test]
    fn test_stats_roundtrip() {
        let mut storage = create_test_storage();
        let stats = Stats {
            completed_count: 7,
            total_work_seconds: 10_500,
            total_break_seconds: 2_400,
        };

        storage.save_stats(&stats).unwrap();

        assert_eq!(storage.load_stats(), stats);
    }

    #[test]
    fn test_stats_stored_shape() {
        let mut storage = create_test_storage();
        storage.save_stats(&Stats::default()).unwrap();

        let raw = storage.into_inner().get(STATS_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"{"completedCount":0,"totalWorkSeconds":0,"totalBreakSeconds":0}"#
        );
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set(STATS_KEY, "{not json").unwrap();
        store.set(TIME_SETTINGS_KEY, "42").unwrap();
        store.set(HISTORY_KEY, r#"{"a":1}"#).unwrap();
        let storage = FocusStorage::new(store);

        assert_eq!(storage.load_stats(), Stats::default());
        assert_eq!(storage.load_settings(), Settings::default());
        assert!(storage.load_history().is_empty());
    }

    #[test]
    fn test_zero_settings_sanitized() {
        let mut store = MemoryStore::new();
        store
            .set(TIME_SETTINGS_KEY, r#"{"workMinutes":0,"breakMinutes":10}"#)
            .unwrap();
        let storage = FocusStorage::new(store);

        let settings = storage.load_settings();
        assert_eq!(settings.work_minutes, 25);
        assert_eq!(settings.break_minutes, 10);
    }

    #[test]
    fn test_history_keeps_order_and_drops_garbage() {
        let mut store = MemoryStore::new();
        store
            .set(
                HISTORY_KEY,
                r#"["2024/05/03 10:00 - work","garbage","2024/05/01 10:00 - work"]"#,
            )
            .unwrap();
        let storage = FocusStorage::new(store);

        let history = storage.load_history();
        assert_eq!(history, vec![entry(3), entry(1)]);
    }

    #[test]
    fn test_history_roundtrip_and_clear() {
        let mut storage = create_test_storage();
        let history = vec![entry(2), entry(1)];

        storage.save_history(&history).unwrap();
        assert_eq!(storage.load_history(), history);

        storage.clear_history().unwrap();
        assert!(storage.load_history().is_empty());
    }
}
