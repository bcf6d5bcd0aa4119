//! Flat-file snapshot cache for the dashboard table. One binary file, no
//! durability guarantees: a failed load just means the caller regenerates.

use crate::error::{AnalyticsError, Result};
use crate::table::TransactionTable;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Save/load a [`TransactionTable`] snapshot at a fixed path.
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the table to the cache file, replacing any previous
    /// snapshot.
    pub fn store(&self, table: &TransactionTable) -> Result<()> {
        let bytes = bincode::serialize(table)
            .map_err(|e| AnalyticsError::cache_write(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AnalyticsError::cache_write(e.to_string()))?;
        }
        fs::write(&self.path, &bytes)
            .map_err(|e| AnalyticsError::cache_write(e.to_string()))?;
        debug!("stored {} records to {}", table.len(), self.path.display());
        Ok(())
    }

    /// Load the snapshot. Missing file and undecodable file are distinct
    /// errors; both are recoverable by regenerating.
    pub fn load(&self) -> Result<TransactionTable> {
        if !self.path.exists() {
            return Err(AnalyticsError::cache_not_found(self.path.clone()));
        }
        let bytes = fs::read(&self.path)
            .map_err(|e| AnalyticsError::cache_decode(e.to_string()))?;
        let table = bincode::deserialize(&bytes)
            .map_err(|e| AnalyticsError::cache_decode(e.to_string()))?;
        Ok(table)
    }

    /// Load the snapshot, falling back to `regenerate` when the cache is
    /// missing or unreadable. The regenerated table is stored back on a
    /// best-effort basis.
    pub fn load_or_generate(
        &self,
        regenerate: impl FnOnce() -> TransactionTable,
    ) -> TransactionTable {
        match self.load() {
            Ok(table) => table,
            Err(e) => {
                warn!("snapshot load failed ({}); regenerating", e);
                let table = regenerate();
                if let Err(store_err) = self.store(&table) {
                    warn!("could not store regenerated snapshot: {}", store_err);
                }
                table
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datagen::{generate, GeneratorConfig};
    use crate::error::AnalyticsError;

    #[test]
    fn round_trips_a_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("dashboard_data.bin"));
        let table = generate(GeneratorConfig {
            records: 50,
            ..GeneratorConfig::default()
        });
        cache.store(&table).unwrap();
        assert_eq!(cache.load().unwrap(), table);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("absent.bin"));
        let err = cache.load().unwrap_err();
        assert!(matches!(err, AnalyticsError::CacheNotFound { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard_data.bin");
        std::fs::write(&path, b"not a snapshot").unwrap();
        let err = SnapshotCache::new(&path).load().unwrap_err();
        assert!(matches!(err, AnalyticsError::CacheDecode { .. }));
    }

    #[test]
    fn load_or_generate_falls_back_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("dashboard_data.bin"));
        let fresh = cache.load_or_generate(|| {
            generate(GeneratorConfig {
                records: 10,
                ..GeneratorConfig::default()
            })
        });
        assert_eq!(fresh.len(), 10);
        // Second call hits the stored snapshot, not the closure
        let cached = cache.load_or_generate(|| unreachable!("snapshot should exist"));
        assert_eq!(cached, fresh);
    }
}
