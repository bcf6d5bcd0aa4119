//! Plugin marketplace bookkeeping: a static catalog, an install/activate
//! registry, and an injected storage backend for the config document.
//! Plugins are never executed here (that is out of scope); this module
//! only tracks which ones the user has installed and switched on.

use crate::error::{AnalyticsError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Descriptive metadata for one plugin in the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub icon: String,
    pub category: String,
}

impl PluginManifest {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        version: &str,
        author: &str,
        icon: &str,
        category: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            version: version.to_string(),
            author: author.to_string(),
            icon: icon.to_string(),
            category: category.to_string(),
        }
    }
}

/// The marketplace catalog. In a real deployment this would be fetched
/// from a server; the demo ships a fixed list.
pub fn available_plugins() -> Vec<PluginManifest> {
    vec![
        PluginManifest::new(
            "export_excel",
            "Advanced Excel Export",
            "Export any dashboard view to formatted Excel files with charts",
            "1.0.0",
            "Maize Analytics Team",
            "📊",
            "Export",
        ),
        PluginManifest::new(
            "predictive_analysis",
            "Predictive Sales Analysis",
            "ML-powered sales forecasting based on historical data",
            "1.2.1",
            "Maize Analytics Team",
            "🔮",
            "Analysis",
        ),
        PluginManifest::new(
            "competitor_tracker",
            "Competitor Price Tracker",
            "Monitor and compare competitor pricing in real-time",
            "0.9.5",
            "Market Intelligence Inc.",
            "👁️",
            "Market Intelligence",
        ),
        PluginManifest::new(
            "custom_notifications",
            "Custom Notifications",
            "Set up custom alerts based on data thresholds",
            "1.1.0",
            "Maize Analytics Team",
            "🔔",
            "Notifications",
        ),
        PluginManifest::new(
            "pdf_reports",
            "PDF Report Generator",
            "Create beautiful PDF reports from dashboard data",
            "1.3.2",
            "ReportCraft Solutions",
            "📄",
            "Export",
        ),
        PluginManifest::new(
            "weather_data",
            "Weather Data Integration",
            "Correlate sales with weather patterns across regions",
            "1.0.3",
            "Climate Analytics",
            "🌦️",
            "Data Integration",
        ),
    ]
}

/// One installed plugin entry in the config document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledPlugin {
    pub manifest: PluginManifest,
    /// True for user-uploaded plugins not present in the catalog.
    pub custom: bool,
}

/// The persisted config document: installed plugins keyed by id plus the
/// ordered list of active ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    pub installed_plugins: HashMap<String, InstalledPlugin>,
    pub active_plugins: Vec<String>,
}

/// Storage backend for the plugin config. Injected so the registry never
/// touches ambient global state; tests use the in-memory impl.
pub trait ConfigStore {
    /// `Ok(None)` means no config has been stored yet.
    fn load(&self) -> Result<Option<PluginConfig>>;
    fn save(&self, config: &PluginConfig) -> Result<()>;
}

/// JSON file store, one `plugin_config.json` document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&self) -> Result<Option<PluginConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)
            .map_err(|e| AnalyticsError::config_load(e.to_string()))?;
        let config = serde_json::from_str(&text)
            .map_err(|e| AnalyticsError::config_load(e.to_string()))?;
        Ok(Some(config))
    }

    fn save(&self, config: &PluginConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AnalyticsError::config_store(e.to_string()))?;
        }
        let text = serde_json::to_string_pretty(config)
            .map_err(|e| AnalyticsError::config_store(e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| AnalyticsError::config_store(e.to_string()))
    }
}

/// In-memory store for tests and demo fallback when file operations fail.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<PluginConfig>>,
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<Option<PluginConfig>> {
        // Single-threaded bookkeeping; recover the data on a poisoned lock
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner.clone())
    }

    fn save(&self, config: &PluginConfig) -> Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *inner = Some(config.clone());
        Ok(())
    }
}

/// Install/activate bookkeeping over an injected store. Every mutation is
/// persisted immediately.
pub struct PluginRegistry<S: ConfigStore> {
    config: PluginConfig,
    store: S,
}

impl<S: ConfigStore> PluginRegistry<S> {
    /// Open the registry, starting from an empty config when the store has
    /// nothing yet.
    pub fn open(store: S) -> Result<Self> {
        let config = store.load()?.unwrap_or_default();
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn is_installed(&self, id: &str) -> bool {
        self.config.installed_plugins.contains_key(id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.config.active_plugins.iter().any(|a| a == id)
    }

    /// Install a catalog plugin by id.
    pub fn install(&mut self, id: &str) -> Result<()> {
        let manifest = available_plugins()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AnalyticsError::plugin_not_found(id))?;
        self.config.installed_plugins.insert(
            manifest.id.clone(),
            InstalledPlugin {
                manifest,
                custom: false,
            },
        );
        debug!("installed plugin '{}'", id);
        self.persist()
    }

    /// Register a user-uploaded plugin and return its generated id.
    pub fn register_custom(&mut self, mut manifest: PluginManifest) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        manifest.id = id.clone();
        self.config.installed_plugins.insert(
            id.clone(),
            InstalledPlugin {
                manifest,
                custom: true,
            },
        );
        self.persist()?;
        Ok(id)
    }

    /// Remove a plugin entirely, deactivating it first.
    pub fn uninstall(&mut self, id: &str) -> Result<()> {
        if self.config.installed_plugins.remove(id).is_none() {
            return Err(AnalyticsError::plugin_not_found(id));
        }
        self.config.active_plugins.retain(|a| a != id);
        debug!("uninstalled plugin '{}'", id);
        self.persist()
    }

    /// Switch an installed plugin on. Idempotent.
    pub fn activate(&mut self, id: &str) -> Result<()> {
        if !self.is_installed(id) {
            return Err(AnalyticsError::plugin_not_found(id));
        }
        if !self.is_active(id) {
            self.config.active_plugins.push(id.to_string());
        }
        self.persist()
    }

    /// Switch an installed plugin off. Idempotent.
    pub fn deactivate(&mut self, id: &str) -> Result<()> {
        if !self.is_installed(id) {
            return Err(AnalyticsError::plugin_not_found(id));
        }
        self.config.active_plugins.retain(|a| a != id);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = available_plugins();
        let mut ids: Vec<_> = catalog.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn install_activate_roundtrip() {
        let mut registry = PluginRegistry::open(MemoryStore::default()).unwrap();
        registry.install("export_excel").unwrap();
        assert!(registry.is_installed("export_excel"));
        assert!(!registry.is_active("export_excel"));

        registry.activate("export_excel").unwrap();
        registry.activate("export_excel").unwrap();
        assert_eq!(registry.config().active_plugins, vec!["export_excel"]);

        registry.deactivate("export_excel").unwrap();
        assert!(registry.config().active_plugins.is_empty());
    }

    #[test]
    fn unknown_plugin_is_an_error() {
        let mut registry = PluginRegistry::open(MemoryStore::default()).unwrap();
        assert!(registry.install("does_not_exist").is_err());
        assert!(registry.activate("export_excel").is_err());
    }

    #[test]
    fn uninstall_deactivates_too() {
        let mut registry = PluginRegistry::open(MemoryStore::default()).unwrap();
        registry.install("pdf_reports").unwrap();
        registry.activate("pdf_reports").unwrap();
        registry.uninstall("pdf_reports").unwrap();
        assert!(!registry.is_installed("pdf_reports"));
        assert!(registry.config().active_plugins.is_empty());
    }

    #[test]
    fn custom_upload_gets_generated_id() {
        let mut registry = PluginRegistry::open(MemoryStore::default()).unwrap();
        let manifest = PluginManifest::new(
            "",
            "My Plugin",
            "Does things",
            "0.1.0",
            "Me",
            "🔧",
            "Custom",
        );
        let id = registry.register_custom(manifest).unwrap();
        assert!(registry.is_installed(&id));
        assert!(registry.config().installed_plugins[&id].custom);
    }

    #[test]
    fn memory_store_survives_a_poisoned_lock() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::default());
        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let mut config = PluginConfig::default();
        config.active_plugins.push("export_excel".to_string());
        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), Some(config));
    }

    #[test]
    fn json_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugins").join("plugin_config.json");

        let mut registry = PluginRegistry::open(JsonFileStore::new(&path)).unwrap();
        registry.install("weather_data").unwrap();
        registry.activate("weather_data").unwrap();

        let reopened = PluginRegistry::open(JsonFileStore::new(&path)).unwrap();
        assert!(reopened.is_installed("weather_data"));
        assert!(reopened.is_active("weather_data"));
    }
}
