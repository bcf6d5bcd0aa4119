use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Snapshot cache not found: {path}")]
    CacheNotFound {
        path: PathBuf,
        suggestion: String,
    },

    #[error("Snapshot cache decode failed: {details}")]
    CacheDecode {
        details: String,
        suggestion: String,
    },

    #[error("Snapshot cache write failed: {details}")]
    CacheWrite {
        details: String,
        suggestion: String,
    },

    #[error("Plugin config load failed: {details}")]
    ConfigLoad {
        details: String,
        suggestion: String,
    },

    #[error("Plugin config store failed: {details}")]
    ConfigStore {
        details: String,
        suggestion: String,
    },

    #[error("Plugin '{id}' not found")]
    PluginNotFound {
        id: String,
        suggestion: String,
    },
}

impl AnalyticsError {
    /// Create a cache-not-found error with a regeneration hint
    pub fn cache_not_found(path: PathBuf) -> Self {
        let suggestion = format!(
            "No snapshot at {}; regenerate the table and store it first",
            path.display()
        );
        Self::CacheNotFound { path, suggestion }
    }

    /// Create a cache decode error with suggestion
    pub fn cache_decode(details: impl Into<String>) -> Self {
        let details = details.into();
        let suggestion =
            "The snapshot file is stale or corrupt; delete it and regenerate".to_string();
        Self::CacheDecode { details, suggestion }
    }

    /// Create a cache write error with suggestion
    pub fn cache_write(details: impl Into<String>) -> Self {
        let details = details.into();
        let suggestion = "Check that the data directory exists and is writable".to_string();
        Self::CacheWrite { details, suggestion }
    }

    /// Create a plugin config load error with suggestion
    pub fn config_load(details: impl Into<String>) -> Self {
        let details = details.into();
        let suggestion =
            "Check plugin_config.json for syntax errors, or remove it to reset".to_string();
        Self::ConfigLoad { details, suggestion }
    }

    /// Create a plugin config store error with suggestion
    pub fn config_store(details: impl Into<String>) -> Self {
        let details = details.into();
        let suggestion = "Check that the plugins directory exists and is writable".to_string();
        Self::ConfigStore { details, suggestion }
    }

    /// Create a plugin-not-found error with suggestion
    pub fn plugin_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        let suggestion = format!("'{}' is not installed; install it from the catalog first", id);
        Self::PluginNotFound { id, suggestion }
    }

    /// Get the recovery suggestion for this error
    pub fn suggestion(&self) -> &str {
        match self {
            Self::CacheNotFound { suggestion, .. } => suggestion,
            Self::CacheDecode { suggestion, .. } => suggestion,
            Self::CacheWrite { suggestion, .. } => suggestion,
            Self::ConfigLoad { suggestion, .. } => suggestion,
            Self::ConfigStore { suggestion, .. } => suggestion,
            Self::PluginNotFound { suggestion, .. } => suggestion,
        }
    }

    /// Check if this error is recoverable by regenerating state
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::CacheNotFound { .. } => true,
            Self::CacheDecode { .. } => true,
            Self::CacheWrite { .. } => false,
            Self::ConfigLoad { .. } => true,
            Self::ConfigStore { .. } => false,
            Self::PluginNotFound { .. } => false,
        }
    }
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
