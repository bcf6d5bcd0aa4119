mod matchers;
pub mod cache;
pub mod competitors;
pub mod datagen;
pub mod error;
pub mod interpreter;
pub mod plugins;
pub mod state;
pub mod table;
pub mod types;
#[cfg(test)]
#[path = "tests/integration_tests.rs"]
mod integration_tests;
pub use cache::SnapshotCache;
pub use competitors::{
    competitor_profiles, customer_movements, generate_competitors, lost_customer_count,
    total_annual_value_lost,
    CompetitorConfig, CompetitorObservation, CompetitorProfile, CustomerMovement, MovementImpact,
    PriceStrategy,
};
pub use datagen::{customer_base, generate, GeneratorConfig, CHURNED_CUSTOMER};
pub use error::{AnalyticsError, Result};
pub use interpreter::{interpret, Intent, QueryInterpreter, DISPATCH_ORDER, FALLBACK_MESSAGE};
pub use matchers::MatchResult;
pub use plugins::{
    available_plugins, ConfigStore, JsonFileStore, MemoryStore, PluginConfig, PluginManifest,
    PluginRegistry,
};
pub use state::{AdminSession, AppState, Invoice, InvoiceStatus, User};
pub use table::{Period, TransactionTable};
pub use types::{CustomerProfile, RecordStatus, TransactionRecord};
