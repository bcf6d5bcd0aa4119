use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Active/inactive flag on a transaction's customer relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Active,
    Inactive,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordStatus::Active => write!(f, "Active"),
            RecordStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// One sales transaction. Immutable once generated; `revenue` is derived
/// at generation time (quantity x price, adjusted by trend/seasonal/event
/// factors) and is authoritative afterwards - downstream code must never
/// recompute it from quantity and price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub product_type: String,
    pub region: String,
    pub customer_name: String,
    pub customer_category: String,
    pub quantity_tons: f64,
    pub price_per_ton: f64,
    pub revenue: f64,
    pub status: RecordStatus,
}

/// A customer in the fixture base: a name plus its sales-channel category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub category: String,
}

impl CustomerProfile {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}
