//! Seeded synthetic transaction generator. Fixture tooling only: the query
//! core never calls this, it just consumes the resulting table snapshot.

use crate::table::TransactionTable;
use crate::types::{CustomerProfile, RecordStatus, TransactionRecord};
use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LOCAL_CUSTOMERS: [&str; 15] = [
    "Metro Wholesale Ltd",
    "City Bulk Foods",
    "Region Foods Co",
    "Prime Distributors",
    "Local Grain Exchange",
    "Urban Bulk Supplies",
    "District Foods Inc",
    "Central Wholesale Co",
    "Town Grain Traders",
    "Municipal Food Supply",
    "Community Bulk Store",
    "Local Mart Chain",
    "City Food Network",
    "Regional Bulk Foods",
    "Metro Food Alliance",
];

const INTERNATIONAL_CUSTOMERS: [&str; 15] = [
    "Global Grain Corp",
    "International Food Trade",
    "World Maize Exchange",
    "Continental Supplies",
    "Ocean Foods International",
    "Cross Border Trading",
    "Global Bulk Foods",
    "International Wholesale Co",
    "World Food Network",
    "Maritime Traders Inc",
    "Export Trading Group",
    "Global Food Alliance",
    "International Grain Co",
    "Overseas Food Supply",
    "World Trade Foods",
];

const ONLINE_CUSTOMERS: [&str; 15] = [
    "E-Grain Trading",
    "Digital Food Exchange",
    "Online Bulk Foods",
    "Virtual Trading Co",
    "E-Commerce Foods",
    "Digital Wholesale Network",
    "Cloud Trading Group",
    "Online Mart Supply",
    "Digital Food Alliance",
    "E-Bulk Solutions",
    "Virtual Food Trade",
    "Online Exchange Co",
    "Digital Grain Store",
    "E-Commerce Trades",
    "Web Food Network",
];

const PRODUCT_TYPES: [&str; 3] = ["White Maize", "Yellow Maize", "Organic Maize"];
const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

/// The scripted churn anomaly: this customer's trailing-window records are
/// slashed to 30% revenue and marked inactive.
pub const CHURNED_CUSTOMER: &str = "Global Grain Corp";
const CHURN_WINDOW_DAYS: i64 = 180;
const CHURN_REVENUE_FACTOR: f64 = 0.3;

const WINDOW_DAYS: i64 = 1095;
const YEARLY_GROWTH: f64 = 0.05;

/// Generator knobs. Same seed + same config = byte-identical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub records: usize,
    /// Last transaction date; the window extends 3 years back from here.
    pub end_date: NaiveDate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            records: 5000,
            // Fixed end date so default fixtures reproduce across runs
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        }
    }
}

/// The 45-customer fixture base: 15 Local, 15 International, 15 Online.
pub fn customer_base() -> Vec<CustomerProfile> {
    let mut customers = Vec::with_capacity(45);
    for name in LOCAL_CUSTOMERS {
        customers.push(CustomerProfile::new(name, "Local"));
    }
    for name in INTERNATIONAL_CUSTOMERS {
        customers.push(CustomerProfile::new(name, "International"));
    }
    for name in ONLINE_CUSTOMERS {
        customers.push(CustomerProfile::new(name, "Online"));
    }
    customers
}

/// Standard normal draw via Box-Muller, scaled to mean/sd.
fn sample_normal(rng: &mut StdRng, mean: f64, sd: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + sd * z
}

/// Generate a deterministic synthetic table.
///
/// Revenue is quantity x price, then scaled by a 5%-per-year growth trend
/// and a sinusoidal monthly seasonal factor, and finally the scripted
/// churn event is applied to [`CHURNED_CUSTOMER`]. The adjusted revenue is
/// authoritative from here on.
pub fn generate(config: GeneratorConfig) -> TransactionTable {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let customers = customer_base();
    let start_date = config.end_date - Duration::days(WINDOW_DAYS);
    let churn_cutoff = config.end_date - Duration::days(CHURN_WINDOW_DAYS);

    let mut records = Vec::with_capacity(config.records);
    for i in 0..config.records {
        // Dates evenly spaced across the 3-year window
        let offset = if config.records > 1 {
            WINDOW_DAYS * i as i64 / (config.records as i64 - 1)
        } else {
            0
        };
        let date = start_date + Duration::days(offset);

        let product_type = PRODUCT_TYPES[rng.gen_range(0..PRODUCT_TYPES.len())].to_string();
        let region = REGIONS[rng.gen_range(0..REGIONS.len())].to_string();
        let quantity_tons = sample_normal(&mut rng, 100.0, 20.0);
        let price_per_ton = sample_normal(&mut rng, 300.0, 50.0);
        let customer = &customers[rng.gen_range(0..customers.len())];

        let years_from_start = (date - start_date).num_days() as f64 / 365.0;
        let growth_factor = 1.0 + years_from_start * YEARLY_GROWTH;
        let seasonal_factor =
            (date.month() as f64 * std::f64::consts::PI / 6.0).sin() * 0.2 + 1.0;
        let mut revenue = quantity_tons * price_per_ton * growth_factor * seasonal_factor;

        let mut status = if rng.gen_bool(0.9) {
            RecordStatus::Active
        } else {
            RecordStatus::Inactive
        };

        // Major customer loss scenario in the trailing window
        if customer.name == CHURNED_CUSTOMER && date > churn_cutoff {
            revenue *= CHURN_REVENUE_FACTOR;
            status = RecordStatus::Inactive;
        }

        records.push(TransactionRecord {
            date,
            product_type,
            region,
            customer_name: customer.name.clone(),
            customer_category: customer.category.clone(),
            quantity_tons,
            price_per_ton,
            revenue,
            status,
        });
    }

    log::debug!(
        "generated {} synthetic records from seed {}",
        records.len(),
        config.seed
    );
    TransactionTable::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_table() {
        let a = generate(GeneratorConfig::default());
        let b = generate(GeneratorConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_table() {
        let a = generate(GeneratorConfig::default());
        let b = generate(GeneratorConfig {
            seed: 7,
            ..GeneratorConfig::default()
        });
        assert_ne!(a, b);
    }

    #[test]
    fn covers_configured_window() {
        let config = GeneratorConfig::default();
        let table = generate(config);
        assert_eq!(table.len(), 5000);
        let first = table.records().first().unwrap();
        let last = table.records().last().unwrap();
        assert_eq!(first.date, config.end_date - Duration::days(WINDOW_DAYS));
        assert_eq!(last.date, config.end_date);
    }

    #[test]
    fn customer_base_has_three_categories() {
        let base = customer_base();
        assert_eq!(base.len(), 45);
        assert_eq!(base.iter().filter(|c| c.category == "Local").count(), 15);
        assert_eq!(
            base.iter().filter(|c| c.category == "International").count(),
            15
        );
        assert_eq!(base.iter().filter(|c| c.category == "Online").count(), 15);
    }

    #[test]
    fn churned_customer_trailing_records_marked_inactive() {
        let config = GeneratorConfig::default();
        let cutoff = config.end_date - Duration::days(CHURN_WINDOW_DAYS);
        let table = generate(config);
        let trailing: Vec<_> = table
            .records()
            .iter()
            .filter(|r| r.customer_name == CHURNED_CUSTOMER && r.date > cutoff)
            .collect();
        assert!(!trailing.is_empty());
        for r in trailing {
            assert_eq!(r.status, RecordStatus::Inactive);
            // Slashed revenue sits well below the unadjusted product
            assert!(r.revenue < r.quantity_tons * r.price_per_ton);
        }
    }
}
