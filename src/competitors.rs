//! Seeded competitor market fixture: monthly price/share/service series
//! for the five major competitors, plus the customer-movement ledger and
//! its loss summaries. Fixture tooling like `datagen`; the query core
//! never reads it.

use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Pricing posture a competitor runs in the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceStrategy {
    Premium,
    Aggressive,
    Balanced,
    Economy,
    OrganicFocus,
}

/// Static description of one competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorProfile {
    pub name: String,
    pub base_price: f64,
    pub price_strategy: PriceStrategy,
    pub service_quality: f64,
    pub target_customers: Vec<String>,
}

impl CompetitorProfile {
    fn new(
        name: &str,
        base_price: f64,
        price_strategy: PriceStrategy,
        service_quality: f64,
        target_customers: [&str; 2],
    ) -> Self {
        Self {
            name: name.to_string(),
            base_price,
            price_strategy,
            service_quality,
            target_customers: target_customers.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// The five major competitors tracked by the market-intelligence page.
pub fn competitor_profiles() -> Vec<CompetitorProfile> {
    vec![
        CompetitorProfile::new(
            "MaizeCorp Elite",
            290.0,
            PriceStrategy::Premium,
            9.2,
            ["Global Grain Corp", "International Food Trade"],
        ),
        CompetitorProfile::new(
            "GrainGiants Int",
            275.0,
            PriceStrategy::Aggressive,
            8.5,
            ["Maritime Traders Inc", "Export Trading Group"],
        ),
        CompetitorProfile::new(
            "AgriGlobal Pro",
            285.0,
            PriceStrategy::Balanced,
            8.8,
            ["World Food Network", "Continental Supplies"],
        ),
        CompetitorProfile::new(
            "FarmFresh Hub",
            270.0,
            PriceStrategy::Economy,
            8.0,
            ["Local Grain Exchange", "Urban Bulk Supplies"],
        ),
        CompetitorProfile::new(
            "EcoGrain Plus",
            295.0,
            PriceStrategy::OrganicFocus,
            9.0,
            ["Digital Food Exchange", "E-Commerce Foods"],
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementImpact {
    High,
    Medium,
}

/// One major customer lost to a competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerMovement {
    pub customer: String,
    pub new_supplier: String,
    pub date: NaiveDate,
    pub reason: String,
    pub impact: MovementImpact,
    /// Estimated annual contract value, in millions of dollars.
    pub annual_value_millions: f64,
}

fn movement(
    customer: &str,
    new_supplier: &str,
    date: (i32, u32, u32),
    reason: &str,
    impact: MovementImpact,
    annual_value_millions: f64,
) -> CustomerMovement {
    CustomerMovement {
        customer: customer.to_string(),
        new_supplier: new_supplier.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid movement date"),
        reason: reason.to_string(),
        impact,
        annual_value_millions,
    }
}

/// The customer-movement ledger: who left, to which supplier, and why.
pub fn customer_movements() -> Vec<CustomerMovement> {
    vec![
        movement(
            "Global Grain Corp",
            "MaizeCorp Elite",
            (2024, 1, 15),
            "Price advantage: 15% lower with bulk commitment",
            MovementImpact::High,
            2.5,
        ),
        movement(
            "International Food Trade",
            "GrainGiants Int",
            (2023, 9, 1),
            "Aggressive pricing and flexible payment terms",
            MovementImpact::Medium,
            1.8,
        ),
        movement(
            "Maritime Traders Inc",
            "AgriGlobal Pro",
            (2024, 2, 1),
            "Integrated logistics solution",
            MovementImpact::Medium,
            1.2,
        ),
        movement(
            "Export Trading Group",
            "FarmFresh Hub",
            (2023, 11, 15),
            "Regional warehouse access and lower prices",
            MovementImpact::High,
            2.1,
        ),
    ]
}

/// Number of major customers lost to competitors.
pub fn lost_customer_count(movements: &[CustomerMovement]) -> usize {
    movements.len()
}

/// Estimated annual revenue lost across all movements, in millions.
pub fn total_annual_value_lost(movements: &[CustomerMovement]) -> f64 {
    movements.iter().map(|m| m.annual_value_millions).sum()
}

/// One monthly observation of a competitor's market posture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorObservation {
    pub date: NaiveDate,
    pub competitor: String,
    pub price_per_ton: f64,
    pub market_share: f64,
    pub service_quality: f64,
    pub price_strategy: PriceStrategy,
    /// Set when a customer movement landed on this competitor this month.
    pub event: Option<String>,
}

/// Generator knobs; the window normally mirrors the main table's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompetitorConfig {
    pub seed: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for CompetitorConfig {
    fn default() -> Self {
        Self {
            // Same seed as the main fixture for consistency
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        }
    }
}

/// Aggressive price-cutters drop their base price 15% from this date on.
const PRICE_CUT_DATE: (i32, u32, u32) = (2023, 9, 1);
const PRICE_CUT_FACTOR: f64 = 0.85;
const PRICE_CUTTERS: [&str; 2] = ["MaizeCorp Elite", "GrainGiants Int"];

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid month start")
        - Duration::days(1)
}

/// Month-end dates falling inside the window, oldest first.
fn month_ends(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    loop {
        let month_end = last_day_of_month(year, month);
        if month_end > end {
            break;
        }
        if month_end >= start {
            dates.push(month_end);
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    dates
}

/// Standard normal draw via Box-Muller.
fn sample_standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Generate the deterministic monthly competitor series.
///
/// Prices carry a sinusoidal seasonal factor and 2% noise; the two
/// aggressive competitors cut their base price 15% from September 2023.
/// A movement is annotated on the gaining competitor's observation for
/// the month it happened in (the movement dates are mid-month, the series
/// is month-end, so matching is by calendar month).
pub fn generate_competitors(config: CompetitorConfig) -> Vec<CompetitorObservation> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let profiles = competitor_profiles();
    let movements = customer_movements();
    let cut_date = NaiveDate::from_ymd_opt(PRICE_CUT_DATE.0, PRICE_CUT_DATE.1, PRICE_CUT_DATE.2)
        .expect("valid cut date");

    let mut observations = Vec::new();
    for date in month_ends(config.start_date, config.end_date) {
        for profile in &profiles {
            let mut base_price = profile.base_price;
            if PRICE_CUTTERS.contains(&profile.name.as_str()) && date >= cut_date {
                base_price *= PRICE_CUT_FACTOR;
            }

            let month_factor = 1.0 + 0.1 * (date.month() as f64 * std::f64::consts::PI / 6.0).sin();
            let price_per_ton =
                base_price * month_factor * (1.0 + 0.02 * sample_standard_normal(&mut rng));
            let market_share = 20.0 + 2.0 * sample_standard_normal(&mut rng);
            let service_quality = profile.service_quality + 0.1 * sample_standard_normal(&mut rng);

            let event = movements
                .iter()
                .find(|m| {
                    m.new_supplier == profile.name
                        && m.date.year() == date.year()
                        && m.date.month() == date.month()
                })
                .map(|m| format!("Gained {}: {}", m.customer, m.reason));

            observations.push(CompetitorObservation {
                date,
                competitor: profile.name.clone(),
                price_per_ton,
                market_share,
                service_quality,
                price_strategy: profile.price_strategy,
                event,
            });
        }
    }

    log::debug!(
        "generated {} competitor observations from seed {}",
        observations.len(),
        config.seed
    );
    observations
}
