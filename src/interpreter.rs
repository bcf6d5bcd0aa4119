//! Query interpreter: walks an ordered list of intent matchers and returns
//! the first answer produced, or a fixed fallback when nothing fires.

use crate::matchers::{self, MatchResult};
use crate::table::TransactionTable;
use log::debug;

/// Queries longer than this are truncated before matching. The original
/// dashboard accepted unbounded input; the bound is a hardening measure.
pub const MAX_QUERY_LEN: usize = 500;

/// Fixed response when no matcher fires.
pub const FALLBACK_MESSAGE: &str = "I couldn't understand that question. In this demo, I can answer questions about:\n\
- Total revenue and quantity\n\
- Monthly/yearly revenue and quantity\n\
- Customer lists and categories\n\
- Regional performance\n\
- Top customers\n\
\n\
Try using one of the example queries below!";

/// One recognizable query intent.
///
/// The variant order below IS the dispatch order and is a semantic
/// contract, not an implementation detail: the first variant whose trigger
/// fires answers the query, with no scoring or specificity ranking. A
/// query phrased to satisfy both "total revenue" and a month/year pattern
/// is answered by `TotalRevenue` because it comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    TotalRevenue,
    TotalQuantity,
    RevenueForMonth,
    RevenueForYear,
    QuantityForMonth,
    QuantityForYear,
    AllCustomers,
    AllCategories,
    AllRegions,
    TopCustomer,
    TopRegion,
}

/// Dispatch order. Changing this changes answers; see `Intent`.
pub const DISPATCH_ORDER: [Intent; 11] = [
    Intent::TotalRevenue,
    Intent::TotalQuantity,
    Intent::RevenueForMonth,
    Intent::RevenueForYear,
    Intent::QuantityForMonth,
    Intent::QuantityForYear,
    Intent::AllCustomers,
    Intent::AllCategories,
    Intent::AllRegions,
    Intent::TopCustomer,
    Intent::TopRegion,
];

impl Intent {
    /// Run this intent's matcher. `None` means the trigger did not fire
    /// (or, for `TopCustomer`/`TopRegion`, that the year had no records -
    /// those two decline on empty aggregation instead of answering zero).
    pub fn try_answer(&self, query: &str, table: &TransactionTable) -> MatchResult {
        match self {
            Intent::TotalRevenue => matchers::total_revenue(query, table),
            Intent::TotalQuantity => matchers::total_quantity(query, table),
            Intent::RevenueForMonth => matchers::revenue_for_month(query, table),
            Intent::RevenueForYear => matchers::revenue_for_year(query, table),
            Intent::QuantityForMonth => matchers::quantity_for_month(query, table),
            Intent::QuantityForYear => matchers::quantity_for_year(query, table),
            Intent::AllCustomers => matchers::all_customers(query, table),
            Intent::AllCategories => matchers::all_categories(query, table),
            Intent::AllRegions => matchers::all_regions(query, table),
            Intent::TopCustomer => matchers::top_customer(query, table),
            Intent::TopRegion => matchers::top_region(query, table),
        }
    }
}

/// Stateless interpreter over an immutable table snapshot.
pub struct QueryInterpreter<'a> {
    table: &'a TransactionTable,
}

impl<'a> QueryInterpreter<'a> {
    pub fn new(table: &'a TransactionTable) -> Self {
        Self { table }
    }

    /// Answer a free-text question. Never fails: every input produces
    /// either a matcher's formatted answer or the fixed fallback.
    pub fn interpret(&self, query: &str) -> String {
        let normalized = normalize(query);
        for intent in DISPATCH_ORDER {
            if let Some(answer) = intent.try_answer(&normalized, self.table) {
                debug!("query answered by {:?}", intent);
                return answer;
            }
        }
        debug!("no matcher fired, returning fallback");
        FALLBACK_MESSAGE.to_string()
    }
}

/// Lowercase and truncate the raw query before matching.
fn normalize(query: &str) -> String {
    query.chars().take(MAX_QUERY_LEN).collect::<String>().to_lowercase()
}

/// Convenience entry point matching the dashboard's call shape.
pub fn interpret(query: &str, table: &TransactionTable) -> String {
    QueryInterpreter::new(table).interpret(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecordStatus, TransactionRecord};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(y: i32, m: u32, customer: &str, region: &str, revenue: f64) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::from_ymd_opt(y, m, 10).unwrap(),
            product_type: "Yellow Maize".to_string(),
            region: region.to_string(),
            customer_name: customer.to_string(),
            customer_category: "Local".to_string(),
            quantity_tons: 25.0,
            price_per_ton: revenue / 25.0,
            revenue,
            status: RecordStatus::Active,
        }
    }

    fn table() -> TransactionTable {
        TransactionTable::new(vec![
            record(2024, 3, "City Bulk Foods", "North", 1000.0),
            record(2024, 3, "Global Grain Corp", "South", 2500.0),
            record(2024, 7, "City Bulk Foods", "North", 500.0),
        ])
    }

    #[test]
    fn total_revenue_answers_first() {
        let t = table();
        assert_eq!(
            interpret("What is the total revenue?", &t),
            "💰 Total Revenue: $4,000"
        );
    }

    #[test]
    fn monthly_revenue_filters_to_month() {
        let t = table();
        assert_eq!(
            interpret("What was the revenue for Mar 2024?", &t),
            "📊 Revenue for Mar 2024: $3,500.00"
        );
    }

    #[test]
    fn yearly_revenue_without_month() {
        let t = table();
        assert_eq!(
            interpret("How much revenue in 2024?", &t),
            "📊 Revenue for 2024: $4,000.00"
        );
    }

    #[test]
    fn absent_year_answers_zero() {
        let t = table();
        assert_eq!(
            interpret("How much revenue in 2021?", &t),
            "📊 Revenue for 2021: $0.00"
        );
    }

    #[test]
    fn quantity_queries_suffix_tons() {
        let t = table();
        assert_eq!(
            interpret("How much total quantity_tons?", &t),
            "⚖️ Total Quantity: 75.00 tons"
        );
        assert_eq!(
            interpret("How much quantity in Mar 2024?", &t),
            "⚖️ Quantity for Mar 2024: 50.00 tons"
        );
    }

    #[test]
    fn enumeration_lists_sorted() {
        let t = table();
        assert_eq!(
            interpret("What are all customers?", &t),
            "👥 All Customers (2):\n- City Bulk Foods\n- Global Grain Corp"
        );
        assert_eq!(
            interpret("Show all regions", &t),
            "🌍 All Regions:\n- North\n- South"
        );
    }

    #[test]
    fn top_customer_by_year() {
        let t = table();
        assert_eq!(
            interpret("top customer 2024", &t),
            "🏆 Top customer in 2024: Global Grain Corp ($2,500.00)"
        );
    }

    #[test]
    fn top_customer_empty_year_falls_back() {
        let t = table();
        assert_eq!(interpret("top customer 2023", &t), FALLBACK_MESSAGE);
    }

    #[test]
    fn top_region_needs_highest_sales_phrasing() {
        let t = table();
        assert_eq!(
            interpret("Which region had the highest sales in 2024?", &t),
            "🌍 Top performing region in 2024: South ($2,500.00)"
        );
    }

    #[test]
    fn fallback_keeps_the_demo_wording() {
        assert!(FALLBACK_MESSAGE
            .starts_with("I couldn't understand that question. In this demo,"));
        assert!(FALLBACK_MESSAGE.ends_with("Try using one of the example queries below!"));
    }

    #[test]
    fn gibberish_falls_back() {
        let t = table();
        assert_eq!(interpret("gibberish question", &t), FALLBACK_MESSAGE);
    }

    #[test]
    fn total_revenue_wins_over_period_phrasing() {
        // Dispatch order contract: rule 1 fires even though the query also
        // carries a month and year.
        let t = table();
        assert_eq!(
            interpret("show total revenue for mar 2024", &t),
            "💰 Total Revenue: $4,000"
        );
    }

    #[test]
    fn interpret_is_idempotent() {
        let t = table();
        let q = "What was the revenue for Mar 2024?";
        assert_eq!(interpret(q, &t), interpret(q, &t));
    }

    #[test]
    fn oversized_query_is_truncated_not_rejected() {
        let t = table();
        let long = format!("what is the total revenue{}", " padding".repeat(200));
        assert_eq!(interpret(&long, &t), "💰 Total Revenue: $4,000");
    }
}
