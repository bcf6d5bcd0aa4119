//! Tabular data store: an immutable snapshot of transaction records plus
//! the pure filter/aggregation helpers the query matchers run against.

use crate::types::TransactionRecord;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Calendar filter applied to sums: a year, optionally narrowed to a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub month: Option<u32>,
}

impl Period {
    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self { year, month: Some(month) }
    }

    fn contains(&self, record: &TransactionRecord) -> bool {
        record.date.year() == self.year
            && self.month.map_or(true, |m| record.date.month() == m)
    }
}

/// Immutable snapshot of transaction records.
///
/// The table is created once per session by the data generator (or loaded
/// from the snapshot cache) and never mutated afterwards, so every matcher
/// in a session reads the same data and query answers are pure functions
/// of table + query text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTable {
    records: Vec<TransactionRecord>,
}

impl TransactionTable {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of `revenue` over the table, optionally restricted to a period.
    /// An empty subset sums to 0.0.
    pub fn sum_revenue(&self, period: Option<Period>) -> f64 {
        self.sum_where(period, |r| r.revenue)
    }

    /// Sum of `quantity_tons` over the table, optionally restricted to a
    /// period. An empty subset sums to 0.0.
    pub fn sum_quantity(&self, period: Option<Period>) -> f64 {
        self.sum_where(period, |r| r.quantity_tons)
    }

    fn sum_where(&self, period: Option<Period>, measure: fn(&TransactionRecord) -> f64) -> f64 {
        self.records
            .iter()
            .filter(|r| period.map_or(true, |p| p.contains(r)))
            .map(measure)
            .sum()
    }

    /// Distinct values of a categorical column, sorted ascending.
    pub fn distinct(&self, column: fn(&TransactionRecord) -> &str) -> Vec<String> {
        let mut values: Vec<String> = self.records.iter().map(|r| column(r).to_string()).collect();
        values.sort();
        values.dedup();
        values
    }

    pub fn distinct_customers(&self) -> Vec<String> {
        self.distinct(|r| &r.customer_name)
    }

    pub fn distinct_categories(&self) -> Vec<String> {
        self.distinct(|r| &r.customer_category)
    }

    pub fn distinct_regions(&self) -> Vec<String> {
        self.distinct(|r| &r.region)
    }

    /// Group the records of `year` by a categorical column, sum revenue per
    /// group, and return the group with the highest total.
    ///
    /// Groups keep first-encounter table order; on a tie the first group
    /// encountered wins. Returns `None` when no record falls in `year`.
    pub fn top_by_revenue(
        &self,
        year: i32,
        key: fn(&TransactionRecord) -> &str,
    ) -> Option<(String, f64)> {
        let mut groups: Vec<(String, f64)> = Vec::new();
        for record in self.records.iter().filter(|r| r.date.year() == year) {
            let group = key(record);
            match groups.iter_mut().find(|(name, _)| name.as_str() == group) {
                Some((_, total)) => *total += record.revenue,
                None => groups.push((group.to_string(), record.revenue)),
            }
        }
        let mut best: Option<(String, f64)> = None;
        for (name, total) in groups {
            match &best {
                Some((_, best_total)) if total <= *best_total => {}
                _ => best = Some((name, total)),
            }
        }
        best
    }

    pub fn top_customer(&self, year: i32) -> Option<(String, f64)> {
        self.top_by_revenue(year, |r| &r.customer_name)
    }

    pub fn top_region(&self, year: i32) -> Option<(String, f64)> {
        self.top_by_revenue(year, |r| &r.region)
    }
}
