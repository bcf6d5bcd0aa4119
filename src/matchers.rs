//! Intent matchers: one regex trigger + one formatter per supported query
//! shape. Every matcher is a pure function of the lowercased query text and
//! the table snapshot; `None` always means "not my intent, try the next
//! one", never an error.

use crate::table::{Period, TransactionTable};
use once_cell::sync::Lazy;
use regex::Regex;

/// A matcher's outcome. Absence is distinct from an empty answer: the
/// dispatcher treats `None` as "try the next matcher".
pub type MatchResult = Option<String>;

static TOTAL_REVENUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(what|how much|show|tell).*total revenue").unwrap());

static TOTAL_QUANTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(what|how much|show|tell).*total.*quantity|total.*tons").unwrap());

// The month capture is the three-letter prefix; trailing letters of full
// month names are consumed outside the group so "march 2024" yields "mar".
static REVENUE_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"revenue.*(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]* *(20\d\d)")
        .unwrap()
});

static REVENUE_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"revenue.*(20\d\d)").unwrap());

static QUANTITY_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"quantity.*(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]* *(20\d\d)")
        .unwrap()
});

static QUANTITY_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"quantity.*(20\d\d)").unwrap());

static ALL_CUSTOMERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(what|show|list|tell).*all.*customer").unwrap());

static ALL_CATEGORIES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(what|show|list|tell).*all.*categor").unwrap());

static ALL_REGIONS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(what|show|list|tell).*all.*region").unwrap());

static TOP_CUSTOMER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"top customer.*(20\d\d)").unwrap());

static TOP_REGION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"region.*highest.*sales.*(20\d\d)").unwrap());

/// Resolve a three-letter month token to its month number.
pub fn parse_month(token: &str) -> Option<u32> {
    match token {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

/// Format a number with thousands separators and the given decimal count.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn parse_year(token: &str) -> Option<i32> {
    token.parse().ok()
}

pub fn total_revenue(query: &str, table: &TransactionTable) -> MatchResult {
    if !TOTAL_REVENUE_RE.is_match(query) {
        return None;
    }
    let total = table.sum_revenue(None);
    Some(format!("💰 Total Revenue: ${}", format_thousands(total, 0)))
}

pub fn total_quantity(query: &str, table: &TransactionTable) -> MatchResult {
    if !TOTAL_QUANTITY_RE.is_match(query) {
        return None;
    }
    let total = table.sum_quantity(None);
    Some(format!("⚖️ Total Quantity: {} tons", format_thousands(total, 2)))
}

pub fn revenue_for_month(query: &str, table: &TransactionTable) -> MatchResult {
    let caps = REVENUE_MONTH_RE.captures(query)?;
    let month_token = caps.get(1)?.as_str();
    let year = parse_year(caps.get(2)?.as_str())?;
    let month = parse_month(month_token)?;
    let revenue = table.sum_revenue(Some(Period::month(year, month)));
    Some(format!(
        "📊 Revenue for {} {}: ${}",
        capitalize(month_token),
        year,
        format_thousands(revenue, 2)
    ))
}

pub fn revenue_for_year(query: &str, table: &TransactionTable) -> MatchResult {
    let caps = REVENUE_YEAR_RE.captures(query)?;
    let year = parse_year(caps.get(1)?.as_str())?;
    let revenue = table.sum_revenue(Some(Period::year(year)));
    Some(format!(
        "📊 Revenue for {}: ${}",
        year,
        format_thousands(revenue, 2)
    ))
}

pub fn quantity_for_month(query: &str, table: &TransactionTable) -> MatchResult {
    let caps = QUANTITY_MONTH_RE.captures(query)?;
    let month_token = caps.get(1)?.as_str();
    let year = parse_year(caps.get(2)?.as_str())?;
    let month = parse_month(month_token)?;
    let quantity = table.sum_quantity(Some(Period::month(year, month)));
    Some(format!(
        "⚖️ Quantity for {} {}: {} tons",
        capitalize(month_token),
        year,
        format_thousands(quantity, 2)
    ))
}

pub fn quantity_for_year(query: &str, table: &TransactionTable) -> MatchResult {
    let caps = QUANTITY_YEAR_RE.captures(query)?;
    let year = parse_year(caps.get(1)?.as_str())?;
    let quantity = table.sum_quantity(Some(Period::year(year)));
    Some(format!(
        "⚖️ Quantity for {}: {} tons",
        year,
        format_thousands(quantity, 2)
    ))
}

fn bullet_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("- {}", v))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn all_customers(query: &str, table: &TransactionTable) -> MatchResult {
    if !ALL_CUSTOMERS_RE.is_match(query) {
        return None;
    }
    let customers = table.distinct_customers();
    Some(format!(
        "👥 All Customers ({}):\n{}",
        customers.len(),
        bullet_list(&customers)
    ))
}

pub fn all_categories(query: &str, table: &TransactionTable) -> MatchResult {
    if !ALL_CATEGORIES_RE.is_match(query) {
        return None;
    }
    let categories = table.distinct_categories();
    Some(format!("📑 All Categories:\n{}", bullet_list(&categories)))
}

pub fn all_regions(query: &str, table: &TransactionTable) -> MatchResult {
    if !ALL_REGIONS_RE.is_match(query) {
        return None;
    }
    let regions = table.distinct_regions();
    Some(format!("🌍 All Regions:\n{}", bullet_list(&regions)))
}

// Empty years decline instead of answering "no data"; the dispatcher then
// falls back. Kept for compatibility with the original handler chain.
pub fn top_customer(query: &str, table: &TransactionTable) -> MatchResult {
    let caps = TOP_CUSTOMER_RE.captures(query)?;
    let year = parse_year(caps.get(1)?.as_str())?;
    let (name, revenue) = table.top_customer(year)?;
    Some(format!(
        "🏆 Top customer in {}: {} (${})",
        year,
        name,
        format_thousands(revenue, 2)
    ))
}

pub fn top_region(query: &str, table: &TransactionTable) -> MatchResult {
    let caps = TOP_REGION_RE.captures(query)?;
    let year = parse_year(caps.get(1)?.as_str())?;
    let (name, revenue) = table.top_region(year)?;
    Some(format!(
        "🌍 Top performing region in {}: {} (${})",
        year,
        name,
        format_thousands(revenue, 2)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_month_prefixes() {
        assert_eq!(parse_month("jan"), Some(1));
        assert_eq!(parse_month("dec"), Some(12));
        assert_eq!(parse_month("xyz"), None);
    }

    #[test]
    fn formats_thousands_groups() {
        assert_eq!(format_thousands(0.0, 2), "0.00");
        assert_eq!(format_thousands(1234.5, 2), "1,234.50");
        assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(987654321.0, 0), "987,654,321");
        assert_eq!(format_thousands(999.99, 2), "999.99");
    }

    #[test]
    fn month_regex_captures_prefix_of_full_names() {
        let caps = REVENUE_MONTH_RE
            .captures("what was the revenue for march 2024")
            .unwrap();
        assert_eq!(&caps[1], "mar");
        assert_eq!(&caps[2], "2024");
    }

    #[test]
    fn year_regex_requires_20xx() {
        assert!(REVENUE_YEAR_RE.captures("revenue in 1999").is_none());
        assert!(REVENUE_YEAR_RE.captures("revenue in 2023").is_some());
    }

    #[test]
    fn total_quantity_trigger_accepts_tons_phrasing() {
        let table = TransactionTable::default();
        assert!(total_quantity("how much total quantity_tons?", &table).is_some());
        assert!(total_quantity("total tons shipped", &table).is_some());
        assert!(total_quantity("how heavy", &table).is_none());
    }
}
