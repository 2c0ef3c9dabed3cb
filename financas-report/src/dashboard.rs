//! Dashboard numbers: total spend, leading category and method, income
//! leftover, and per-month / per-category / per-method totals.

use chrono::Datelike;
use financas_core::{Category, ExpenseRecord, PaymentMethod};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;
use tracing::debug;

use crate::filter::ReportFilter;
use crate::month::month_name_pt;

/// A ledger row with the fields derived for grouping.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportRow {
    #[serde(flatten)]
    pub record: ExpenseRecord,
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
}

impl From<&ExpenseRecord> for ReportRow {
    fn from(record: &ExpenseRecord) -> Self {
        let month = record.date.month();
        ReportRow {
            record: record.clone(),
            year: record.date.year(),
            month,
            month_name: month_name_pt(month).unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub total: Decimal,
    pub top_category: Option<Category>,
    pub top_method: Option<PaymentMethod>,
    /// Monthly income times the number of months in view
    pub income: Decimal,
    pub leftover: Decimal,
    /// Chronological
    pub monthly: Vec<MonthTotal>,
    /// Ascending by total
    pub by_category: Vec<GroupTotal<Category>>,
    /// Ascending by total
    pub by_method: Vec<GroupTotal<PaymentMethod>>,
    pub rows: Vec<ReportRow>,
}

/// Compute every dashboard figure for the rows `filter` lets through.
///
/// The month count behind `income` is the size of the month selection, or
/// the number of distinct months present anywhere in `records` when no month
/// is selected.
pub fn build_dashboard(
    records: &[ExpenseRecord],
    filter: &ReportFilter,
    monthly_income: Decimal,
) -> Dashboard {
    let selected = filter.apply(records);
    debug!(total = records.len(), selected = selected.len(), "dashboard filter applied");

    let total: Decimal = selected.iter().map(|r| r.amount).sum::<Decimal>().round_dp(2);

    let months_in_view = if filter.months.is_empty() {
        records.iter().map(|r| r.date.month()).collect::<BTreeSet<_>>().len()
    } else {
        filter.months.iter().collect::<BTreeSet<_>>().len()
    };
    let income = monthly_income * Decimal::from(months_in_view as u64);

    let by_category = group_totals(&selected, |r| r.category);
    let by_method = group_totals(&selected, |r| r.payment_method);

    Dashboard {
        total,
        top_category: top_key(&by_category),
        top_method: top_key(&by_method),
        income,
        leftover: (income - total).round_dp(2),
        monthly: monthly_totals(&selected),
        by_category,
        by_method,
        rows: selected.iter().map(|r| ReportRow::from(*r)).collect(),
    }
}

fn monthly_totals(records: &[&ExpenseRecord]) -> Vec<MonthTotal> {
    let mut sums: HashMap<(i32, u32), Decimal> = HashMap::new();
    for r in records {
        *sums.entry((r.date.year(), r.date.month())).or_default() += r.amount;
    }

    let mut out: Vec<MonthTotal> = sums
        .into_iter()
        .map(|((year, month), total)| MonthTotal {
            year,
            month,
            month_name: month_name_pt(month).unwrap_or(""),
            total,
        })
        .collect();
    out.sort_by_key(|m| (m.year, m.month));
    out
}

fn group_totals<K, F>(records: &[&ExpenseRecord], key: F) -> Vec<GroupTotal<K>>
where
    K: Copy + Eq + Hash + Ord,
    F: Fn(&ExpenseRecord) -> K,
{
    let mut groups: HashMap<K, (Decimal, usize)> = HashMap::new();
    for &r in records {
        let entry = groups.entry(key(r)).or_default();
        entry.0 += r.amount;
        entry.1 += 1;
    }

    let mut out: Vec<GroupTotal<K>> = groups
        .into_iter()
        .map(|(key, (total, count))| GroupTotal { key, total, count })
        .collect();
    out.sort_by(|a, b| a.total.cmp(&b.total).then(a.key.cmp(&b.key)));
    out
}

/// Largest total; ties go to the first key in label order.
fn top_key<K: Copy + Ord>(groups: &[GroupTotal<K>]) -> Option<K> {
    groups
        .iter()
        .max_by(|a, b| a.total.cmp(&b.total).then(b.key.cmp(&a.key)))
        .map(|g| g.key)
}
