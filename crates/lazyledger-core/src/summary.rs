//! Pure aggregation views over a transaction snapshot.
//!
//! Every function here skips soft-deleted transactions, performs no I/O,
//! and is deterministic given the snapshot and a reference instant. The
//! views produce display order; the store itself only guarantees
//! insertion order.

use std::cmp::{Ordering, Reverse};

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::Serialize;

use lazyledger_domain::{Category, Transaction, TransactionKind};

/// Running balance over live transactions.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for txn in live(transactions) {
        match txn.kind {
            TransactionKind::Income => totals.income += txn.amount,
            TransactionKind::Expense => totals.expense += txn.amount,
        }
    }
    totals.balance = totals.income - totals.expense;
    totals
}

/// One calendar day's transactions, most recent first.
#[derive(Debug, Clone)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
}

/// Groups live transactions by the date portion of their timestamp.
/// Groups run most-recent-day first and entries within a day most-recent
/// first.
pub fn group_by_day(transactions: &[Transaction]) -> Vec<DayGroup> {
    let mut ordered: Vec<&Transaction> = live(transactions).collect();
    ordered.sort_by_key(|txn| Reverse(txn.timestamp));

    let mut groups: Vec<DayGroup> = Vec::new();
    for txn in ordered {
        let date = txn.timestamp.date_naive();
        match groups.last_mut() {
            Some(group) if group.date == date => group.transactions.push(txn.clone()),
            _ => groups.push(DayGroup {
                date,
                transactions: vec![txn.clone()],
            }),
        }
    }
    groups
}

/// Trailing seven-day expense series, bucketed by day of week.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct WeeklySeries {
    /// Expense totals indexed Sunday..Saturday.
    pub buckets: [f64; 7],
}

impl WeeklySeries {
    pub fn total(&self) -> f64 {
        self.buckets.iter().sum()
    }

    pub fn bucket(&self, weekday: Weekday) -> f64 {
        self.buckets[weekday.num_days_from_sunday() as usize]
    }
}

/// Sums live expense amounts into weekday buckets for transactions within
/// the trailing week of `now`. Income never participates.
pub fn weekly_series(transactions: &[Transaction], now: DateTime<Utc>) -> WeeklySeries {
    let mut series = WeeklySeries::default();
    for txn in live(transactions) {
        if txn.kind != TransactionKind::Expense {
            continue;
        }
        if !within_trailing_week(txn.timestamp, now) {
            continue;
        }
        let bucket = txn.timestamp.weekday().num_days_from_sunday() as usize;
        series.buckets[bucket] += txn.amount;
    }
    series
}

// Inclusive at the boundary: an entry exactly 7.0 days from `now` counts,
// one at 7.1 days does not. The distance is absolute, so entries dated up
// to a week into the future count as well.
fn within_trailing_week(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let elapsed_days = (now - timestamp).num_milliseconds().abs() as f64 / 86_400_000.0;
    elapsed_days.ceil() <= 7.0
}

/// A category's summed expense and its share of total expense.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
    /// Percentage of total live expense; 0 when there is no expense.
    pub share: f64,
}

/// Per-category expense totals, sorted descending by amount. Ties keep
/// first-encounter order.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut sums: Vec<(Category, f64)> = Vec::new();
    for txn in live(transactions) {
        if txn.kind != TransactionKind::Expense {
            continue;
        }
        match sums.iter_mut().find(|(category, _)| *category == txn.category) {
            Some((_, total)) => *total += txn.amount,
            None => sums.push((txn.category, txn.amount)),
        }
    }

    let total_expense: f64 = sums.iter().map(|(_, total)| total).sum();
    let mut breakdown: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            total,
            share: if total_expense > 0.0 {
                total / total_expense * 100.0
            } else {
                0.0
            },
        })
        .collect();
    breakdown.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    breakdown
}

fn live(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(|txn| txn.is_live())
}
