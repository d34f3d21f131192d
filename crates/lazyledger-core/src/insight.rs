//! Boundary contracts for the external AI text service.
//!
//! The engine never calls the service itself. This module defines the
//! shapes a host exchanges with it and normalizes replies, so a malformed
//! or missing response collapses to "no result" without leaving partial
//! state behind.

use std::cmp::Reverse;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use lazyledger_domain::{Category, Transaction, TransactionDraft, TransactionKind};

use crate::summary::{self, CategoryTotal};

/// How many recent entries an insight request carries.
const RECENT_ENTRY_LIMIT: usize = 15;

/// Structured reply expected from the voice parser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedTransaction {
    pub item: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: Category,
    #[serde(default)]
    pub alternative_categories: Vec<Category>,
}

impl ParsedTransaction {
    /// Normalizes a raw service reply. Malformed JSON, a blank item, or a
    /// non-positive amount all collapse to `None`; the caller records
    /// nothing in that case.
    pub fn from_json(raw: &str) -> Option<ParsedTransaction> {
        let parsed: ParsedTransaction = serde_json::from_str(raw).ok()?;
        if parsed.item.trim().is_empty() {
            return None;
        }
        if !parsed.amount.is_finite() || parsed.amount <= 0.0 {
            return None;
        }
        Some(parsed)
    }
}

impl From<ParsedTransaction> for TransactionDraft {
    fn from(parsed: ParsedTransaction) -> Self {
        TransactionDraft::new(parsed.item, parsed.amount, parsed.kind, parsed.category)
    }
}

/// One line of recent ledger activity.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecentEntry {
    pub kind: TransactionKind,
    pub item: String,
    pub amount: f64,
    pub category: Category,
}

/// Compact, live-only description of ledger state a host hands to the
/// insight service as prompt context.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InsightContext {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub top_category: Option<CategoryTotal>,
    pub recent: Vec<RecentEntry>,
}

impl InsightContext {
    /// Derives the request payload from a transaction snapshot: live-only
    /// totals, the top expense category, and the newest entries.
    pub fn from_transactions(transactions: &[Transaction]) -> InsightContext {
        let totals = summary::totals(transactions);
        let top_category = summary::category_breakdown(transactions).into_iter().next();

        let mut recent: Vec<&Transaction> =
            transactions.iter().filter(|txn| txn.is_live()).collect();
        recent.sort_by_key(|txn| Reverse(txn.timestamp));
        let recent = recent
            .into_iter()
            .take(RECENT_ENTRY_LIMIT)
            .map(|txn| RecentEntry {
                kind: txn.kind,
                item: txn.item.clone(),
                amount: txn.amount,
                category: txn.category,
            })
            .collect();

        InsightContext {
            total_income: totals.income,
            total_expense: totals.expense,
            balance: totals.balance,
            top_category,
            recent,
        }
    }
}

/// Localized insight pair returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightSummary {
    pub zh: String,
    pub en: String,
}

static FALLBACK_SUMMARY: Lazy<InsightSummary> = Lazy::new(|| InsightSummary {
    zh: "目前無法連接 AI 分析，請稍後再試。".into(),
    en: "AI analysis is currently unavailable. Please try again later.".into(),
});

impl InsightSummary {
    /// Normalizes a raw service reply; `None` when malformed or incomplete.
    pub fn from_json(raw: &str) -> Option<InsightSummary> {
        let summary: InsightSummary = serde_json::from_str(raw).ok()?;
        if summary.zh.trim().is_empty() || summary.en.trim().is_empty() {
            return None;
        }
        Some(summary)
    }

    /// Fixed bilingual strings for when the service is unreachable.
    /// Recording never blocks on the insight call, so hosts show this and
    /// move on.
    pub fn fallback() -> InsightSummary {
        FALLBACK_SUMMARY.clone()
    }
}
