//! Domain models for ledger transactions and the inbound draft shape.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;
use crate::common::{Amounted, Displayable, Identifiable};

/// Enumerates which side of the ledger a transaction moves money on.
/// The stored amount is always a non-negative magnitude; the kind carries
/// the sign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Expense,
    Income,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        };
        f.write_str(label)
    }
}

/// A single money-movement event. Immutable once recorded except for the
/// soft-delete marker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub item: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: Category,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        item: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: Category,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            item: item.into(),
            amount,
            kind,
            category,
            timestamp,
            deleted_at: None,
            is_recurring: false,
            trip_id: None,
        }
    }

    /// Returns `true` while the transaction counts towards aggregates.
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Marks the transaction soft-deleted. A second call keeps the original
    /// deletion instant.
    pub fn mark_deleted(&mut self, at: DateTime<Utc>) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(at);
        }
    }

    /// Clears the soft-delete marker.
    pub fn restore(&mut self) {
        self.deleted_at = None;
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} [{}] {}", self.item, self.kind, self.category)
    }
}

/// Partially specified transaction as received from manual entry or the
/// voice parser. Validation happens at the store boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TransactionDraft {
    /// Builds a fully populated draft with no explicit timestamp.
    pub fn new(
        item: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: Category,
    ) -> Self {
        Self {
            item: Some(item.into()),
            amount: Some(amount),
            kind: Some(kind),
            category: Some(category),
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
