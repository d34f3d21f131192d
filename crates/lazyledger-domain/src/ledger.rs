//! The persisted state shape for hosts that add durability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::subscription::Subscription;
use crate::transaction::Transaction;
use crate::trip::Trip;

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// A lossless serialization of the engine's state: every transaction
/// (including soft-deleted ones), every subscription, and the active trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerSnapshot {
    #[serde(default = "LedgerSnapshot::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_trip: Option<Trip>,
    pub saved_at: DateTime<Utc>,
}

impl LedgerSnapshot {
    pub fn new(
        transactions: Vec<Transaction>,
        subscriptions: Vec<Subscription>,
        active_trip: Option<Trip>,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions,
            subscriptions,
            active_trip,
            saved_at,
        }
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
