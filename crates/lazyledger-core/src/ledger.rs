//! The single-writer entry point hosts embed.
//!
//! `Ledger` owns the transaction store, the subscription book, the trip
//! scope, and a clock; every mutation takes `&mut self`, so the borrow
//! checker enforces the single-writer model and each maintenance sweep is
//! atomic with respect to all other operations.

use uuid::Uuid;

use lazyledger_domain::{
    LedgerSnapshot, Subscription, Transaction, TransactionDraft, TransactionKind, Trip,
};

use crate::error::CoreError;
use crate::insight::{InsightContext, ParsedTransaction};
use crate::store::TransactionStore;
use crate::subscriptions::SubscriptionBook;
use crate::summary::{self, CategoryTotal, DayGroup, Totals, WeeklySeries};
use crate::time::{Clock, SystemClock};
use crate::trip::TripScope;

/// Outcome of one maintenance sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceReport {
    /// Transactions emitted for subscriptions that fell due.
    pub materialized: Vec<Uuid>,
    /// Soft-deleted transactions removed for good.
    pub purged: usize,
}

pub struct Ledger {
    store: TransactionStore,
    subscriptions: SubscriptionBook,
    trips: TripScope,
    clock: Box<dyn Clock>,
}

impl Ledger {
    /// An empty ledger on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            store: TransactionStore::new(),
            subscriptions: SubscriptionBook::new(),
            trips: TripScope::new(),
            clock,
        }
    }

    /// Rebuilds a ledger from persisted state.
    pub fn from_snapshot(snapshot: LedgerSnapshot, clock: Box<dyn Clock>) -> Self {
        Self {
            store: TransactionStore::from_transactions(snapshot.transactions),
            subscriptions: SubscriptionBook::from_subscriptions(snapshot.subscriptions),
            trips: TripScope::from_active(snapshot.active_trip),
            clock,
        }
    }

    /// Serializes the complete state, soft-deleted transactions included.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::new(
            self.store.transactions().to_vec(),
            self.subscriptions.subscriptions().to_vec(),
            self.trips.active().cloned(),
            self.clock.now(),
        )
    }

    /// Validates and records a draft, stamping the clock's `now` and the
    /// active trip.
    pub fn record(&mut self, draft: TransactionDraft) -> Result<Uuid, CoreError> {
        let now = self.clock.now();
        let trip_id = self.trips.active_id();
        self.store.create(draft, trip_id, now)
    }

    /// Records a normalized voice-parser reply.
    pub fn record_parsed(&mut self, parsed: ParsedTransaction) -> Result<Uuid, CoreError> {
        self.record(parsed.into())
    }

    pub fn soft_delete(&mut self, id: Uuid) -> bool {
        let now = self.clock.now();
        self.store.soft_delete(id, now)
    }

    pub fn restore(&mut self, id: Uuid) -> bool {
        self.store.restore(id)
    }

    /// One atomic sweep: materialize due subscriptions, then purge expired
    /// soft-deletes. Hosts invoke this from their own timer or event loop;
    /// re-running it is always safe.
    pub fn run_maintenance(&mut self) -> MaintenanceReport {
        let now = self.clock.now();
        let materialized = self.subscriptions.materialize_due(&mut self.store, now);
        let purged = self.store.purge(now);
        MaintenanceReport {
            materialized,
            purged,
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.store.transactions()
    }

    pub fn totals(&self) -> Totals {
        summary::totals(self.store.transactions())
    }

    pub fn group_by_day(&self) -> Vec<DayGroup> {
        summary::group_by_day(self.store.transactions())
    }

    pub fn weekly_series(&self) -> WeeklySeries {
        summary::weekly_series(self.store.transactions(), self.clock.now())
    }

    pub fn category_breakdown(&self) -> Vec<CategoryTotal> {
        summary::category_breakdown(self.store.transactions())
    }

    /// Prompt context for the external insight service.
    pub fn insight_context(&self) -> InsightContext {
        InsightContext::from_transactions(self.store.transactions())
    }

    pub fn add_subscription(&mut self, subscription: Subscription) -> Uuid {
        self.subscriptions.add(subscription)
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        self.subscriptions.subscriptions()
    }

    pub fn set_active_trip(&mut self, trip: Option<Trip>) {
        self.trips.set_active(trip);
    }

    pub fn active_trip(&self) -> Option<&Trip> {
        self.trips.active()
    }

    /// Total live expense recorded under the given trip.
    pub fn trip_total(&self, trip_id: Uuid) -> f64 {
        self.store
            .live()
            .filter(|txn| txn.trip_id == Some(trip_id))
            .filter(|txn| txn.kind == TransactionKind::Expense)
            .map(|txn| txn.amount)
            .sum()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
