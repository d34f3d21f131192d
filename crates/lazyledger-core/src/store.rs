//! The authoritative transaction collection and its lifecycle operations.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use lazyledger_domain::{Transaction, TransactionDraft};

use crate::error::CoreError;

/// How long a soft-deleted transaction survives before a sweep removes it.
pub const RETENTION_WINDOW_HOURS: i64 = 48;

/// Owns the ordered transaction collection. All mutation goes through the
/// public operations here; the internal order is insertion order, and any
/// display ordering is a read-time concern of the aggregation views.
#[derive(Debug, Default, Clone)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from previously persisted transactions.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Validates a draft and appends the resulting transaction. The draft is
    /// rejected before any state changes: a missing or blank item, a missing
    /// or non-positive amount, a missing kind or category, or a category on
    /// the wrong side of the ledger all fail validation.
    pub fn create(
        &mut self,
        draft: TransactionDraft,
        trip_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Uuid, CoreError> {
        let mut transaction = match Self::validate(draft, now) {
            Ok(transaction) => transaction,
            Err(err) => {
                tracing::warn!(%err, "rejected transaction draft");
                return Err(err);
            }
        };
        transaction.trip_id = trip_id;
        let id = transaction.id;
        tracing::debug!(%id, item = %transaction.item, "recorded transaction");
        self.transactions.push(transaction);
        Ok(id)
    }

    /// Appends an already-built transaction, bypassing draft validation.
    /// Used by the subscription materializer, which constructs complete
    /// records itself.
    pub fn insert(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    /// Marks a live transaction deleted at `now`. Returns `false` without
    /// touching anything for unknown or already-deleted ids, so redundant
    /// calls are safe.
    pub fn soft_delete(&mut self, id: Uuid, now: DateTime<Utc>) -> bool {
        match self.transactions.iter_mut().find(|txn| txn.id == id) {
            Some(txn) if txn.is_live() => {
                txn.mark_deleted(now);
                tracing::debug!(%id, "soft-deleted transaction");
                true
            }
            _ => false,
        }
    }

    /// Clears the soft-delete marker. No-op for unknown or live ids.
    pub fn restore(&mut self, id: Uuid) -> bool {
        match self.transactions.iter_mut().find(|txn| txn.id == id) {
            Some(txn) if !txn.is_live() => {
                txn.restore();
                tracing::debug!(%id, "restored transaction");
                true
            }
            _ => false,
        }
    }

    /// Permanently removes every transaction soft-deleted more than the
    /// retention window ago, returning the count. Live transactions are
    /// never touched. If the clock moved backwards the age comes out
    /// negative and the entry is simply kept for a later sweep.
    pub fn purge(&mut self, now: DateTime<Utc>) -> usize {
        let retention = Duration::hours(RETENTION_WINDOW_HOURS);
        let before = self.transactions.len();
        self.transactions.retain(|txn| match txn.deleted_at {
            Some(deleted_at) => now - deleted_at <= retention,
            None => true,
        });
        let purged = before - self.transactions.len();
        if purged > 0 {
            tracing::info!(purged, "purged expired soft-deleted transactions");
        }
        purged
    }

    /// Every transaction in insertion order, soft-deleted entries included.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Iterates the transactions that count towards aggregates.
    pub fn live(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|txn| txn.is_live())
    }

    /// Iterates the soft-deleted transactions still within their grace
    /// period (the trash-bin view).
    pub fn trashed(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|txn| !txn.is_live())
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Consumes the store for snapshotting.
    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    fn validate(draft: TransactionDraft, now: DateTime<Utc>) -> Result<Transaction, CoreError> {
        let item = draft
            .item
            .as_deref()
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .ok_or_else(|| CoreError::Validation("item must be present and non-empty".into()))?
            .to_string();
        let amount = draft
            .amount
            .ok_or_else(|| CoreError::Validation("amount is required".into()))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::Validation(format!(
                "amount must be a positive number, got {amount}"
            )));
        }
        let kind = draft
            .kind
            .ok_or_else(|| CoreError::Validation("transaction kind is required".into()))?;
        let category = draft
            .category
            .ok_or_else(|| CoreError::Validation("category is required".into()))?;
        if category.kind() != kind {
            return Err(CoreError::Validation(format!(
                "category {category} is not valid for {kind} transactions"
            )));
        }
        let timestamp = draft.timestamp.unwrap_or(now);
        Ok(Transaction::new(item, amount, kind, category, timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyledger_domain::{Category, TransactionKind};

    fn now() -> DateTime<Utc> {
        "2025-08-07T12:00:00Z".parse().unwrap()
    }

    fn lunch_draft() -> TransactionDraft {
        TransactionDraft::new("Lunch", 120.0, TransactionKind::Expense, Category::Food)
    }

    #[test]
    fn create_assigns_fresh_ids_and_defaults_timestamp() {
        let mut store = TransactionStore::new();
        let first = store.create(lunch_draft(), None, now()).expect("create");
        let second = store.create(lunch_draft(), None, now()).expect("create");
        assert_ne!(first, second);
        let stored = store.get(first).expect("stored");
        assert_eq!(stored.timestamp, now());
        assert!(stored.is_live());
        assert!(!stored.is_recurring);
    }

    #[test]
    fn create_keeps_an_explicit_timestamp() {
        let mut store = TransactionStore::new();
        let earlier = now() - Duration::days(3);
        let id = store
            .create(lunch_draft().at(earlier), None, now())
            .expect("create");
        assert_eq!(store.get(id).expect("stored").timestamp, earlier);
    }

    #[test]
    fn create_rejects_incomplete_drafts() {
        let mut store = TransactionStore::new();
        let missing_item = TransactionDraft {
            item: None,
            ..lunch_draft()
        };
        let blank_item = TransactionDraft {
            item: Some("   ".into()),
            ..lunch_draft()
        };
        let zero_amount = TransactionDraft {
            amount: Some(0.0),
            ..lunch_draft()
        };
        let missing_category = TransactionDraft {
            category: None,
            ..lunch_draft()
        };
        for draft in [missing_item, blank_item, zero_amount, missing_category] {
            let err = store.create(draft, None, now()).expect_err("must reject");
            assert!(matches!(err, CoreError::Validation(_)), "got {err:?}");
        }
        assert!(store.is_empty(), "no partial transaction may be stored");
    }

    #[test]
    fn create_rejects_category_on_the_wrong_side() {
        let mut store = TransactionStore::new();
        let draft =
            TransactionDraft::new("Lunch", 120.0, TransactionKind::Expense, Category::Salary);
        let err = store.create(draft, None, now()).expect_err("must reject");
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn soft_delete_and_restore_are_idempotent() {
        let mut store = TransactionStore::new();
        let id = store.create(lunch_draft(), None, now()).expect("create");

        assert!(store.soft_delete(id, now()));
        let deleted_at = store.get(id).expect("stored").deleted_at;
        assert!(!store.soft_delete(id, now() + Duration::hours(1)));
        assert_eq!(store.get(id).expect("stored").deleted_at, deleted_at);

        assert!(store.restore(id));
        assert!(!store.restore(id));
        assert!(store.get(id).expect("stored").is_live());
    }

    #[test]
    fn soft_delete_of_unknown_id_is_a_no_op() {
        let mut store = TransactionStore::new();
        assert!(!store.soft_delete(Uuid::new_v4(), now()));
        assert!(!store.restore(Uuid::new_v4()));
    }

    #[test]
    fn restore_preserves_the_original_record() {
        let mut store = TransactionStore::new();
        let id = store.create(lunch_draft(), None, now()).expect("create");
        let before = store.get(id).expect("stored").clone();
        store.soft_delete(id, now() + Duration::minutes(5));
        store.restore(id);
        assert_eq!(store.get(id).expect("stored"), &before);
    }

    #[test]
    fn purge_honors_the_retention_boundary() {
        let mut store = TransactionStore::new();
        let id = store.create(lunch_draft(), None, now()).expect("create");
        store.soft_delete(id, now());

        // Exactly 48h old: still within the window.
        assert_eq!(store.purge(now() + Duration::hours(48)), 0);
        assert!(store.get(id).is_some());

        assert_eq!(store.purge(now() + Duration::hours(49)), 1);
        assert!(store.get(id).is_none());
        assert!(!store.restore(id));
    }

    #[test]
    fn purge_is_idempotent_and_skips_live_entries() {
        let mut store = TransactionStore::new();
        let live = store.create(lunch_draft(), None, now()).expect("create");
        let doomed = store.create(lunch_draft(), None, now()).expect("create");
        store.soft_delete(doomed, now());

        let sweep_at = now() + Duration::hours(49);
        assert_eq!(store.purge(sweep_at), 1);
        assert_eq!(store.purge(sweep_at), 0);
        assert!(store.get(live).is_some());
    }

    #[test]
    fn purge_tolerates_a_backward_clock_jump() {
        let mut store = TransactionStore::new();
        let id = store.create(lunch_draft(), None, now()).expect("create");
        store.soft_delete(id, now());
        // The sweep clock is behind the deletion instant; age is negative.
        assert_eq!(store.purge(now() - Duration::hours(72)), 0);
        assert!(store.get(id).is_some());
    }

    #[test]
    fn trashed_view_lists_only_soft_deleted_entries() {
        let mut store = TransactionStore::new();
        let keep = store.create(lunch_draft(), None, now()).expect("create");
        let drop = store.create(lunch_draft(), None, now()).expect("create");
        store.soft_delete(drop, now());
        assert_eq!(store.live().count(), 1);
        let trashed: Vec<_> = store.trashed().map(|txn| txn.id).collect();
        assert_eq!(trashed, vec![drop]);
        assert!(store.get(keep).expect("stored").is_live());
    }
}
