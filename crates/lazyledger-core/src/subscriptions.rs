//! Recurring-subscription bookkeeping and due-date materialization.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use lazyledger_domain::{Subscription, Transaction, TransactionKind};

use crate::store::TransactionStore;

/// Owns the subscription templates. The set is append-only: templates are
/// added by explicit user action and never deleted or paused.
#[derive(Debug, Default, Clone)]
pub struct SubscriptionBook {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the book from previously persisted subscriptions.
    pub fn from_subscriptions(subscriptions: Vec<Subscription>) -> Self {
        Self { subscriptions }
    }

    pub fn add(&mut self, subscription: Subscription) -> Uuid {
        let id = subscription.id;
        self.subscriptions.push(subscription);
        id
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn get(&self, id: Uuid) -> Option<&Subscription> {
        self.subscriptions.iter().find(|sub| sub.id == id)
    }

    /// Consumes the book for snapshotting.
    pub fn into_subscriptions(self) -> Vec<Subscription> {
        self.subscriptions
    }

    /// Emits one expense transaction for every subscription due on the
    /// current calendar day and advances its due date in the same step, so
    /// a template materializes at most once per due date no matter how
    /// often the sweep runs.
    pub fn materialize_due(
        &mut self,
        store: &mut TransactionStore,
        now: DateTime<Utc>,
    ) -> Vec<Uuid> {
        let today = now.date_naive();
        let mut created = Vec::new();
        for subscription in &mut self.subscriptions {
            if !subscription.is_due_on(today) {
                continue;
            }
            let mut transaction = Transaction::new(
                subscription.name.clone(),
                subscription.amount,
                TransactionKind::Expense,
                subscription.category,
                now,
            );
            transaction.is_recurring = true;
            let id = store.insert(transaction);
            subscription.advance();
            tracing::info!(
                subscription = %subscription.name,
                %id,
                next = %subscription.next_payment_date,
                "materialized subscription payment"
            );
            created.push(id);
        }
        created
    }
}
