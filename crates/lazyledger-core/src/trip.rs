//! The active travel context consumed by the transaction create path.

use uuid::Uuid;

use lazyledger_domain::Trip;

/// Holds at most one active trip. Activating a new trip replaces the
/// previous one; transactions already recorded keep whatever tag they were
/// created with.
#[derive(Debug, Default, Clone)]
pub struct TripScope {
    active: Option<Trip>,
}

impl TripScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the scope from a persisted active trip.
    pub fn from_active(active: Option<Trip>) -> Self {
        Self { active }
    }

    /// Replaces the active trip. Passing `None` ends travel mode.
    pub fn set_active(&mut self, trip: Option<Trip>) {
        self.active = trip.map(|mut trip| {
            trip.is_active = true;
            trip
        });
    }

    pub fn active(&self) -> Option<&Trip> {
        self.active.as_ref()
    }

    /// The id stamped onto newly created transactions.
    pub fn active_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|trip| trip.id)
    }

    /// Consumes the scope for snapshotting.
    pub fn into_active(self) -> Option<Trip> {
        self.active
    }
}
