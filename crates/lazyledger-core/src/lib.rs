//! lazyledger-core
//!
//! The ledger state and aggregation engine: transaction lifecycle,
//! subscription materialization, trip tagging, derived views, and the
//! boundary contracts a host wires to persistence and the AI text service.
//! Depends on lazyledger-domain. No rendering, no network, no filesystem.

pub mod error;
pub mod insight;
pub mod ledger;
pub mod storage;
pub mod store;
pub mod subscriptions;
pub mod summary;
pub mod time;
pub mod trip;

pub use error::CoreError;
pub use insight::*;
pub use ledger::*;
pub use storage::*;
pub use store::*;
pub use subscriptions::*;
pub use summary::*;
pub use time::*;
pub use trip::*;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults and
/// emits a startup info log. Hosts that install their own subscriber can
/// skip this entirely; the engine only ever emits events.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("lazyledger_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("LazyLedger core tracing initialized.");
    });
}
