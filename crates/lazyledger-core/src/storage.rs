//! Abstraction over persistence backends.

use lazyledger_domain::LedgerSnapshot;

use crate::error::CoreError;

/// Abstraction over persistence backends capable of storing ledger
/// snapshots. The engine itself never performs I/O; a host picks a backend
/// and decides when to save.
pub trait SnapshotStorage: Send + Sync {
    fn save_snapshot(&self, name: &str, snapshot: &LedgerSnapshot) -> Result<(), CoreError>;
    fn load_snapshot(&self, name: &str) -> Result<LedgerSnapshot, CoreError>;
    fn list_snapshots(&self) -> Result<Vec<String>, CoreError>;
    fn delete_snapshot(&self, name: &str) -> Result<(), CoreError>;
}
