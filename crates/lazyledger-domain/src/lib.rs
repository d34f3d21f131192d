//! lazyledger-domain
//!
//! Pure domain models (Transaction, Category, Subscription, Trip, snapshot).
//! No I/O, no services, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod ledger;
pub mod subscription;
pub mod transaction;
pub mod trip;

pub use category::*;
pub use common::*;
pub use ledger::*;
pub use subscription::*;
pub use transaction::*;
pub use trip::*;
