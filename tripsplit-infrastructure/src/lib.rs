#![warn(clippy::uninlined_format_args)]

pub mod optimizer;
pub mod snapshot;
pub mod status_store;

pub use optimizer::{TripSettlementOptimizer, compute_settlement};
pub use snapshot::{JsonTripSnapshot, SnapshotError};
pub use status_store::InMemorySettlementStatusStore;
