#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod ports;
pub mod settlement_service;

pub use error::{RepositoryError, SettlementOptimizationError, SettlementServiceError};
pub use model::{ExpenseSettlementReport, PokerSettlementReport, SettlementPlan};
pub use ports::{MemberDirectory, SettlementOptimizer, SettlementStatusStore, TripRepository};
pub use settlement_service::SettlementService;
