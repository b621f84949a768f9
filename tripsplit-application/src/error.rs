use thiserror::Error;
use tripsplit_domain::{AtomicUnitConversionError, Money, ParticipantId};

/// Failure reported by a storage adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RepositoryError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementOptimizationError {
    #[error("balance of '{participant}' cannot be converted to atomic units: {source}")]
    InvalidBalance {
        participant: ParticipantId,
        source: AtomicUnitConversionError,
    },
    #[error("transfer amount cannot be represented: {0}")]
    InvalidTransfer(AtomicUnitConversionError),
}

#[derive(Debug, Error)]
pub enum SettlementServiceError {
    #[error("trip data unavailable: {0}")]
    Repository(#[from] RepositoryError),
    #[error("expense totals could not be computed: {0}")]
    Totals(#[from] AtomicUnitConversionError),
    #[error(transparent)]
    Optimization(#[from] SettlementOptimizationError),
    #[error("recorded amount must be positive (found {0})")]
    InvalidRecordedAmount(Money),
    #[error("'{0}' cannot settle with themselves")]
    SelfTransfer(ParticipantId),
}
