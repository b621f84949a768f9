use crate::{
    error::{RepositoryError, SettlementOptimizationError},
    model::SettlementPlan,
};
use std::collections::HashMap;
use tripsplit_domain::{
    Attendee, Balance, Expense, Money, ParticipantId, PokerGame, SettlementContext,
    SettlementStatus, Transfer, TransferKey,
};

pub trait TripRepository: Send + Sync {
    fn attendees(&self) -> Result<Vec<Attendee>, RepositoryError>;

    fn expenses(&self) -> Result<Vec<Expense>, RepositoryError>;

    fn poker_games(&self) -> Result<Vec<PokerGame>, RepositoryError>;
}

/// Persisted paid flags keyed by `(from, to)`.
pub trait SettlementStatusStore: Send + Sync {
    fn list(&self) -> Result<Vec<SettlementStatus>, RepositoryError>;

    /// Flips the paid flag for `key` and returns the stored status.
    fn toggle(
        &self,
        key: TransferKey,
        recorded_amount: Option<Money>,
    ) -> Result<SettlementStatus, RepositoryError>;
}

pub trait SettlementOptimizer: Send + Sync {
    fn optimize(
        &self,
        balances: &[Balance],
        plan: SettlementPlan,
        context: SettlementContext,
    ) -> Result<Vec<Transfer>, SettlementOptimizationError>;
}

pub trait MemberDirectory: Send + Sync {
    fn display_name(&self, participant: &ParticipantId) -> Option<&str>;
}

impl MemberDirectory for HashMap<ParticipantId, String> {
    fn display_name(&self, participant: &ParticipantId) -> Option<&str> {
        self.get(participant).map(String::as_str)
    }
}

impl MemberDirectory for Vec<Attendee> {
    fn display_name(&self, participant: &ParticipantId) -> Option<&str> {
        self.iter()
            .find(|attendee| &attendee.id == participant)
            .map(|attendee| attendee.name.as_str())
    }
}
