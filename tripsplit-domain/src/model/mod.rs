mod money;
mod participant;
mod records;
mod status;

pub use money::{InvalidAmount, Money};
pub use participant::ParticipantId;
pub use records::{Attendee, Expense, GameStatus, PokerGame, PokerPlayer};
pub use status::{AnnotatedTransfer, SettlementStatus, TransferKey, annotate_transfers};

/// Net position of one participant (positive: is owed, negative: owes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balance {
    pub participant: ParticipantId,
    pub net: Money,
}

impl Balance {
    pub fn new(participant: impl Into<ParticipantId>, net: Money) -> Self {
        Self {
            participant: participant.into(),
            net,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}
