use crate::model::{Money, ParticipantId};
use fxhash::FxHashSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attendee {
    pub id: ParticipantId,
    pub name: String,
}

/// A shared cost paid by one attendee on behalf of its beneficiaries.
///
/// An empty beneficiary list means the whole roster shares the cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: Money,
    pub payer: ParticipantId,
    pub beneficiaries: Vec<ParticipantId>,
}

impl Expense {
    /// Normalizes the record: the description is trimmed and repeated
    /// beneficiaries are dropped (first occurrence wins). Amounts are taken
    /// as given; sign checks belong to whoever parses the input.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
        payer: ParticipantId,
        beneficiaries: impl IntoIterator<Item = ParticipantId>,
    ) -> Self {
        let mut seen = FxHashSet::default();
        let beneficiaries = beneficiaries
            .into_iter()
            .filter(|beneficiary| seen.insert(beneficiary.clone()))
            .collect();

        Self {
            id: id.into(),
            description: description.into().trim().to_owned(),
            amount,
            payer,
            beneficiaries,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Active,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PokerPlayer {
    pub attendee: ParticipantId,
    pub buy_in: Money,
    pub cash_out: Money,
}

impl PokerPlayer {
    /// Winnings (positive) or losses (negative) for one game.
    pub fn net(&self) -> Money {
        self.cash_out - self.buy_in
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PokerGame {
    pub id: String,
    pub status: GameStatus,
    pub players: Vec<PokerPlayer>,
}
