#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    AnnotatedTransfer, Attendee, Balance, Expense, GameStatus, InvalidAmount, Money,
    ParticipantId, PokerGame, PokerPlayer, SettlementStatus, Transfer, TransferKey,
    annotate_transfers,
};
pub use services::{
    AtomicUnitConversionError, ExpenseTotals, ParticipantTotals, PokerStanding, PokerSummary,
    RoundingMode, SettlementContext, unsettled_balances,
};
