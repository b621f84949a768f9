pub mod expense_totals;
pub mod poker_summary;
pub mod residual;
pub mod settlement_context;

pub use expense_totals::{ExpenseTotals, ParticipantTotals};
pub use poker_summary::{PokerStanding, PokerSummary};
pub use residual::unsettled_balances;
pub use settlement_context::{AtomicUnitConversionError, RoundingMode, SettlementContext};
