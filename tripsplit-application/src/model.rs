use tripsplit_domain::{AnnotatedTransfer, Balance, ExpenseTotals, PokerSummary, Transfer};

/// Which settlement variant a call site runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementPlan {
    /// Greedy matching followed by the consolidation pass.
    Consolidated,
    /// Greedy matching only.
    GreedyOnly,
}

/// Shared-expense settlement, with paid flags merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseSettlementReport {
    pub totals: ExpenseTotals,
    pub balances: Vec<Balance>,
    pub transfers: Vec<AnnotatedTransfer>,
    /// Residual balances when the input did not sum to zero.
    pub unsettled: Vec<Balance>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokerSettlementReport {
    pub summary: PokerSummary,
    pub transfers: Vec<Transfer>,
    pub unsettled: Vec<Balance>,
}
