/// Net balance of each person (positive: is owed money, negative: owes money)
/// The unit is an integer (e.g., cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonBalance<Id = u64> {
    pub id: Id,
    pub balance: i64,
}

/// A single instruction: `from` (a debtor) pays `to` (a creditor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payment<Id = u64> {
    pub from: Id,
    pub to: Id,
    pub amount: i64,
}
