pub const MEMBER: &str = "Member";
pub const PLAYER: &str = "Player";
pub const PAID: &str = "Paid";
pub const OWES: &str = "Owes";
pub const BALANCE: &str = "Balance";
pub const BUY_IN: &str = "Buy-in";
pub const CASH_OUT: &str = "Cash-out";
pub const NET: &str = "Net";
pub const FROM: &str = "From";
pub const TO: &str = "To";
pub const AMOUNT: &str = "Amount";
pub const STATUS: &str = "Status";
pub const STATUS_PAID: &str = "paid";
pub const STATUS_PENDING: &str = "pending";
pub const TOTAL_SPEND: &str = "Total spend";
pub const ALL_SETTLED: &str = "All settled, no transfers needed.";
pub const NO_POKER_GAMES: &str = "No poker games recorded.";
pub const UNSETTLED_WARNING: &str = "Balances do not add up; left unsettled:";
