use crate::{
    model::{Attendee, Balance, Expense, Money, ParticipantId},
    services::{AtomicUnitConversionError, SettlementContext},
};
use indexmap::IndexMap;

/// What one attendee owes in shares and has paid up front.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParticipantTotals {
    pub owes: Money,
    pub paid: Money,
}

impl ParticipantTotals {
    /// Creditor-positive net: paid minus owed.
    pub fn net(&self) -> Money {
        self.paid - self.owes
    }
}

#[derive(Clone, Copy, Default)]
struct UnitTotals {
    owes: i64,
    paid: i64,
}

/// Per-attendee expense totals for a trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseTotals {
    total_spend: Money,
    per_participant: IndexMap<ParticipantId, ParticipantTotals>,
}

impl ExpenseTotals {
    /// Splits every expense across its beneficiaries in atomic units.
    ///
    /// Roster order is kept; payers or beneficiaries missing from the roster
    /// are appended in first-seen order and settled like everyone else, rather
    /// than dropped as a roster-only tally would. Shares of one expense always
    /// add up to its amount: the remainder units go to the first beneficiaries.
    pub fn calculate(
        attendees: &[Attendee],
        expenses: &[Expense],
        context: SettlementContext,
    ) -> Result<Self, AtomicUnitConversionError> {
        let mut units: IndexMap<ParticipantId, UnitTotals> = attendees
            .iter()
            .map(|attendee| (attendee.id.clone(), UnitTotals::default()))
            .collect();
        let roster: Vec<ParticipantId> = attendees.iter().map(|a| a.id.clone()).collect();
        let mut total_units = 0i64;

        for expense in expenses {
            let amount = context.to_atomic_units_i64(expense.amount)?;
            total_units += amount;
            units.entry(expense.payer.clone()).or_default().paid += amount;

            let beneficiaries = if expense.beneficiaries.is_empty() {
                roster.as_slice()
            } else {
                expense.beneficiaries.as_slice()
            };
            let shares = split_shares(amount, beneficiaries.len());
            for (beneficiary, share) in beneficiaries.iter().zip(shares) {
                units.entry(beneficiary.clone()).or_default().owes += share;
            }
        }

        let per_participant = units
            .into_iter()
            .map(|(id, totals)| -> Result<_, AtomicUnitConversionError> {
                Ok((
                    id,
                    ParticipantTotals {
                        owes: context.from_atomic_units(totals.owes)?,
                        paid: context.from_atomic_units(totals.paid)?,
                    },
                ))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;
        let total_spend = context.from_atomic_units(total_units)?;

        tracing::debug!(
            attendee_count = attendees.len(),
            expense_count = expenses.len(),
            participant_count = per_participant.len(),
            total_spend = %total_spend,
            "Expense totals calculated"
        );

        Ok(Self {
            total_spend,
            per_participant,
        })
    }

    pub fn total_spend(&self) -> Money {
        self.total_spend
    }

    pub fn get(&self, participant: &ParticipantId) -> Option<&ParticipantTotals> {
        self.per_participant.get(participant)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantTotals)> + '_ {
        self.per_participant.iter()
    }

    /// Creditor-positive balances for every participant, in roster order.
    pub fn balances(&self) -> Vec<Balance> {
        self.per_participant
            .iter()
            .map(|(id, totals)| Balance {
                participant: id.clone(),
                net: totals.net(),
            })
            .collect()
    }
}

/// Even split of `amount` units over `count` people; the first
/// `amount % count` people carry one extra unit.
fn split_shares(amount: i64, count: usize) -> impl Iterator<Item = i64> {
    let divisor = count.max(1) as i64;
    let base = amount / divisor;
    let remainder = (amount % divisor).unsigned_abs() as usize;
    (0..count).map(move |idx| if idx < remainder { base + amount.signum() } else { base })
}
