use crate::model::{Money, ParticipantId, Transfer};
use chrono::{DateTime, Utc};
use fxhash::FxHashMap;
use std::fmt;

/// Identity of a transfer across recomputations: the `(from, to)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransferKey {
    pub from: ParticipantId,
    pub to: ParticipantId,
}

impl TransferKey {
    pub fn new(from: impl Into<ParticipantId>, to: impl Into<ParticipantId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn of(transfer: &Transfer) -> Self {
        Self {
            from: transfer.from.clone(),
            to: transfer.to.clone(),
        }
    }
}

impl fmt::Display for TransferKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Persisted "marked as paid" flag for a `(from, to)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementStatus {
    pub key: TransferKey,
    pub paid: bool,
    pub recorded_amount: Option<Money>,
    pub updated_at: DateTime<Utc>,
}

impl SettlementStatus {
    /// Flips the paid flag of `previous` (unpaid when there is none).
    /// A newly supplied amount replaces the recorded one; otherwise it is kept.
    pub fn toggled(
        previous: Option<&SettlementStatus>,
        key: TransferKey,
        recorded_amount: Option<Money>,
        now: DateTime<Utc>,
    ) -> Self {
        let paid = !previous.is_some_and(|status| status.paid);
        let recorded_amount =
            recorded_amount.or_else(|| previous.and_then(|status| status.recorded_amount));

        Self {
            key,
            paid,
            recorded_amount,
            updated_at: now,
        }
    }
}

/// A freshly computed transfer together with its bookkeeping state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatedTransfer {
    pub transfer: Transfer,
    pub paid: bool,
    pub recorded_amount: Option<Money>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Matches stored statuses to transfers by `(from, to)`.
///
/// Statuses whose pair no longer appears are ignored; transfers without a
/// status are unpaid.
pub fn annotate_transfers(
    transfers: Vec<Transfer>,
    statuses: &[SettlementStatus],
) -> Vec<AnnotatedTransfer> {
    let lookup: FxHashMap<&TransferKey, &SettlementStatus> =
        statuses.iter().map(|status| (&status.key, status)).collect();

    transfers
        .into_iter()
        .map(|transfer| {
            let status = lookup.get(&TransferKey::of(&transfer)).copied();
            AnnotatedTransfer {
                paid: status.is_some_and(|status| status.paid),
                recorded_amount: status.and_then(|status| status.recorded_amount),
                updated_at: status.map(|status| status.updated_at),
                transfer,
            }
        })
        .collect()
}
