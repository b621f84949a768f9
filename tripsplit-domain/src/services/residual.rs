use crate::model::{Balance, Money, ParticipantId, Transfer};
use fxhash::FxHashMap;

/// Portion of each balance that `transfers` leave unsettled.
///
/// Empty when the balances summed to zero and were fully settled; otherwise
/// the caller can surface the discrepancy to the group.
pub fn unsettled_balances(balances: &[Balance], transfers: &[Transfer]) -> Vec<Balance> {
    let mut flows: FxHashMap<&ParticipantId, Money> = FxHashMap::default();
    for transfer in transfers {
        *flows.entry(&transfer.from).or_default() -= transfer.amount;
        *flows.entry(&transfer.to).or_default() += transfer.amount;
    }

    balances
        .iter()
        .filter_map(|balance| {
            let settled = flows.get(&balance.participant).copied().unwrap_or_default();
            let residual = balance.net - settled;
            (!residual.is_zero()).then(|| Balance {
                participant: balance.participant.clone(),
                net: residual,
            })
        })
        .collect()
}
