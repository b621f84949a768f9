use tripsplit_application::{SettlementOptimizationError, SettlementOptimizer, SettlementPlan};
use tripsplit_domain::{Balance, SettlementContext, Transfer};
use tripsplit_settlement::{PersonBalance, SettlementOptions, construct_settlement};

/// [`SettlementOptimizer`] backed by the greedy + consolidation engine.
#[derive(Default)]
pub struct TripSettlementOptimizer;

fn plan_options(plan: SettlementPlan) -> SettlementOptions {
    match plan {
        SettlementPlan::Consolidated => SettlementOptions::default(),
        SettlementPlan::GreedyOnly => SettlementOptions::greedy(),
    }
}

/// Runs the engine on decimal balances.
///
/// Balances are rounded to atomic units of `context`, handed to the engine by
/// position, and the resulting payments are mapped back to participant ids.
pub fn compute_settlement(
    balances: &[Balance],
    options: SettlementOptions,
    context: SettlementContext,
) -> Result<Vec<Transfer>, SettlementOptimizationError> {
    let people = balances
        .iter()
        .enumerate()
        .map(|(idx, balance)| {
            context
                .to_atomic_units_i64(balance.net)
                .map(|units| PersonBalance {
                    id: idx,
                    balance: units,
                })
                .map_err(|source| SettlementOptimizationError::InvalidBalance {
                    participant: balance.participant.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let payments = construct_settlement(people, options);

    let transfers = payments
        .iter()
        .map(|payment| {
            let amount = context
                .from_atomic_units(payment.amount)
                .map_err(SettlementOptimizationError::InvalidTransfer)?;
            Ok(Transfer {
                from: balances[payment.from].participant.clone(),
                to: balances[payment.to].participant.clone(),
                amount,
            })
        })
        .collect::<Result<Vec<_>, SettlementOptimizationError>>()?;

    tracing::debug!(
        participant_count = balances.len(),
        transfer_count = transfers.len(),
        consolidate = options.consolidate,
        "Settlement engine finished"
    );

    Ok(transfers)
}

impl SettlementOptimizer for TripSettlementOptimizer {
    fn optimize(
        &self,
        balances: &[Balance],
        plan: SettlementPlan,
        context: SettlementContext,
    ) -> Result<Vec<Transfer>, SettlementOptimizationError> {
        compute_settlement(balances, plan_options(plan), context)
    }
}
