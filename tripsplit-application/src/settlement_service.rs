use crate::{
    error::SettlementServiceError,
    model::{ExpenseSettlementReport, PokerSettlementReport, SettlementPlan},
    ports::{SettlementOptimizer, SettlementStatusStore, TripRepository},
};
use tripsplit_domain::{
    Balance, ExpenseTotals, Money, ParticipantId, PokerSummary, SettlementContext,
    SettlementStatus, Transfer, TransferKey, annotate_transfers, unsettled_balances,
};

/// Settlement use cases of the trip dashboard.
///
/// Every call reads a fresh snapshot from the repository and recomputes the
/// transfers; nothing is cached between calls.
#[derive(Clone, Copy)]
pub struct SettlementService<'a> {
    repository: &'a dyn TripRepository,
    statuses: &'a dyn SettlementStatusStore,
    optimizer: &'a dyn SettlementOptimizer,
    context: SettlementContext,
}

impl<'a> SettlementService<'a> {
    pub fn new(
        repository: &'a dyn TripRepository,
        statuses: &'a dyn SettlementStatusStore,
        optimizer: &'a dyn SettlementOptimizer,
    ) -> Self {
        Self {
            repository,
            statuses,
            optimizer,
            context: SettlementContext::usd_default(),
        }
    }

    pub fn with_context(mut self, context: SettlementContext) -> Self {
        self.context = context;
        self
    }

    /// Who pays whom for shared expenses, consolidated, with paid flags.
    pub fn expense_settlement(&self) -> Result<ExpenseSettlementReport, SettlementServiceError> {
        let attendees = self.repository.attendees()?;
        let expenses = self.repository.expenses()?;
        let statuses = self.statuses.list()?;

        let totals = ExpenseTotals::calculate(&attendees, &expenses, self.context)?;
        let balances = totals.balances();
        let (transfers, unsettled) =
            self.settle(&balances, SettlementPlan::Consolidated, "expenses")?;

        Ok(ExpenseSettlementReport {
            totals,
            balances,
            transfers: annotate_transfers(transfers, &statuses),
            unsettled,
        })
    }

    /// Who pays whom after poker nights. Runs greedy matching only.
    pub fn poker_settlement(&self) -> Result<PokerSettlementReport, SettlementServiceError> {
        let games = self.repository.poker_games()?;
        let summary = PokerSummary::from_games(&games);
        let (transfers, unsettled) =
            self.settle(&summary.balances(), SettlementPlan::GreedyOnly, "poker")?;

        Ok(PokerSettlementReport {
            summary,
            transfers,
            unsettled,
        })
    }

    /// Flips the paid flag of the `from -> to` transfer.
    pub fn toggle_paid(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        recorded_amount: Option<Money>,
    ) -> Result<SettlementStatus, SettlementServiceError> {
        if from == to {
            return Err(SettlementServiceError::SelfTransfer(from));
        }
        if let Some(amount) = recorded_amount
            && !amount.is_positive()
        {
            return Err(SettlementServiceError::InvalidRecordedAmount(amount));
        }

        let status = self
            .statuses
            .toggle(TransferKey { from, to }, recorded_amount)?;
        tracing::info!(
            transfer = %status.key,
            paid = status.paid,
            recorded_amount = ?status.recorded_amount,
            "Settlement status toggled"
        );
        Ok(status)
    }

    fn settle(
        &self,
        balances: &[Balance],
        plan: SettlementPlan,
        source: &'static str,
    ) -> Result<(Vec<Transfer>, Vec<Balance>), SettlementServiceError> {
        let transfers = self
            .optimizer
            .optimize(balances, plan, self.context)
            .inspect_err(|err| {
                tracing::error!(source, error = %err, "Settlement computation rejected");
            })?;
        let unsettled = unsettled_balances(balances, &transfers);

        tracing::debug!(
            source,
            plan = ?plan,
            participant_count = balances.len(),
            transfer_count = transfers.len(),
            "Settlement computed"
        );
        if !unsettled.is_empty() {
            let residual: Money = unsettled.iter().map(|balance| balance.net).sum();
            tracing::warn!(
                source,
                unsettled_count = unsettled.len(),
                residual = %residual,
                "Balances do not sum to zero; part of them stays unsettled"
            );
        }

        Ok((transfers, unsettled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RepositoryError, SettlementOptimizationError};
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use std::sync::Mutex;
    use tripsplit_domain::{Attendee, Expense, GameStatus, PokerGame, PokerPlayer};

    struct FixedRepository {
        attendees: Vec<Attendee>,
        expenses: Vec<Expense>,
        games: Vec<PokerGame>,
    }

    impl TripRepository for FixedRepository {
        fn attendees(&self) -> Result<Vec<Attendee>, RepositoryError> {
            Ok(self.attendees.clone())
        }

        fn expenses(&self) -> Result<Vec<Expense>, RepositoryError> {
            Ok(self.expenses.clone())
        }

        fn poker_games(&self) -> Result<Vec<PokerGame>, RepositoryError> {
            Ok(self.games.clone())
        }
    }

    #[derive(Default)]
    struct RecordingStatusStore {
        statuses: Mutex<Vec<SettlementStatus>>,
    }

    impl SettlementStatusStore for RecordingStatusStore {
        fn list(&self) -> Result<Vec<SettlementStatus>, RepositoryError> {
            Ok(self.statuses.lock().expect("lock").clone())
        }

        fn toggle(
            &self,
            key: TransferKey,
            recorded_amount: Option<Money>,
        ) -> Result<SettlementStatus, RepositoryError> {
            let mut statuses = self.statuses.lock().expect("lock");
            let previous = statuses.iter().find(|status| status.key == key).cloned();
            let status = SettlementStatus::toggled(
                previous.as_ref(),
                key,
                recorded_amount,
                Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap(),
            );
            statuses.retain(|existing| existing.key != status.key);
            statuses.push(status.clone());
            Ok(status)
        }
    }

    /// Pays creditors from the first debtor until its debt runs out; records
    /// the plan it was asked for.
    #[derive(Default)]
    struct FirstDebtorOptimizer {
        plans: Mutex<Vec<SettlementPlan>>,
    }

    impl SettlementOptimizer for FirstDebtorOptimizer {
        fn optimize(
            &self,
            balances: &[Balance],
            plan: SettlementPlan,
            _context: SettlementContext,
        ) -> Result<Vec<Transfer>, SettlementOptimizationError> {
            self.plans.lock().expect("lock").push(plan);
            let Some(debtor) = balances.iter().find(|balance| balance.net.is_negative()) else {
                return Ok(Vec::new());
            };
            let mut remaining = -debtor.net;
            let mut transfers = Vec::new();
            for creditor in balances.iter().filter(|balance| balance.net.is_positive()) {
                let amount = creditor.net.min(remaining);
                if !amount.is_positive() {
                    break;
                }
                remaining -= amount;
                transfers.push(Transfer {
                    from: debtor.participant.clone(),
                    to: creditor.participant.clone(),
                    amount,
                });
            }
            Ok(transfers)
        }
    }

    fn attendee(id: &str) -> Attendee {
        Attendee {
            id: id.into(),
            name: id.to_uppercase(),
        }
    }

    #[fixture]
    fn repository() -> FixedRepository {
        FixedRepository {
            attendees: vec![attendee("a"), attendee("b")],
            expenses: vec![Expense::new(
                "e1",
                "Cabin",
                Money::new(10000, 2),
                "a".into(),
                Vec::new(),
            )],
            games: vec![PokerGame {
                id: "g1".into(),
                status: GameStatus::Finished,
                players: vec![
                    PokerPlayer {
                        attendee: "a".into(),
                        buy_in: Money::new(2000, 2),
                        cash_out: Money::ZERO,
                    },
                    PokerPlayer {
                        attendee: "b".into(),
                        buy_in: Money::new(2000, 2),
                        cash_out: Money::new(4000, 2),
                    },
                ],
            }],
        }
    }

    #[rstest]
    fn expense_settlement_consolidates_and_merges_paid_flags(repository: FixedRepository) {
        let statuses = RecordingStatusStore::default();
        let optimizer = FirstDebtorOptimizer::default();
        let service = SettlementService::new(&repository, &statuses, &optimizer);

        service
            .toggle_paid("b".into(), "a".into(), Some(Money::new(5000, 2)))
            .expect("toggle");
        let report = service.expense_settlement().expect("report");

        assert_eq!(
            optimizer.plans.lock().expect("lock").as_slice(),
            &[SettlementPlan::Consolidated]
        );
        assert_eq!(report.totals.total_spend(), Money::new(10000, 2));
        assert_eq!(report.transfers.len(), 1);
        assert!(report.transfers[0].paid);
        assert_eq!(report.transfers[0].transfer.amount, Money::new(5000, 2));
        assert!(report.unsettled.is_empty());
    }

    #[rstest]
    fn poker_settlement_runs_greedy_only(repository: FixedRepository) {
        let statuses = RecordingStatusStore::default();
        let optimizer = FirstDebtorOptimizer::default();
        let service = SettlementService::new(&repository, &statuses, &optimizer);

        let report = service.poker_settlement().expect("report");

        assert_eq!(
            optimizer.plans.lock().expect("lock").as_slice(),
            &[SettlementPlan::GreedyOnly]
        );
        assert_eq!(
            report.transfers,
            vec![Transfer {
                from: "a".into(),
                to: "b".into(),
                amount: Money::new(2000, 2),
            }]
        );
    }

    #[rstest]
    #[case::self_transfer("a", "a", None)]
    #[case::zero_amount("b", "a", Some(Money::ZERO))]
    #[case::negative_amount("b", "a", Some(Money::new(-100, 2)))]
    fn toggle_paid_rejects_invalid_requests(
        repository: FixedRepository,
        #[case] from: &str,
        #[case] to: &str,
        #[case] amount: Option<Money>,
    ) {
        let statuses = RecordingStatusStore::default();
        let optimizer = FirstDebtorOptimizer::default();
        let service = SettlementService::new(&repository, &statuses, &optimizer);

        let result = service.toggle_paid(from.into(), to.into(), amount);

        assert!(matches!(
            result,
            Err(SettlementServiceError::SelfTransfer(_)
                | SettlementServiceError::InvalidRecordedAmount(_))
        ));
        assert!(statuses.list().expect("list").is_empty());
    }

    #[rstest]
    fn unbalanced_balances_are_reported_not_rejected(mut repository: FixedRepository) {
        // Cash-outs exceed buy-ins by 10.00.
        repository.games[0].players[1].cash_out = Money::new(5000, 2);
        let statuses = RecordingStatusStore::default();
        let optimizer = FirstDebtorOptimizer::default();
        let service = SettlementService::new(&repository, &statuses, &optimizer);

        let report = service.poker_settlement().expect("report");

        assert_eq!(
            report.unsettled,
            vec![Balance::new("b", Money::new(1000, 2))]
        );
    }
}
