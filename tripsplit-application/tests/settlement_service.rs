use rstest::{fixture, rstest};
use std::collections::HashMap;
use tripsplit_application::{
    MemberDirectory, RepositoryError, SettlementOptimizationError, SettlementOptimizer,
    SettlementPlan, SettlementService, SettlementServiceError, SettlementStatusStore,
    TripRepository,
};
use tripsplit_domain::{
    Attendee, Balance, Expense, Money, ParticipantId, PokerGame, SettlementContext,
    SettlementStatus, Transfer, TransferKey,
};

struct UnavailableRepository;

impl TripRepository for UnavailableRepository {
    fn attendees(&self) -> Result<Vec<Attendee>, RepositoryError> {
        Err(RepositoryError("trip store offline".to_owned()))
    }

    fn expenses(&self) -> Result<Vec<Expense>, RepositoryError> {
        Err(RepositoryError("trip store offline".to_owned()))
    }

    fn poker_games(&self) -> Result<Vec<PokerGame>, RepositoryError> {
        Err(RepositoryError("trip store offline".to_owned()))
    }
}

struct EmptyStatusStore;

impl SettlementStatusStore for EmptyStatusStore {
    fn list(&self) -> Result<Vec<SettlementStatus>, RepositoryError> {
        Ok(Vec::new())
    }

    fn toggle(
        &self,
        _key: TransferKey,
        _recorded_amount: Option<Money>,
    ) -> Result<SettlementStatus, RepositoryError> {
        Err(RepositoryError("read-only".to_owned()))
    }
}

struct RejectingOptimizer;

impl SettlementOptimizer for RejectingOptimizer {
    fn optimize(
        &self,
        balances: &[Balance],
        _plan: SettlementPlan,
        _context: SettlementContext,
    ) -> Result<Vec<Transfer>, SettlementOptimizationError> {
        match balances.first() {
            Some(balance) => Err(SettlementOptimizationError::InvalidBalance {
                participant: balance.participant.clone(),
                source: tripsplit_domain::AtomicUnitConversionError::OutOfRange,
            }),
            None => Ok(Vec::new()),
        }
    }
}

static REPOSITORY: UnavailableRepository = UnavailableRepository;
static STATUSES: EmptyStatusStore = EmptyStatusStore;
static OPTIMIZER: RejectingOptimizer = RejectingOptimizer;

#[fixture]
fn service() -> SettlementService<'static> {
    SettlementService::new(&REPOSITORY, &STATUSES, &OPTIMIZER)
}

#[rstest]
fn repository_failures_surface_as_service_errors(service: SettlementService<'static>) {
    let err = service.expense_settlement().expect_err("offline");

    assert!(matches!(err, SettlementServiceError::Repository(_)));
    assert_eq!(err.to_string(), "trip data unavailable: trip store offline");
    assert!(matches!(
        service.poker_settlement(),
        Err(SettlementServiceError::Repository(_))
    ));
}

#[rstest]
fn store_failures_surface_from_toggle(service: SettlementService<'static>) {
    assert!(matches!(
        service.toggle_paid("b".into(), "a".into(), None),
        Err(SettlementServiceError::Repository(RepositoryError(message))) if message == "read-only"
    ));
}

struct SingleGameRepository;

impl TripRepository for SingleGameRepository {
    fn attendees(&self) -> Result<Vec<Attendee>, RepositoryError> {
        Ok(Vec::new())
    }

    fn expenses(&self) -> Result<Vec<Expense>, RepositoryError> {
        Ok(Vec::new())
    }

    fn poker_games(&self) -> Result<Vec<PokerGame>, RepositoryError> {
        Ok(vec![PokerGame {
            id: "g1".into(),
            status: Default::default(),
            players: vec![tripsplit_domain::PokerPlayer {
                attendee: "whale".into(),
                buy_in: Money::ZERO,
                cash_out: Money::from_i64(10),
            }],
        }])
    }
}

#[test]
fn optimizer_rejections_are_passed_through() {
    let service = SettlementService::new(&SingleGameRepository, &STATUSES, &OPTIMIZER);

    let err = service.poker_settlement().expect_err("rejected");

    assert_eq!(
        err.to_string(),
        "balance of 'whale' cannot be converted to atomic units: amount does not fit in 64-bit atomic units"
    );
    assert!(service.expense_settlement().is_ok());
}

#[rstest]
#[case::known("a", Some("Ana"))]
#[case::unknown("z", None)]
fn member_directories_resolve_names(#[case] id: &str, #[case] expected: Option<&str>) {
    let roster = vec![Attendee {
        id: "a".into(),
        name: "Ana".to_owned(),
    }];
    let map: HashMap<ParticipantId, String> =
        HashMap::from([(ParticipantId::from("a"), "Ana".to_owned())]);
    let directories: [&dyn MemberDirectory; 2] = [&roster, &map];

    for directory in directories {
        assert_eq!(directory.display_name(&id.into()), expected);
    }
}
