use crate::config::{MarkPaid, Report};
use tripsplit_application::{MemberDirectory, SettlementService, SettlementServiceError};
use tripsplit_presentation::SettlementPresenter;

const EXPENSES_TITLE: &str = "== Shared expenses ==";
const POKER_TITLE: &str = "== Poker ==";

/// Applies `--mark-paid` requests in order and describes each outcome.
pub fn apply_marks(
    service: &SettlementService<'_>,
    marks: &[MarkPaid],
) -> Result<Vec<String>, SettlementServiceError> {
    marks
        .iter()
        .map(|mark| -> Result<String, SettlementServiceError> {
            let status = service.toggle_paid(mark.from.clone(), mark.to.clone(), mark.amount)?;
            let state = if status.paid { "paid" } else { "unpaid" };
            Ok(format!("Marked {} as {state}", status.key))
        })
        .collect()
}

pub fn render_report(
    service: &SettlementService<'_>,
    report: Report,
    member_directory: &dyn MemberDirectory,
) -> Result<String, SettlementServiceError> {
    let mut sections = Vec::with_capacity(2);

    if matches!(report, Report::Expenses | Report::All) {
        let view = SettlementPresenter::render_expenses(
            &service.expense_settlement()?,
            member_directory,
        );
        sections.push(format!("{EXPENSES_TITLE}\n{}", view.to_text()));
    }
    if matches!(report, Report::Poker | Report::All) {
        let view =
            SettlementPresenter::render_poker(&service.poker_settlement()?, member_directory);
        sections.push(format!("{POKER_TITLE}\n{}", view.to_text()));
    }

    Ok(sections.join("\n"))
}
