use crate::{
    labels,
    text_table::{Alignment, TextTableBuilder, combine_tables_vertically},
};
use std::borrow::Cow;
use tripsplit_application::{ExpenseSettlementReport, MemberDirectory, PokerSettlementReport};
use tripsplit_domain::{AnnotatedTransfer, Balance, Money, ParticipantId, Transfer};

pub struct SettlementPresenter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementView {
    pub headline: Option<String>,
    pub balance_table: String,
    /// `None` when nobody needs to pay anybody.
    pub transfer_table: Option<String>,
    pub warnings: Vec<String>,
}

impl SettlementView {
    pub fn to_text(&self) -> String {
        let transfers = self.transfer_table.as_deref().unwrap_or(labels::ALL_SETTLED);
        let mut sections: Vec<&str> = Vec::with_capacity(4);
        if let Some(headline) = &self.headline {
            sections.push(headline);
        }
        sections.push(&self.balance_table);
        sections.push(transfers);
        let warnings = self.warnings.join("\n");
        if !warnings.is_empty() {
            sections.push(&warnings);
        }
        combine_tables_vertically(&sections).unwrap_or_default()
    }
}

impl SettlementPresenter {
    pub fn render_expenses(
        report: &ExpenseSettlementReport,
        member_directory: &dyn MemberDirectory,
    ) -> SettlementView {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(labels::MEMBER),
                Cow::Borrowed(labels::PAID),
                Cow::Borrowed(labels::OWES),
                Cow::Borrowed(labels::BALANCE),
            ]);
        for (participant, totals) in report.totals.iter() {
            builder = builder.row([
                format_member_label(participant, member_directory),
                Cow::Owned(format_amount(totals.paid)),
                Cow::Owned(format_amount(totals.owes)),
                Cow::Owned(format_signed(totals.net())),
            ]);
        }

        let transfer_table = (!report.transfers.is_empty()).then(|| {
            let mut transfers: Vec<&AnnotatedTransfer> = report.transfers.iter().collect();
            transfers.sort_unstable_by(|lhs, rhs| transfer_order(&lhs.transfer, &rhs.transfer));
            Self::build_tracked_transfer_table(&transfers, member_directory)
        });

        SettlementView {
            headline: Some(format!(
                "{}: {}",
                labels::TOTAL_SPEND,
                format_amount(report.totals.total_spend())
            )),
            balance_table: builder.build(),
            transfer_table,
            warnings: unsettled_warnings(&report.unsettled, member_directory),
        }
    }

    pub fn render_poker(
        report: &PokerSettlementReport,
        member_directory: &dyn MemberDirectory,
    ) -> SettlementView {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(labels::PLAYER),
                Cow::Borrowed(labels::BUY_IN),
                Cow::Borrowed(labels::CASH_OUT),
                Cow::Borrowed(labels::NET),
            ]);
        for standing in report.summary.standings() {
            builder = builder.row([
                format_member_label(&standing.participant, member_directory),
                Cow::Owned(format_amount(standing.buy_in)),
                Cow::Owned(format_amount(standing.cash_out)),
                Cow::Owned(format_signed(standing.net())),
            ]);
        }

        let transfer_table = (!report.transfers.is_empty()).then(|| {
            let mut transfers = report.transfers.clone();
            sort_transfers(&mut transfers);
            Self::build_transfer_table(&transfers, member_directory)
        });

        SettlementView {
            headline: report
                .summary
                .is_empty()
                .then(|| labels::NO_POKER_GAMES.to_owned()),
            balance_table: builder.build(),
            transfer_table,
            warnings: unsettled_warnings(&report.unsettled, member_directory),
        }
    }

    pub fn build_balance_table(
        balances: &[Balance],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&[Cow::Borrowed(labels::MEMBER), Cow::Borrowed(labels::BALANCE)]);

        for balance in balances {
            builder = builder.row([
                format_member_label(&balance.participant, member_directory),
                Cow::Owned(format_signed(balance.net)),
            ]);
        }

        builder.build()
    }

    pub fn build_transfer_table(
        transfers: &[Transfer],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(labels::FROM),
                Cow::Borrowed(labels::TO),
                Cow::Borrowed(labels::AMOUNT),
            ]);

        for transfer in transfers {
            builder = builder.row([
                format_member_label(&transfer.from, member_directory),
                format_member_label(&transfer.to, member_directory),
                Cow::Owned(format_amount(transfer.amount)),
            ]);
        }

        builder.build()
    }

    pub fn build_tracked_transfer_table(
        transfers: &[&AnnotatedTransfer],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
                Alignment::Left,
            ])
            .headers(&[
                Cow::Borrowed(labels::FROM),
                Cow::Borrowed(labels::TO),
                Cow::Borrowed(labels::AMOUNT),
                Cow::Borrowed(labels::STATUS),
            ]);

        for annotated in transfers {
            let status = match (annotated.paid, annotated.recorded_amount) {
                (true, Some(amount)) => {
                    Cow::Owned(format!("{} ({})", labels::STATUS_PAID, format_amount(amount)))
                }
                (true, None) => Cow::Borrowed(labels::STATUS_PAID),
                (false, _) => Cow::Borrowed(labels::STATUS_PENDING),
            };
            builder = builder.row([
                format_member_label(&annotated.transfer.from, member_directory),
                format_member_label(&annotated.transfer.to, member_directory),
                Cow::Owned(format_amount(annotated.transfer.amount)),
                status,
            ]);
        }

        builder.build()
    }
}

fn unsettled_warnings(
    unsettled: &[Balance],
    member_directory: &dyn MemberDirectory,
) -> Vec<String> {
    if unsettled.is_empty() {
        return Vec::new();
    }
    std::iter::once(labels::UNSETTLED_WARNING.to_owned())
        .chain(unsettled.iter().map(|balance| {
            format!(
                "  {} {}",
                format_member_label(&balance.participant, member_directory),
                format_signed(balance.net)
            )
        }))
        .collect()
}

fn format_member_label<'a>(
    participant: &'a ParticipantId,
    member_directory: &'a dyn MemberDirectory,
) -> Cow<'a, str> {
    match member_directory.display_name(participant) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Borrowed(participant.as_str()),
    }
}

fn format_amount(amount: Money) -> String {
    format!("{:.2}", amount.as_decimal())
}

fn format_signed(amount: Money) -> String {
    let sign = if amount.is_negative() { "" } else { "+" };
    format!("{sign}{}", format_amount(amount))
}

fn transfer_order(lhs: &Transfer, rhs: &Transfer) -> std::cmp::Ordering {
    lhs.from
        .cmp(&rhs.from)
        .then_with(|| lhs.to.cmp(&rhs.to))
        .then_with(|| lhs.amount.cmp(&rhs.amount))
}

fn sort_transfers(transfers: &mut [Transfer]) {
    transfers.sort_unstable_by(transfer_order);
}
