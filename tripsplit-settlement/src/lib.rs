#![warn(clippy::uninlined_format_args)]

mod consolidation;
mod graph;
mod model;

use graph::TransferGraph;
use std::hash::Hash;

pub use model::{Payment, PersonBalance};

/// Knobs for [`construct_settlement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementOptions {
    /// Run the consolidation pass after greedy matching.
    pub consolidate: bool,
}

impl Default for SettlementOptions {
    fn default() -> Self {
        Self { consolidate: true }
    }
}

impl SettlementOptions {
    /// Greedy matching only, as used for poker nights.
    pub fn greedy() -> Self {
        Self { consolidate: false }
    }

    pub fn with_consolidation(mut self, consolidate: bool) -> Self {
        self.consolidate = consolidate;
        self
    }
}

/// Computes point-to-point payments that settle `people`.
///
/// Positive balances are creditors, negative balances are debtors and zero
/// balances are ignored. Balances that do not sum to zero are settled as far
/// as the smaller side allows; the rest stays unmatched.
///
/// Each `(from, to)` pair appears at most once and every amount is positive.
/// Payments come out in edge insertion order, which is deterministic for a
/// given input order.
pub fn construct_settlement<Id>(
    people: impl IntoIterator<Item = PersonBalance<Id>>,
    options: SettlementOptions,
) -> Vec<Payment<Id>>
where
    Id: Copy + Eq + Hash,
{
    let people: Vec<PersonBalance<Id>> = people.into_iter().collect();
    let mut graph = greedy_match(&people);
    if options.consolidate {
        consolidation::consolidate(&mut graph);
    }
    graph.into_payments()
}

/// Two-pointer matching of the largest debtor against the largest creditor.
/// Produces at most `debtors + creditors - 1` edges.
fn greedy_match<Id>(people: &[PersonBalance<Id>]) -> TransferGraph<Id>
where
    Id: Copy + Eq + Hash,
{
    let mut creditors: Vec<(Id, i64)> = people
        .iter()
        .filter(|person| person.balance > 0)
        .map(|person| (person.id, person.balance))
        .collect();
    let mut debtors: Vec<(Id, i64)> = people
        .iter()
        .filter(|person| person.balance < 0)
        .map(|person| (person.id, person.balance.saturating_neg()))
        .collect();

    // `sort_by` is stable: equal amounts keep input order.
    creditors.sort_by(|lhs, rhs| rhs.1.cmp(&lhs.1));
    debtors.sort_by(|lhs, rhs| rhs.1.cmp(&lhs.1));

    let mut graph = TransferGraph::with_capacity(creditors.len() + debtors.len());
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let pay = debtors[i].1.min(creditors[j].1);
        if pay > 0 {
            graph.add(debtors[i].0, creditors[j].0, pay);
            debtors[i].1 -= pay;
            creditors[j].1 -= pay;
        }
        if debtors[i].1 == 0 {
            i += 1;
        }
        if creditors[j].1 == 0 {
            j += 1;
        }
    }

    graph
}
