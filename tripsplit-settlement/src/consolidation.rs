//! Consolidation pass: fewer distinct payers per creditor.
//!
//! For a creditor paid by several debtors, the largest contributor becomes the
//! primary payer. Each secondary payer's contribution is moved onto the
//! primary by letting the secondary take over part of the primary's other
//! obligations. The swap conserves every participant's total flow.
//!
//! A scan reads the payer and recipient indexes built when it starts and
//! applies every swap it finds to the live edges. Scans repeat until one
//! applies nothing. Swaps can undo each other across scans, so the pass also
//! stops once the edges come back to a state an earlier scan left behind.
//! The result is best-effort, not a global minimum.

use crate::graph::TransferGraph;
use fxhash::FxHashSet;
use std::hash::Hash;

/// Scans until nothing moves or the edges repeat an earlier state.
/// Returns the number of applied swaps.
pub(crate) fn consolidate<Id>(graph: &mut TransferGraph<Id>) -> usize
where
    Id: Copy + Eq + Hash,
{
    let mut seen = FxHashSet::default();
    seen.insert(graph.state());

    let mut applied = 0;
    loop {
        let moved = scan(graph);
        if moved == 0 {
            break;
        }
        applied += moved;
        if !seen.insert(graph.state()) {
            break;
        }
    }
    applied
}

fn scan<Id>(graph: &mut TransferGraph<Id>) -> usize
where
    Id: Copy + Eq + Hash,
{
    let payers_by_creditor = graph.payers_by_creditor();
    let recipients_by_debtor = graph.recipients_by_debtor();

    let mut moved = 0;
    for (&creditor, payers) in &payers_by_creditor {
        if payers.len() <= 1 {
            continue;
        }
        let Some((primary, _)) = primary_payer(payers) else {
            continue;
        };

        let mut primary_recipients: Vec<(Id, i64)> = recipients_by_debtor
            .get(&primary)
            .map(|recipients| {
                recipients
                    .iter()
                    .copied()
                    .filter(|&(to, _)| to != creditor)
                    .collect()
            })
            .unwrap_or_default();
        primary_recipients.sort_by(|lhs, rhs| rhs.1.cmp(&lhs.1));

        for &(secondary, contribution) in payers {
            if secondary == primary {
                continue;
            }

            let mut remaining = contribution;
            for &(recipient, owed) in &primary_recipients {
                if remaining <= 0 {
                    break;
                }
                // Earlier swaps in this scan may have drained either edge.
                let amount = remaining
                    .min(owed)
                    .min(graph.amount(primary, recipient))
                    .min(graph.amount(secondary, creditor));
                if amount <= 0 {
                    continue;
                }
                graph.reroute(primary, secondary, creditor, recipient, amount);
                remaining -= amount;
                moved += 1;
            }
        }
    }

    moved
}

/// Largest contributor; the earliest one wins a tie.
fn primary_payer<Id: Copy>(payers: &[(Id, i64)]) -> Option<(Id, i64)> {
    payers
        .iter()
        .copied()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
}
