use crate::model::Payment;
use indexmap::IndexMap;
use std::hash::Hash;

/// Debtor -> creditor edges with strictly positive amounts.
///
/// Edges keep insertion order; an edge that drops to zero is removed with
/// `shift_remove` so a later re-insert lands at the end, which keeps every
/// scan over the graph deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransferGraph<Id: Eq + Hash> {
    edges: IndexMap<(Id, Id), i64>,
}

impl<Id> TransferGraph<Id>
where
    Id: Copy + Eq + Hash,
{
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn add(&mut self, from: Id, to: Id, amount: i64) {
        if amount <= 0 || from == to {
            return;
        }
        *self.edges.entry((from, to)).or_insert(0) += amount;
    }

    pub(crate) fn subtract(&mut self, from: Id, to: Id, amount: i64) {
        let key = (from, to);
        let Some(current) = self.edges.get_mut(&key) else {
            debug_assert!(amount <= 0, "subtracting from a missing edge");
            return;
        };
        *current -= amount;
        if *current <= 0 {
            self.edges.shift_remove(&key);
        }
    }

    /// Moves `amount` of flow so that `primary` pays more of `creditor` and
    /// `secondary` takes over the same amount of `primary`'s debt to
    /// `recipient`. Every participant's total in/out flow is unchanged.
    pub(crate) fn reroute(
        &mut self,
        primary: Id,
        secondary: Id,
        creditor: Id,
        recipient: Id,
        amount: i64,
    ) {
        if amount <= 0 {
            return;
        }
        self.subtract(primary, recipient, amount);
        self.add(secondary, recipient, amount);
        self.add(primary, creditor, amount);
        self.subtract(secondary, creditor, amount);
    }

    pub(crate) fn payers_by_creditor(&self) -> IndexMap<Id, Vec<(Id, i64)>> {
        let mut index: IndexMap<Id, Vec<(Id, i64)>> = IndexMap::new();
        for (&(from, to), &amount) in &self.edges {
            index.entry(to).or_default().push((from, amount));
        }
        index
    }

    pub(crate) fn recipients_by_debtor(&self) -> IndexMap<Id, Vec<(Id, i64)>> {
        let mut index: IndexMap<Id, Vec<(Id, i64)>> = IndexMap::new();
        for (&(from, to), &amount) in &self.edges {
            index.entry(from).or_default().push((to, amount));
        }
        index
    }

    /// Live amount of `from -> to`, zero when the edge is absent.
    pub(crate) fn amount(&self, from: Id, to: Id) -> i64 {
        self.edges.get(&(from, to)).copied().unwrap_or(0)
    }

    /// Edges with amounts, in scan order.
    pub(crate) fn state(&self) -> Vec<((Id, Id), i64)> {
        self.edges
            .iter()
            .map(|(&pair, &amount)| (pair, amount))
            .collect()
    }

    pub(crate) fn into_payments(self) -> Vec<Payment<Id>> {
        self.edges
            .into_iter()
            .filter(|&(_, amount)| amount > 0)
            .map(|((from, to), amount)| Payment { from, to, amount })
            .collect()
    }
}
