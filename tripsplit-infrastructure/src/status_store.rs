use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tripsplit_application::{RepositoryError, SettlementStatusStore};
use tripsplit_domain::{Money, SettlementStatus, TransferKey};

/// Paid flags kept in process memory, shared between clones.
#[derive(Clone, Default)]
pub struct InMemorySettlementStatusStore {
    inner: Arc<DashMap<TransferKey, SettlementStatus>>,
}

impl InMemorySettlementStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, e.g. with statuses loaded from a snapshot.
    /// Later entries for the same pair replace earlier ones.
    pub fn with_statuses(statuses: impl IntoIterator<Item = SettlementStatus>) -> Self {
        let store = Self::new();
        for status in statuses {
            store.inner.insert(status.key.clone(), status);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Toggles `key` with an explicit timestamp.
    pub fn toggle_at(
        &self,
        key: TransferKey,
        recorded_amount: Option<Money>,
        now: DateTime<Utc>,
    ) -> SettlementStatus {
        let mut entry = self
            .inner
            .entry(key.clone())
            .or_insert_with(|| SettlementStatus {
                key: key.clone(),
                paid: false,
                recorded_amount: None,
                updated_at: now,
            });
        let toggled = SettlementStatus::toggled(Some(entry.value()), key, recorded_amount, now);
        *entry.value_mut() = toggled.clone();
        toggled
    }
}

impl SettlementStatusStore for InMemorySettlementStatusStore {
    /// Statuses ordered by `(from, to)`.
    fn list(&self) -> Result<Vec<SettlementStatus>, RepositoryError> {
        let mut statuses: Vec<SettlementStatus> = self
            .inner
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        statuses.sort_by(|lhs, rhs| {
            (&lhs.key.from, &lhs.key.to).cmp(&(&rhs.key.from, &rhs.key.to))
        });
        Ok(statuses)
    }

    fn toggle(
        &self,
        key: TransferKey,
        recorded_amount: Option<Money>,
    ) -> Result<SettlementStatus, RepositoryError> {
        Ok(self.toggle_at(key, recorded_amount, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use std::thread;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 2, 9, 30, 0).unwrap()
    }

    #[rstest]
    fn toggle_flips_and_keeps_recorded_amount(now: DateTime<Utc>) {
        let store = InMemorySettlementStatusStore::new();
        let key = TransferKey::new("b", "a");

        let first = store.toggle_at(key.clone(), Some(Money::new(4000, 2)), now);
        let second = store.toggle_at(key, None, now);

        assert!(first.paid);
        assert!(!second.paid);
        assert_eq!(second.recorded_amount, Some(Money::new(4000, 2)));
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    fn list_is_ordered_by_pair(now: DateTime<Utc>) {
        let store = InMemorySettlementStatusStore::new();
        for (from, to) in [("c", "a"), ("a", "b"), ("b", "a")] {
            store.toggle_at(TransferKey::new(from, to), None, now);
        }

        let keys: Vec<String> = store
            .list()
            .expect("list")
            .iter()
            .map(|status| status.key.to_string())
            .collect();

        assert_eq!(keys, vec!["a->b", "b->a", "c->a"]);
    }

    #[rstest]
    fn seeded_statuses_are_listed(now: DateTime<Utc>) {
        let store = InMemorySettlementStatusStore::with_statuses([SettlementStatus {
            key: TransferKey::new("b", "a"),
            paid: true,
            recorded_amount: None,
            updated_at: now,
        }]);

        let toggled = store.toggle_at(TransferKey::new("b", "a"), None, now);

        assert!(!toggled.paid);
    }

    #[test]
    fn clones_share_state_across_threads() {
        let store = InMemorySettlementStatusStore::new();
        let handles: Vec<_> = (0..4)
            .map(|idx| {
                let store = store.clone();
                thread::spawn(move || {
                    store
                        .toggle(TransferKey::new(format!("p{idx}"), "host"), None)
                        .expect("toggle")
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("join");
        }

        assert_eq!(store.len(), 4);
        assert!(store.list().expect("list").iter().all(|status| status.paid));
    }
}
