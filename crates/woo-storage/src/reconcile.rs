// ── Child reconciliation ──
//
// Brings a parent's keyed children in line with a freshly fetched list:
// matching keys are overwritten, new keys are created, keys absent from
// the incoming list are deleted. An empty incoming list deletes every
// child.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

/// What a reconciliation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl ReconcileOutcome {
    /// Children remaining after the reconciliation.
    pub fn retained(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Reconcile `existing` against `incoming`.
///
/// For every incoming item the child under `key_of(item)` is looked up,
/// created with `C::default()` if absent, and then fully overwritten by
/// `update`. Children whose key does not occur in `incoming` are removed.
/// If `incoming` repeats a key, the last occurrence wins.
pub fn reconcile_children<K, C, D>(
    existing: &mut BTreeMap<K, C>,
    incoming: &[D],
    key_of: impl Fn(&D) -> K,
    mut update: impl FnMut(&mut C, &D),
) -> ReconcileOutcome
where
    K: Ord + Clone,
    C: Default,
{
    let mut outcome = ReconcileOutcome::default();
    let mut seen = BTreeSet::new();

    for item in incoming {
        let key = key_of(item);
        let first_visit = seen.insert(key.clone());
        if !existing.contains_key(&key) {
            outcome.inserted += 1;
        } else if first_visit {
            outcome.updated += 1;
        }
        update(existing.entry(key).or_default(), item);
    }

    let before = existing.len();
    existing.retain(|key, _| seen.contains(key));
    outcome.deleted = before - existing.len();

    if incoming.is_empty() && outcome.deleted > 0 {
        debug!(deleted = outcome.deleted, "empty incoming set cleared all children");
    }

    outcome
}
