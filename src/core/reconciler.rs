//! Reconciliation: diffs a scan's observations against the current catalog
//! snapshot and computes a minimal mutation batch.
//!
//! The batch is applied to the store as one unit; an unchanged rescan
//! produces an empty batch, so running twice with no source changes is a
//! structural no-op.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::core::catalog::{CatalogState, Key, KeyIdentity, SourceRef};
use crate::core::scanner::Observation;

/// The mutations computed by one reconciliation, applied atomically.
#[derive(Debug, Clone)]
pub struct MutationBatch {
    /// Catalog version the batch was computed against. A commit against a
    /// different version fails fast instead of overwriting.
    pub based_on_version: u64,

    /// New keys for observed `(text, context)` pairs with no existing entry.
    pub creates: Vec<Key>,

    /// Ids of unused keys observed again: their `unused_since` is cleared.
    pub reactivates: Vec<String>,

    /// Ids of observed keys that disappeared: `unused_since` is set to
    /// `scan_time`. Keys already unused are never listed here, so the
    /// first-seen-stale timestamp is preserved.
    pub mark_unused: Vec<String>,

    /// Source-location refreshes for observed keys whose locations moved.
    pub update_sources: Vec<(String, Vec<SourceRef>)>,

    pub scan_time: DateTime<Utc>,
}

impl MutationBatch {
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty()
            && self.reactivates.is_empty()
            && self.mark_unused.is_empty()
            && self.update_sources.is_empty()
    }
}

/// Counters describing what one reconciliation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub created: usize,
    pub revived: usize,
    pub marked_unused: usize,
    /// Existing keys whose lifecycle state was left untouched.
    pub unchanged: usize,
}

impl ReconcileStats {
    pub fn of(batch: &MutationBatch, snapshot: &CatalogState) -> Self {
        let touched = batch.reactivates.len() + batch.mark_unused.len();
        Self {
            created: batch.creates.len(),
            revived: batch.reactivates.len(),
            marked_unused: batch.mark_unused.len(),
            unchanged: snapshot.keys.len().saturating_sub(touched),
        }
    }
}

/// Collapse raw observations into observed keys.
///
/// Multiple occurrences of the same `(text, context)` pair, across any
/// number of files, become one entry carrying every distinct location.
/// The ordered map keeps batch contents deterministic.
pub fn dedupe_observations(
    observations: &[Observation],
) -> BTreeMap<KeyIdentity, Vec<SourceRef>> {
    let mut observed: BTreeMap<KeyIdentity, Vec<SourceRef>> = BTreeMap::new();

    for obs in observations {
        let identity = KeyIdentity {
            text: obs.text.clone(),
            context: obs.context.clone(),
        };
        observed.entry(identity).or_default().push(SourceRef {
            file: obs.file.clone(),
            line: obs.line,
        });
    }

    for sources in observed.values_mut() {
        sources.sort();
        sources.dedup();
    }

    observed
}

/// Compute the mutation batch for one scan.
///
/// - Observed pairs with no existing key are created live.
/// - Existing unused keys observed again are reactivated.
/// - Existing live keys no longer observed are stamped with `now`.
/// - Keys already unused and still unobserved are left unchanged.
pub fn reconcile(
    observations: &[Observation],
    snapshot: &CatalogState,
    now: DateTime<Utc>,
) -> MutationBatch {
    let observed = dedupe_observations(observations);

    let existing: HashMap<KeyIdentity, &Key> =
        snapshot.keys.iter().map(|k| (k.identity(), k)).collect();

    let mut batch = MutationBatch {
        based_on_version: snapshot.version,
        creates: Vec::new(),
        reactivates: Vec::new(),
        mark_unused: Vec::new(),
        update_sources: Vec::new(),
        scan_time: now,
    };

    for (identity, sources) in &observed {
        match existing.get(identity) {
            None => {
                batch.creates.push(Key::new(
                    identity.text.clone(),
                    identity.context.clone(),
                    now,
                    sources.clone(),
                ));
            }
            Some(key) => {
                if key.unused_since.is_some() {
                    batch.reactivates.push(key.id.clone());
                }
                if key.sources != *sources {
                    batch.update_sources.push((key.id.clone(), sources.clone()));
                }
            }
        }
    }

    for key in &snapshot.keys {
        if key.unused_since.is_none() && !observed.contains_key(&key.identity()) {
            batch.mark_unused.push(key.id.clone());
        }
    }

    batch
}
