//! Durable catalog storage with a single-writer commit discipline.
//!
//! All mutation paths funnel through one mutex-guarded state; every commit
//! validates wholesale, persists atomically (temp file + rename), and bumps
//! the catalog version used for optimistic conflict detection.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};

use crate::core::catalog::{CatalogState, Key, Translation};
use crate::core::reconciler::MutationBatch;

/// Optimistic-concurrency failure: the batch was computed against a snapshot
/// that is no longer current. The caller should re-scan and retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitConflict {
    pub expected: u64,
    pub actual: u64,
}

impl fmt::Display for CommitConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "catalog changed since snapshot (expected version {}, found {}); retry the operation",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for CommitConflict {}

/// Result of a purge pass.
#[derive(Debug, Default)]
pub struct PurgeOutcome {
    pub purged_keys: Vec<Key>,
    pub removed_translations: usize,
}

pub struct CatalogStore {
    path: PathBuf,
    state: Mutex<CatalogState>,
}

impl CatalogStore {
    /// Open the catalog file, or start from an empty catalog if it does not
    /// exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let state = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
            if content.trim().is_empty() {
                CatalogState::default()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse catalog: {}", path.display()))?
            }
        } else {
            CatalogState::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A consistent value snapshot of the whole catalog.
    pub fn snapshot(&self) -> CatalogState {
        self.lock().clone()
    }

    /// Apply one reconciliation batch as a single unit.
    ///
    /// Fails wholesale — conflict, invalid mutation, or persistence error
    /// all leave both memory and disk at the pre-commit state.
    pub fn apply(&self, batch: &MutationBatch) -> Result<CatalogState> {
        let mut state = self.lock();

        if batch.based_on_version != state.version {
            return Err(CommitConflict {
                expected: batch.based_on_version,
                actual: state.version,
            }
            .into());
        }

        let mut next = state.clone();
        apply_batch(&mut next, batch)?;
        next.version += 1;

        persist(&self.path, &next)?;
        *state = next.clone();
        Ok(next)
    }

    /// Create or update the live translation for `(key_id, lang)`.
    ///
    /// Owned by human translation workflows; never called by reconciliation.
    pub fn upsert_translation(&self, key_id: &str, lang: &str, text: &str) -> Result<Translation> {
        let mut state = self.lock();

        if state.key_by_id(key_id).is_none() {
            bail!("Unknown key id: {}", key_id);
        }

        let mut next = state.clone();
        let existing = next
            .translations
            .iter_mut()
            .find(|t| t.key_id == key_id && t.lang == lang && !t.is_deleted);

        let translation = match existing {
            Some(t) => {
                t.text = text.to_string();
                t.clone()
            }
            None => {
                let t = Translation::new(key_id.to_string(), lang.to_string(), text.to_string());
                next.translations.push(t.clone());
                t
            }
        };
        next.version += 1;

        persist(&self.path, &next)?;
        *state = next;
        Ok(translation)
    }

    /// Soft-delete the live translation for `(key_id, lang)`.
    ///
    /// Returns false if there was none.
    pub fn soft_delete_translation(&self, key_id: &str, lang: &str) -> Result<bool> {
        let mut state = self.lock();

        let mut next = state.clone();
        let Some(translation) = next
            .translations
            .iter_mut()
            .find(|t| t.key_id == key_id && t.lang == lang && !t.is_deleted)
        else {
            return Ok(false);
        };
        translation.is_deleted = true;
        next.version += 1;

        persist(&self.path, &next)?;
        *state = next;
        Ok(true)
    }

    /// Permanently delete keys unused since before `cutoff`, together with
    /// their translations. This is the explicit, human-triggered path; scans
    /// never remove anything.
    pub fn purge_keys(&self, cutoff: DateTime<Utc>) -> Result<PurgeOutcome> {
        let mut state = self.lock();

        let mut next = state.clone();
        let (purged, kept): (Vec<Key>, Vec<Key>) = next
            .keys
            .into_iter()
            .partition(|k| matches!(k.unused_since, Some(since) if since < cutoff));

        if purged.is_empty() {
            return Ok(PurgeOutcome::default());
        }

        next.keys = kept;
        let before = next.translations.len();
        next.translations
            .retain(|t| !purged.iter().any(|k| k.id == t.key_id));
        let removed_translations = before - next.translations.len();
        next.version += 1;

        persist(&self.path, &next)?;
        *state = next;
        Ok(PurgeOutcome {
            purged_keys: purged,
            removed_translations,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CatalogState> {
        self.state.lock().expect("catalog store mutex poisoned")
    }
}

/// Validate then apply a batch to a working copy.
///
/// Validation runs completely before any mutation, so an invalid batch
/// cannot leave the copy half-applied.
fn apply_batch(state: &mut CatalogState, batch: &MutationBatch) -> Result<()> {
    for key in &batch.creates {
        if state.key_by_identity(&key.identity()).is_some() {
            bail!(
                "Cannot create key: identity already exists (text: \"{}\", context: {:?})",
                key.text,
                key.context
            );
        }
        if state.key_by_id(&key.id).is_some() {
            bail!("Cannot create key: id already exists: {}", key.id);
        }
        let duplicates = batch
            .creates
            .iter()
            .filter(|other| other.identity() == key.identity())
            .count();
        if duplicates > 1 {
            bail!(
                "Duplicate identity among creates (text: \"{}\", context: {:?})",
                key.text,
                key.context
            );
        }
    }

    for id in &batch.reactivates {
        let Some(key) = state.key_by_id(id) else {
            bail!("Cannot reactivate unknown key id: {}", id);
        };
        if key.unused_since.is_none() {
            bail!("Cannot reactivate key that is not unused: {}", id);
        }
    }

    for id in &batch.mark_unused {
        let Some(key) = state.key_by_id(id) else {
            bail!("Cannot mark unknown key id as unused: {}", id);
        };
        if key.unused_since.is_some() {
            bail!("Key is already marked unused: {}", id);
        }
    }

    for (id, _) in &batch.update_sources {
        if state.key_by_id(id).is_none() {
            bail!("Cannot update sources of unknown key id: {}", id);
        }
    }

    state.keys.extend(batch.creates.iter().cloned());
    for key in &mut state.keys {
        if batch.reactivates.contains(&key.id) {
            key.unused_since = None;
        }
        if batch.mark_unused.contains(&key.id) {
            key.unused_since = Some(batch.scan_time);
        }
        if let Some((_, sources)) = batch.update_sources.iter().find(|(id, _)| *id == key.id) {
            key.sources = sources.clone();
        }
    }

    Ok(())
}

/// Write the catalog atomically: serialize, write a sibling temp file, then
/// rename over the target.
fn persist(path: &Path, state: &CatalogState) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut content = serde_json::to_string_pretty(state).context("Failed to serialize catalog")?;
    if !content.ends_with('\n') {
        content.push('\n');
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)
        .with_context(|| format!("Failed to write catalog: {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace catalog: {}", path.display()))?;
    Ok(())
}
