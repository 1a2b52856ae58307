//! Catalog data model: Keys, Translations, and the durable catalog state.
//!
//! A `Key` is one translatable string slot, identified by its `(text, context)`
//! pair. A `Translation` is one language's rendering of a Key, owned by human
//! translation workflows; scans never touch it. `CatalogState` is the whole
//! catalog as persisted to disk, plus a commit counter used for conflict
//! detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity pair for a Key.
///
/// Two keys with the same `text` but different `context` are distinct
/// entities; text drift without a context change is a new Key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyIdentity {
    pub text: String,
    pub context: Option<String>,
}

/// One location in the source tree where a Key was observed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub file: String,
    pub line: usize,
}

/// A distinct translatable string slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    /// Stable identifier, assigned at creation, never reused or mutated.
    pub id: String,

    /// The source-language string as last observed in code.
    pub text: String,

    /// Disambiguating label supplied by the extractor (e.g. an explicit
    /// `{context: ...}` option). Part of the identity pair.
    #[serde(default)]
    pub context: Option<String>,

    /// Null while the key is observed; set to the scan timestamp the first
    /// time it disappears from the tree; cleared again on revival.
    #[serde(default)]
    pub unused_since: Option<DateTime<Utc>>,

    /// When the key was first observed. Set at creation, never changed.
    pub first_seen: DateTime<Utc>,

    /// Last-known source locations. Refreshed while the key is observed;
    /// kept as-is once it goes unused.
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

impl Key {
    pub fn new(
        text: String,
        context: Option<String>,
        now: DateTime<Utc>,
        sources: Vec<SourceRef>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            context,
            unused_since: None,
            first_seen: now,
            sources,
        }
    }

    pub fn identity(&self) -> KeyIdentity {
        KeyIdentity {
            text: self.text.clone(),
            context: self.context.clone(),
        }
    }

    pub fn is_unused(&self) -> bool {
        self.unused_since.is_some()
    }
}

/// One language's rendering of a Key.
///
/// Owned by exactly one Key; removed only when the owning Key is purged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub id: String,
    pub key_id: String,
    pub lang: String,
    pub text: String,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Translation {
    pub fn new(key_id: String, lang: String, text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            key_id,
            lang,
            text,
            is_deleted: false,
        }
    }
}

/// The full catalog as held in memory and persisted to the catalog file.
///
/// `version` increases by one on every committed mutation; mutation batches
/// carry the version they were computed against so that a racing commit
/// fails fast instead of silently overwriting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogState {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub keys: Vec<Key>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl CatalogState {
    pub fn key_by_id(&self, id: &str) -> Option<&Key> {
        self.keys.iter().find(|k| k.id == id)
    }

    pub fn key_by_identity(&self, identity: &KeyIdentity) -> Option<&Key> {
        self.keys
            .iter()
            .find(|k| k.text == identity.text && k.context == identity.context)
    }

    /// The single non-deleted translation for `(key_id, lang)`, if any.
    pub fn live_translation(&self, key_id: &str, lang: &str) -> Option<&Translation> {
        self.translations
            .iter()
            .find(|t| t.key_id == key_id && t.lang == lang && !t.is_deleted)
    }

    pub fn translations_for(&self, key_id: &str) -> Vec<&Translation> {
        self.translations
            .iter()
            .filter(|t| t.key_id == key_id)
            .collect()
    }
}

// ============================================================
// Snapshot view (external shape)
// ============================================================

/// A Key with its Translations nested, as returned to external callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyView {
    pub id: String,
    pub text: String,
    pub context: Option<String>,
    pub unused_since: Option<DateTime<Utc>>,
    pub first_seen: DateTime<Utc>,
    pub sources: Vec<SourceRef>,
    pub translations: Vec<TranslationView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationView {
    pub id: String,
    pub lang: String,
    pub text: String,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    pub langs: Vec<String>,
}

/// The full catalog snapshot returned by the gateway: keys with nested
/// translations, plus the recognized language list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub keys: Vec<KeyView>,
    pub config: ConfigView,
}

/// Build the external snapshot view from a catalog state.
///
/// Keys are ordered by `(context, text)` so repeated reads render stably.
pub fn build_view(state: &CatalogState, langs: &[String]) -> CatalogView {
    let mut keys: Vec<&Key> = state.keys.iter().collect();
    keys.sort_by(|a, b| a.identity().cmp(&b.identity()));

    let keys = keys
        .into_iter()
        .map(|key| {
            let mut translations: Vec<TranslationView> = state
                .translations_for(&key.id)
                .into_iter()
                .map(|t| TranslationView {
                    id: t.id.clone(),
                    lang: t.lang.clone(),
                    text: t.text.clone(),
                    is_deleted: t.is_deleted,
                })
                .collect();
            translations.sort_by(|a, b| a.lang.cmp(&b.lang).then_with(|| a.id.cmp(&b.id)));

            KeyView {
                id: key.id.clone(),
                text: key.text.clone(),
                context: key.context.clone(),
                unused_since: key.unused_since,
                first_seen: key.first_seen,
                sources: key.sources.clone(),
                translations,
            }
        })
        .collect();

    CatalogView {
        keys,
        config: ConfigView {
            langs: langs.to_vec(),
        },
    }
}
