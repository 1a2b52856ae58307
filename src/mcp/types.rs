use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================
// Params
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path to the project root (directory containing .lingotrc.json)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParseSourceFilesParams {
    /// Absolute path to the project root (directory containing .lingotrc.json)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshotParams {
    /// Absolute path to the project root (directory containing .lingotrc.json)
    pub project_root_path: String,
    /// Max keys to return (default 50, max 200)
    pub limit: Option<u32>,
    /// Number of keys to skip (default 0)
    pub offset: Option<u32>,
    /// Only return keys currently marked unused
    pub unused_only: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    /// Id of the key being translated
    pub key_id: String,
    /// Language code (must be one of the configured langs)
    pub lang: String,
    /// Translated text
    pub text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertTranslationsParams {
    /// Absolute path to the project root (directory containing .lingotrc.json)
    pub project_root_path: String,
    /// Translations to create or update
    pub translations: Vec<TranslationEntry>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTranslationParams {
    /// Absolute path to the project root (directory containing .lingotrc.json)
    pub project_root_path: String,
    pub key_id: String,
    pub lang: String,
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub source_roots: Vec<String>,
    pub ignores: Vec<String>,
    pub langs: Vec<String>,
    pub translation_functions: Vec<String>,
    pub catalog_path: String,
    pub ignore_test_files: bool,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            source_roots: c.source_roots,
            ignores: c.ignores,
            langs: c.langs,
            translation_functions: c.translation_functions,
            catalog_path: c.catalog_path,
            ignore_test_files: c.ignore_test_files,
        }
    }
}

// ============================================================
// Snapshot Types (catalog_snapshot)
// ============================================================

/// Result of catalog_snapshot operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshotResult {
    pub total_count: usize,
    pub unused_count: usize,
    pub keys: Vec<KeyDto>,
    pub config: ConfigSummary,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub langs: Vec<String>,
}

/// A catalog key with its translations nested
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyDto {
    pub id: String,
    pub text: String,
    pub context: Option<String>,
    /// RFC 3339 timestamp, absent while the key is observed in the sources
    pub unused_since: Option<String>,
    /// RFC 3339 timestamp of first observation
    pub first_seen: String,
    pub sources: Vec<SourceRefDto>,
    pub translations: Vec<TranslationDto>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceRefDto {
    pub file: String,
    pub line: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationDto {
    pub id: String,
    pub lang: String,
    pub text: String,
    pub is_deleted: bool,
}

// ============================================================
// ParseSourceFiles Types (parse_source_files)
// ============================================================

/// Result of parse_source_files operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParseSourceFilesResult {
    pub created: usize,
    pub revived: usize,
    pub marked_unused: usize,
    pub unchanged: usize,
    pub total_keys: usize,
    pub files_scanned: usize,
    pub skipped_matches: usize,
    pub diagnostics: Vec<DiagnosticDto>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticDto {
    pub file: String,
    pub message: String,
}

// ============================================================
// UpsertTranslations Types (upsert_translations)
// ============================================================

/// Result of upsert_translations operation (batch)
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertTranslationsResult {
    /// True if every entry was processed successfully
    pub success: bool,
    /// Results for each entry, in request order
    pub results: Vec<EntryResult>,
    /// Summary statistics
    pub summary: UpsertSummary,
}

/// Result for a single translation entry
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResult {
    pub key_id: String,
    pub lang: String,
    /// Whether this entry was processed successfully
    pub success: bool,
    /// Id of the created/updated translation (only on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_id: Option<String>,
    /// Error message (only on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary statistics for the batch operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSummary {
    pub total_entries: usize,
    pub successful_entries: usize,
    pub failed_entries: usize,
}

// ============================================================
// RemoveTranslation Types (remove_translation)
// ============================================================

/// Result of remove_translation operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTranslationResult {
    /// True if a live translation existed and was soft-deleted
    pub removed: bool,
}

// ============================================================
// Common Types
// ============================================================

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
