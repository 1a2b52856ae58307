use crate::core::{CatalogView, Key, ScanDiagnostic};

#[derive(Debug)]
pub enum CommandSummary {
    Sync(SyncSummary),
    Status(StatusSummary),
    Purge(PurgeSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct SyncSummary {
    pub created: usize,
    pub revived: usize,
    pub marked_unused: usize,
    pub unchanged: usize,
    pub total_keys: usize,
    pub files_scanned: usize,
    pub skipped_matches: usize,
    pub diagnostics: Vec<ScanDiagnostic>,
}

#[derive(Debug)]
pub struct StatusSummary {
    pub view: CatalogView,
    /// Languages actually rendered as columns.
    pub langs_shown: Vec<String>,
    pub unused_only: bool,
}

#[derive(Debug)]
pub struct PurgeSummary {
    pub candidates: Vec<Key>,
    pub removed_translations: usize,
    pub cutoff_days: u32,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a lingot command.
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Recoverable problems worth surfacing (skipped files etc.).
    pub warning_count: usize,
    /// If true, exit code 1 is returned when warning_count > 0.
    pub exit_on_warnings: bool,
}
