//! Catalog Gateway: the externally triggerable scan-and-reconcile operation
//! plus the read-only snapshot query.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::Result;
use chrono::Utc;

use crate::config::Config;
use crate::core::{
    catalog::{CatalogState, CatalogView, build_view},
    extract::ExtractorRegistry,
    reconciler::{ReconcileStats, reconcile},
    scanner::{CancelToken, ScanDiagnostic, scan_source_files},
    store::CatalogStore,
};

/// A second ParseSourceFiles was requested while one is still running.
/// Rejected rather than queued; the caller retries once the first finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationInFlight;

impl fmt::Display for OperationInFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a parse-source-files operation is already running")
    }
}

impl std::error::Error for OperationInFlight {}

/// Everything a ParseSourceFiles caller gets back: the refreshed snapshot
/// (returned even when no mutations were needed) plus scan/reconcile stats.
#[derive(Debug)]
pub struct ParseOutcome {
    pub snapshot: CatalogState,
    pub stats: ReconcileStats,
    pub diagnostics: Vec<ScanDiagnostic>,
    pub files_scanned: usize,
    pub skipped_matches: usize,
}

pub struct CatalogGateway {
    root: PathBuf,
    config: Config,
    store: Arc<CatalogStore>,
    registry: ExtractorRegistry,
    in_flight: AtomicBool,
}

impl CatalogGateway {
    pub fn new(root: PathBuf, config: Config) -> Result<Self> {
        let store = CatalogStore::open(&config.resolved_catalog_path(&root))?;
        let registry = ExtractorRegistry::standard(&config.translation_functions);
        Ok(Self {
            root,
            config,
            store: Arc::new(store),
            registry,
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The store, for translation editing and purge flows.
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Run one scan-and-reconcile cycle.
    ///
    /// At most one cycle runs at a time per gateway; the commit is the sole
    /// serialization point, so a cycle racing an out-of-band commit fails
    /// fast with a retryable conflict instead of overwriting it.
    pub fn parse_source_files(&self, cancel: &CancelToken, verbose: bool) -> Result<ParseOutcome> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let snapshot = self.store.snapshot();
        let scan = scan_source_files(&self.root, &self.config, &self.registry, cancel, verbose)?;

        let batch = reconcile(&scan.observations, &snapshot, Utc::now());
        let stats = ReconcileStats::of(&batch, &snapshot);

        let snapshot = if batch.is_empty() {
            snapshot
        } else {
            self.store.apply(&batch)?
        };

        Ok(ParseOutcome {
            snapshot,
            stats,
            diagnostics: scan.diagnostics,
            files_scanned: scan.files_scanned,
            skipped_matches: scan.skipped_matches,
        })
    }

    /// Read-only snapshot query, reflecting the most recent commit.
    pub fn snapshot(&self) -> CatalogView {
        build_view(&self.store.snapshot(), &self.config.langs)
    }
}

#[derive(Debug)]
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        if flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(OperationInFlight.into());
        }
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
