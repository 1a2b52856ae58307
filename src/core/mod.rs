//! Core scan-and-reconcile engine.
//!
//! Data flows one way: the scanner produces observations, the reconciler
//! diffs them against a store snapshot into a mutation batch, and the store
//! commits the batch atomically. The gateway sequences the three and is the
//! only entry point external surfaces call.

pub mod catalog;
pub mod extract;
pub mod gateway;
pub mod parsers;
pub mod reconciler;
pub mod scanner;
pub mod store;

pub use catalog::{
    CatalogState, CatalogView, ConfigView, Key, KeyIdentity, KeyView, SourceRef, Translation,
    TranslationView, build_view,
};
pub use gateway::{CatalogGateway, OperationInFlight, ParseOutcome};
pub use reconciler::{MutationBatch, ReconcileStats, reconcile};
pub use scanner::{
    CancelToken, Observation, ScanCancelled, ScanDiagnostic, ScanOutcome, scan_source_files,
};
pub use store::{CatalogStore, CommitConflict, PurgeOutcome};
