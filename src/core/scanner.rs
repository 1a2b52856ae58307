//! Source Scanner: enumerates files under the configured roots, runs every
//! applicable extractor, and merges the results into a deterministic
//! observation list.
//!
//! Per-file extraction is independent, so files are read and parsed in
//! parallel; the merge is sequential. A file that cannot be read or parsed
//! is skipped with a recorded diagnostic and never aborts the scan.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::Result;
use colored::Colorize;
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::{Config, TEST_FILE_PATTERNS};
use crate::core::extract::{Extract, ExtractorRegistry};

/// One occurrence of a translatable string in the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub text: String,
    pub context: Option<String>,
    /// Path relative to the project root, `/`-separated.
    pub file: String,
    pub line: usize,
}

/// A recoverable problem encountered while scanning one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDiagnostic {
    pub file: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub observations: Vec<Observation>,
    pub diagnostics: Vec<ScanDiagnostic>,
    /// Files an extractor actually ran over (unsupported types not counted).
    pub files_scanned: usize,
    /// Convention-shaped invocations that could not be statically extracted.
    pub skipped_matches: usize,
}

/// Cooperative cancellation flag shared with a long-running scan.
///
/// Checked once per file; a cancelled scan returns [`ScanCancelled`] and
/// nothing downstream is committed.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Error returned when a scan observes its cancel token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanCancelled;

impl fmt::Display for ScanCancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scan cancelled before completion")
    }
}

impl std::error::Error for ScanCancelled {}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Enumerate candidate files under the configured source roots.
///
/// Returns a sorted list so scans are reproducible, plus diagnostics for
/// inaccessible paths.
pub fn enumerate_files(
    root: &Path,
    config: &Config,
    verbose: bool,
) -> (Vec<PathBuf>, Vec<ScanDiagnostic>) {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut diagnostics: Vec<ScanDiagnostic> = Vec::new();

    // Separate ignore entries into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in &config.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(root.join(p));
        }
    }

    if config.ignore_test_files {
        for p in TEST_FILE_PATTERNS {
            if let Ok(pattern) = Pattern::new(p) {
                glob_patterns.push(pattern);
            }
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if config.source_roots.is_empty() {
        vec![root.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in &config.source_roots {
            if is_glob_pattern(inc) {
                // Glob mode: expand the pattern to matching directories
                let full_pattern = root.join(inc);
                let pattern_str = full_pattern.to_string_lossy();
                match glob::glob(&pattern_str) {
                    Ok(entries) => {
                        for entry in entries.flatten() {
                            if entry.is_dir() {
                                paths.push(entry);
                            }
                        }
                    }
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid source root pattern '{}': {}",
                                "warning:".bold().yellow(),
                                inc,
                                e
                            );
                        }
                    }
                }
            } else {
                let path = root.join(inc);
                if path.exists() {
                    paths.push(path);
                } else if verbose {
                    eprintln!(
                        "{} Source root does not exist: {}",
                        "warning:".bold().yellow(),
                        path.display()
                    );
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let file = e
                        .path()
                        .map(|p| p.to_string_lossy().to_string())
                        .unwrap_or_default();
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    diagnostics.push(ScanDiagnostic {
                        file,
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();

    (files, diagnostics)
}

/// Display path relative to the project root, `/`-separated.
fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

enum FileScan {
    Extracted {
        observations: Vec<Observation>,
        skipped_matches: usize,
    },
    Unsupported,
    Failed(ScanDiagnostic),
    Cancelled,
}

/// Run a full scan: enumerate, extract in parallel, merge deterministically.
pub fn scan_source_files(
    root: &Path,
    config: &Config,
    registry: &ExtractorRegistry,
    cancel: &CancelToken,
    verbose: bool,
) -> Result<ScanOutcome> {
    let (files, mut diagnostics) = enumerate_files(root, config, verbose);

    let results: Vec<FileScan> = files
        .par_iter()
        .map(|path| {
            if cancel.is_cancelled() {
                return FileScan::Cancelled;
            }

            let extractors = registry.applicable(path);
            if extractors.is_empty() {
                return FileScan::Unsupported;
            }

            let display = relative_display(root, path);
            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    return FileScan::Failed(ScanDiagnostic {
                        file: display,
                        message: format!("Failed to read file: {}", e),
                    });
                }
            };

            let mut observations = Vec::new();
            let mut skipped_matches = 0;
            for extractor in extractors {
                match extractor.extract(&display, &content) {
                    Ok(extraction) => {
                        skipped_matches += extraction.skipped_matches;
                        observations.extend(extraction.matches.into_iter().map(|m| Observation {
                            text: m.text,
                            context: m.context,
                            file: display.clone(),
                            line: m.line,
                        }));
                    }
                    Err(e) => {
                        // Both extractors parse the same source; one parse
                        // failure means the file is unscannable.
                        return FileScan::Failed(ScanDiagnostic {
                            file: display,
                            message: e.to_string(),
                        });
                    }
                }
            }

            FileScan::Extracted {
                observations,
                skipped_matches,
            }
        })
        .collect();

    let mut outcome = ScanOutcome::default();

    for result in results {
        match result {
            FileScan::Extracted {
                observations,
                skipped_matches,
            } => {
                outcome.files_scanned += 1;
                outcome.skipped_matches += skipped_matches;
                outcome.observations.extend(observations);
            }
            FileScan::Unsupported => {}
            FileScan::Failed(diagnostic) => {
                if verbose {
                    eprintln!(
                        "{} {} - {}",
                        "warning:".bold().yellow(),
                        diagnostic.file,
                        diagnostic.message
                    );
                }
                diagnostics.push(diagnostic);
            }
            FileScan::Cancelled => return Err(ScanCancelled.into()),
        }
    }

    outcome.diagnostics = diagnostics;
    outcome.observations.sort_by(|a, b| {
        (&a.file, a.line, &a.text, &a.context).cmp(&(&b.file, b.line, &b.text, &b.context))
    });

    Ok(outcome)
}
