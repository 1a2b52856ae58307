//! Extraction capabilities, one per translatable-string convention.
//!
//! Each extractor takes a file's identity (path, content) and returns the
//! raw matches it understands, or reports that it does not apply to the file
//! type. Adding a convention means adding an enum variant here; the scanner
//! and reconciler are untouched.

use std::path::Path;

use anyhow::Result;
use enum_dispatch::enum_dispatch;

pub mod call;
pub mod template;

pub use call::CallExtractor;
pub use template::TemplateExtractor;

/// A single raw extraction hit inside one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub text: String,
    pub context: Option<String>,
    /// 1-based line of the invocation.
    pub line: usize,
}

/// Result of running one extractor over one file.
#[derive(Debug, Default)]
pub struct Extraction {
    pub matches: Vec<RawMatch>,
    /// Matches that looked like the convention but could not be statically
    /// extracted (dynamic keys, interpolated templates). Skipped per-match,
    /// never failing the file.
    pub skipped_matches: usize,
}

#[enum_dispatch]
pub trait Extract {
    fn name(&self) -> &'static str;

    /// File classification: whether this extractor understands the file type.
    fn applies_to(&self, path: &Path) -> bool;

    fn extract(&self, file_path: &str, source: &str) -> Result<Extraction>;
}

#[enum_dispatch(Extract)]
#[derive(Debug, Clone)]
pub enum Extractor {
    CallExtractor,
    TemplateExtractor,
}

/// Lookup table from file classification to extraction capabilities.
#[derive(Debug, Clone)]
pub struct ExtractorRegistry {
    extractors: Vec<Extractor>,
}

impl ExtractorRegistry {
    /// The standard registry: function-call and tagged-template conventions,
    /// both recognizing the configured translation function names.
    pub fn standard(translation_functions: &[String]) -> Self {
        Self {
            extractors: vec![
                CallExtractor::new(translation_functions).into(),
                TemplateExtractor::new(translation_functions).into(),
            ],
        }
    }

    /// Extractors applicable to the given file, in registration order.
    pub fn applicable(&self, path: &Path) -> Vec<&Extractor> {
        self.extractors
            .iter()
            .filter(|e| e.applies_to(path))
            .collect()
    }

    /// Whether any extractor understands this file type.
    pub fn supports(&self, path: &Path) -> bool {
        self.extractors.iter().any(|e| e.applies_to(path))
    }
}
