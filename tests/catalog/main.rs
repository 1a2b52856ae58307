use std::{fs, path::PathBuf};

use anyhow::{Context, Ok, Result};
use tempfile::TempDir;

use lingot::config::Config;
use lingot::core::{CancelToken, CatalogGateway, ParseOutcome};

mod lifecycle;
mod translations;

/// A temporary project tree with a gateway per call, so every cycle reloads
/// the catalog from disk like separate command invocations would.
pub struct TestProject {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().canonicalize()?;
        fs::create_dir_all(root.join("src"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let project = Self::new()?;
        project.write_file(path, content)?;
        Ok(project)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.root.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn remove_file(&self, path: &str) -> Result<()> {
        let file_path = self.root.join(path);
        fs::remove_file(&file_path)
            .with_context(|| format!("Failed to remove file: {}", file_path.display()))?;
        Ok(())
    }

    pub fn gateway(&self) -> Result<CatalogGateway> {
        let config = Config {
            source_roots: vec!["src".to_string()],
            langs: vec!["fr-FR".to_string(), "de-DE".to_string()],
            ..Default::default()
        };
        CatalogGateway::new(self.root.clone(), config)
    }

    /// One full ParseSourceFiles cycle through a fresh gateway.
    pub fn sync(&self) -> Result<ParseOutcome> {
        self.gateway()?
            .parse_source_files(&CancelToken::new(), false)
    }
}
