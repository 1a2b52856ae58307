use std::path::PathBuf;

use anyhow::Result;

use crate::cli::args::CommonArgs;
use crate::config::{Config, load_config};
use crate::core::CatalogGateway;

/// Resolve the project root, load config, apply CLI overrides, and open the
/// gateway. Config priority: CLI args > .lingotrc.json > defaults.
pub fn open_gateway(common: &CommonArgs) -> Result<CatalogGateway> {
    let root = common
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let config_result = load_config(&root)?;
    if common.verbose && !config_result.from_file {
        eprintln!("Note: No .lingotrc.json found, using default configuration");
    }

    let mut config: Config = config_result.config;
    if let Some(ref catalog) = common.catalog {
        config.catalog_path = catalog.to_string_lossy().to_string();
    }

    CatalogGateway::new(root, config)
}
