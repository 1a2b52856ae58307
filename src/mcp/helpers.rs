//! Shared plumbing for MCP tool implementations.

use std::path::PathBuf;

use anyhow::Result;

use super::types::{KeyDto, SourceRefDto, TranslationDto};
use crate::config::load_config;
use crate::core::{CatalogGateway, KeyView};

/// Open a gateway for the given project root, loading its configuration.
pub fn open_gateway(project_root: &str) -> Result<CatalogGateway> {
    let root = PathBuf::from(project_root);
    let config = load_config(&root)?.config;
    CatalogGateway::new(root, config)
}

pub fn key_to_dto(key: &KeyView) -> KeyDto {
    KeyDto {
        id: key.id.clone(),
        text: key.text.clone(),
        context: key.context.clone(),
        unused_since: key.unused_since.map(|ts| ts.to_rfc3339()),
        first_seen: key.first_seen.to_rfc3339(),
        sources: key
            .sources
            .iter()
            .map(|s| SourceRefDto {
                file: s.file.clone(),
                line: s.line,
            })
            .collect(),
        translations: key
            .translations
            .iter()
            .map(|t| TranslationDto {
                id: t.id.clone(),
                lang: t.lang.clone(),
                text: t.text.clone(),
                is_deleted: t.is_deleted,
            })
            .collect(),
    }
}
