use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::core::CancelToken;

use super::helpers::{key_to_dto, open_gateway};
use super::types::{
    CatalogSnapshotParams, CatalogSnapshotResult, ConfigDto, ConfigSummary, ConfigValues,
    DiagnosticDto, EntryResult, GetConfigParams, KeyDto, Pagination, ParseSourceFilesParams,
    ParseSourceFilesResult, RemoveTranslationParams, RemoveTranslationResult, UpsertSummary,
    UpsertTranslationsParams, UpsertTranslationsResult,
};

#[derive(Clone)]
pub struct LingotMcpServer {
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LingotMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Scan source files and reconcile the catalog
    #[tool(
        description = "Scan the project's source files for translation calls and reconcile the catalog: new keys are created, disappeared keys are marked unused, returning keys are revived. Translations are never touched."
    )]
    async fn parse_source_files(
        &self,
        params: Parameters<ParseSourceFilesParams>,
    ) -> Result<CallToolResult, McpError> {
        let gateway = open_gateway(&params.0.project_root_path)
            .map_err(|e| McpError::internal_error(format!("Failed to initialize: {}", e), None))?;

        let outcome = gateway
            .parse_source_files(&CancelToken::new(), false)
            .map_err(|e| McpError::internal_error(format!("Scan failed: {}", e), None))?;

        let result = ParseSourceFilesResult {
            created: outcome.stats.created,
            revived: outcome.stats.revived,
            marked_unused: outcome.stats.marked_unused,
            unchanged: outcome.stats.unchanged,
            total_keys: outcome.snapshot.keys.len(),
            files_scanned: outcome.files_scanned,
            skipped_matches: outcome.skipped_matches,
            diagnostics: outcome
                .diagnostics
                .into_iter()
                .map(|d| DiagnosticDto {
                    file: d.file,
                    message: d.message,
                })
                .collect(),
        };

        let json_str = serde_json::to_string_pretty(&result).map_err(|e| {
            McpError::internal_error(format!("JSON serialization failed: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(json_str)]))
    }

    /// Get the current catalog snapshot
    #[tool(
        description = "Get the catalog snapshot: keys with their per-language translations and staleness state. Returns paginated list."
    )]
    async fn catalog_snapshot(
        &self,
        params: Parameters<CatalogSnapshotParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.0.limit.map(|v| v as usize).unwrap_or(50).min(200);
        let offset = params.0.offset.map(|v| v as usize).unwrap_or(0);
        let unused_only = params.0.unused_only.unwrap_or(false);

        let gateway = open_gateway(&params.0.project_root_path)
            .map_err(|e| McpError::internal_error(format!("Failed to initialize: {}", e), None))?;

        let view = gateway.snapshot();

        let unused_count = view
            .keys
            .iter()
            .filter(|k| k.unused_since.is_some())
            .count();

        let all_keys: Vec<KeyDto> = view
            .keys
            .iter()
            .filter(|k| !unused_only || k.unused_since.is_some())
            .map(key_to_dto)
            .collect();

        let total_count = all_keys.len();
        let paginated: Vec<KeyDto> = all_keys.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + paginated.len() < total_count;

        let result = CatalogSnapshotResult {
            total_count,
            unused_count,
            keys: paginated,
            config: ConfigSummary {
                langs: view.config.langs,
            },
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        };

        let json_str = serde_json::to_string_pretty(&result).map_err(|e| {
            McpError::internal_error(format!("JSON serialization failed: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(json_str)]))
    }

    /// Create or update translations for catalog keys
    #[tool(
        description = "Create or update translations for catalog keys. Each entry names a key id, a configured language code, and the translated text."
    )]
    async fn upsert_translations(
        &self,
        params: Parameters<UpsertTranslationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let translations = &params.0.translations;

        if translations.is_empty() {
            return Err(McpError::invalid_params(
                "translations array cannot be empty",
                None,
            ));
        }

        let gateway = open_gateway(&params.0.project_root_path)
            .map_err(|e| McpError::internal_error(format!("Failed to initialize: {}", e), None))?;

        let langs = gateway.config().langs.clone();

        let mut results = Vec::new();
        let mut successful_entries = 0;
        let mut failed_entries = 0;

        for entry in translations {
            let outcome = if !langs.contains(&entry.lang) {
                Err(format!(
                    "Language '{}' is not configured (langs: {:?})",
                    entry.lang, langs
                ))
            } else {
                gateway
                    .store()
                    .upsert_translation(&entry.key_id, &entry.lang, &entry.text)
                    .map_err(|e| e.to_string())
            };

            match outcome {
                Ok(translation) => {
                    successful_entries += 1;
                    results.push(EntryResult {
                        key_id: entry.key_id.clone(),
                        lang: entry.lang.clone(),
                        success: true,
                        translation_id: Some(translation.id),
                        error: None,
                    });
                }
                Err(message) => {
                    failed_entries += 1;
                    results.push(EntryResult {
                        key_id: entry.key_id.clone(),
                        lang: entry.lang.clone(),
                        success: false,
                        translation_id: None,
                        error: Some(message),
                    });
                }
            }
        }

        let result = UpsertTranslationsResult {
            success: failed_entries == 0,
            results,
            summary: UpsertSummary {
                total_entries: translations.len(),
                successful_entries,
                failed_entries,
            },
        };

        let json_str = serde_json::to_string_pretty(&result).map_err(|e| {
            McpError::internal_error(format!("JSON serialization failed: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(json_str)]))
    }

    /// Soft-delete a translation
    #[tool(
        description = "Soft-delete the live translation for a key and language. The row is kept with a deleted flag; the key itself is untouched."
    )]
    async fn remove_translation(
        &self,
        params: Parameters<RemoveTranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let gateway = open_gateway(&params.0.project_root_path)
            .map_err(|e| McpError::internal_error(format!("Failed to initialize: {}", e), None))?;

        let removed = gateway
            .store()
            .soft_delete_translation(&params.0.key_id, &params.0.lang)
            .map_err(|e| McpError::internal_error(format!("Delete failed: {}", e), None))?;

        let result = RemoveTranslationResult { removed };

        let json_str = serde_json::to_string_pretty(&result).map_err(|e| {
            McpError::internal_error(format!("JSON serialization failed: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(json_str)]))
    }

    /// Get the current lingot configuration
    #[tool(description = "Get the current lingot configuration.")]
    async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = std::path::Path::new(&params.0.project_root_path);

        let result = crate::config::load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        let config_dto = ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        };

        let json_str = serde_json::to_string_pretty(&config_dto).map_err(|e| {
            McpError::internal_error(format!("JSON serialization failed: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(json_str)]))
    }
}

#[tool_handler]
impl ServerHandler for LingotMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Lingot MCP manages a translation catalog extracted from source code.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration (source roots, langs, catalog path)\n\
                 2. parse_source_files - Scan sources and reconcile the catalog\n\
                 3. catalog_snapshot - Get keys with translations and staleness state (paginated)\n\
                 4. upsert_translations - Create or update translations for keys\n\
                 5. remove_translation - Soft-delete one translation\n\n\
                 Recommended Workflow:\n\
                 1. Use parse_source_files after code changes so the catalog matches the sources\n\
                 2. Use catalog_snapshot to find keys missing translations for a language\n\
                 3. Use upsert_translations to fill them in\n\n\
                 Keys are never deleted by scans: a key that disappears from the code is only\n\
                 marked unused and revives automatically if the code brings it back."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = LingotMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
