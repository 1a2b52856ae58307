use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// File classification shared by the JS/TS extractors.
pub fn is_scannable_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js")
    )
}

/// Parse JS/TS/JSX/TSX source into an AST.
///
/// Each call creates its own SourceMap so files can be parsed in parallel.
pub fn parse_source(code: String, file_path: &str) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse source: {:?}", e))?;

        // The parser recovers from some syntax errors; treat those as
        // failures too so a broken file is skipped rather than half-read.
        let errors = parser.take_errors();
        if !errors.is_empty() {
            return Err(anyhow!("Failed to parse source: {:?}", errors));
        }

        Ok(ParsedSource { module, source_map })
    })
}
