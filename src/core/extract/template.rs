//! Tagged-template extraction: `` t`Text` ``.

use std::path::Path;

use anyhow::Result;
use swc_common::SourceMap;
use swc_ecma_ast::{Expr, TaggedTpl};
use swc_ecma_visit::{Visit, VisitWith};

use super::{Extract, Extraction, RawMatch};
use crate::core::parsers::js::{is_scannable_path, parse_source};

/// Extracts tagged templates of the form `` t`Text` ``.
///
/// The convention has no context slot, so matches carry no context.
/// Templates with interpolations are skipped per-match: the full string is
/// not statically known.
#[derive(Debug, Clone)]
pub struct TemplateExtractor {
    functions: Vec<String>,
}

impl TemplateExtractor {
    pub fn new(functions: &[String]) -> Self {
        Self {
            functions: functions.to_vec(),
        }
    }
}

impl Extract for TemplateExtractor {
    fn name(&self) -> &'static str {
        "template"
    }

    fn applies_to(&self, path: &Path) -> bool {
        is_scannable_path(path)
    }

    fn extract(&self, file_path: &str, source: &str) -> Result<Extraction> {
        let parsed = parse_source(source.to_string(), file_path)?;
        let mut visitor = TemplateVisitor {
            functions: &self.functions,
            source_map: &parsed.source_map,
            out: Extraction::default(),
        };
        parsed.module.visit_with(&mut visitor);
        Ok(visitor.out)
    }
}

struct TemplateVisitor<'a> {
    functions: &'a [String],
    source_map: &'a SourceMap,
    out: Extraction,
}

impl Visit for TemplateVisitor<'_> {
    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        node.visit_children_with(self);

        let Expr::Ident(ident) = node.tag.as_ref() else {
            return;
        };
        if !self.functions.iter().any(|f| f == ident.sym.as_ref()) {
            return;
        }

        if !node.tpl.exprs.is_empty() {
            self.out.skipped_matches += 1;
            return;
        }
        let Some(quasi) = node.tpl.quasis.first() else {
            return;
        };
        let text = quasi
            .cooked
            .as_ref()
            .map(|c| c.to_string_lossy().to_string())
            .unwrap_or_else(|| quasi.raw.as_ref().to_string());
        if text.is_empty() {
            self.out.skipped_matches += 1;
            return;
        }

        let line = self.source_map.lookup_char_pos(node.span.lo).line;
        self.out.matches.push(RawMatch {
            text,
            context: None,
            line,
        });
    }
}
