//! Function-call extraction: `t("Text")` and `t("Text", { context: "c" })`.

use std::path::Path;

use anyhow::Result;
use swc_common::SourceMap;
use swc_ecma_ast::{CallExpr, Callee, Expr, Lit, Prop, PropName, PropOrSpread};
use swc_ecma_visit::{Visit, VisitWith};

use super::{Extract, Extraction, RawMatch};
use crate::core::parsers::js::{is_scannable_path, parse_source};

/// Extracts translation calls of the form `t("Text", { context: "c" })`.
///
/// The first argument must be a string literal; anything else (variables,
/// templates with interpolations, spreads) cannot be catalogued statically
/// and is skipped per-match. The optional second argument may carry an
/// explicit `context` string property.
#[derive(Debug, Clone)]
pub struct CallExtractor {
    functions: Vec<String>,
}

impl CallExtractor {
    pub fn new(functions: &[String]) -> Self {
        Self {
            functions: functions.to_vec(),
        }
    }
}

impl Extract for CallExtractor {
    fn name(&self) -> &'static str {
        "call"
    }

    fn applies_to(&self, path: &Path) -> bool {
        is_scannable_path(path)
    }

    fn extract(&self, file_path: &str, source: &str) -> Result<Extraction> {
        let parsed = parse_source(source.to_string(), file_path)?;
        let mut visitor = CallVisitor {
            functions: &self.functions,
            source_map: &parsed.source_map,
            out: Extraction::default(),
        };
        parsed.module.visit_with(&mut visitor);
        Ok(visitor.out)
    }
}

struct CallVisitor<'a> {
    functions: &'a [String],
    source_map: &'a SourceMap,
    out: Extraction,
}

impl CallVisitor<'_> {
    /// Read an explicit `context` string property from an options object
    /// literal, if present.
    fn context_from_options(expr: &Expr) -> Option<String> {
        let Expr::Object(obj) = expr else { return None };

        for prop in &obj.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let Prop::KeyValue(kv) = prop.as_ref() else {
                continue;
            };
            let name = match &kv.key {
                PropName::Ident(ident) => ident.sym.as_ref(),
                PropName::Str(s) => s.value.as_str().unwrap_or_default(),
                _ => continue,
            };
            if name == "context"
                && let Expr::Lit(Lit::Str(s)) = kv.value.as_ref()
            {
                return Some(s.value.to_string_lossy().to_string());
            }
        }
        None
    }
}

impl Visit for CallVisitor<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        // Nested calls like t("outer", { context: other("inner") }) still get
        // their inner calls visited first.
        node.visit_children_with(self);

        let Callee::Expr(callee) = &node.callee else {
            return;
        };
        let Expr::Ident(ident) = callee.as_ref() else {
            return;
        };
        if !self.functions.iter().any(|f| f == ident.sym.as_ref()) {
            return;
        }

        // A bare `t()` is not a translation call.
        let Some(first) = node.args.first() else {
            return;
        };
        if first.spread.is_some() {
            self.out.skipped_matches += 1;
            return;
        }

        match first.expr.as_ref() {
            Expr::Lit(Lit::Str(s)) => {
                let line = self.source_map.lookup_char_pos(node.span.lo).line;
                let context = node
                    .args
                    .get(1)
                    .and_then(|arg| Self::context_from_options(arg.expr.as_ref()));
                self.out.matches.push(RawMatch {
                    text: s.value.to_string_lossy().to_string(),
                    context,
                    line,
                });
            }
            // Dynamic keys cannot be catalogued statically.
            _ => self.out.skipped_matches += 1,
        }
    }
}
