//! Text generation from compiled templates

use serde_json::Value;
use tracing::trace;

use crate::error::RenderError;
use crate::template::{CompiledTemplate, Resolver, Segment, SelectorCache, Variable};

/// Renders compiled templates against messages.
///
/// Holds the [`Resolver`], so selectors parsed for one message are reused
/// for the next. A renderer can be shared between threads.
#[derive(Debug, Default)]
pub struct Renderer {
    resolver: Resolver,
}

impl Renderer {
    /// Create a renderer with an empty selector cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer around an existing selector cache
    pub fn with_cache(selectors: SelectorCache) -> Self {
        Self {
            resolver: Resolver::with_cache(selectors),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Render `template` against `message`.
    ///
    /// Fails on the first variable that cannot be rendered; no partial output
    /// is returned.
    pub fn render(&self, template: &CompiledTemplate, message: &Value) -> Result<String, RenderError> {
        trace!(pattern = template.pattern(), "rendering message");

        let mut out = String::new();
        for segment in template.segments() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(variable) => out.push_str(&self.render_variable(variable, message)?),
            }
        }
        Ok(out)
    }

    fn render_variable(&self, variable: &Variable, message: &Value) -> Result<String, RenderError> {
        self.resolver
            .resolve(variable.accessor.components(), message, &variable.formatter)
            .and_then(|resolved| Ok(resolved.into_text(&variable.formatter)?))
            .map_err(|source| RenderError {
                accessor: variable.accessor.as_str().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::template::{FormatterRegistry, TemplateCompiler};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn compile(pattern: &str) -> CompiledTemplate {
        TemplateCompiler::new(&FormatterRegistry::new())
            .compile(pattern)
            .expect("Should compile")
    }

    #[test]
    fn test_render_concatenates_segments() {
        let template = compile("[{.params.type|MessageType}] {.params.message}");
        let message = json!({"params": {"type": 3, "message": "indexing"}});
        let out = Renderer::new().render(&template, &message).unwrap();
        assert_eq!(out, "[Info] indexing");
    }

    #[test]
    fn test_render_error_names_accessor() {
        let template = compile("ok {.params.missing} never");
        let message = json!({"params": {}});
        let err = Renderer::new().render(&template, &message).unwrap_err();
        assert_eq!(err.accessor, "params.missing");
        assert!(matches!(err.source, ResolveError::FieldNotFound { .. }));
    }

    #[test]
    fn test_render_format_error() {
        let template = compile("{.type|MessageType}");
        let err = Renderer::new()
            .render(&template, &json!({"type": 99}))
            .unwrap_err();
        assert!(matches!(err.source, ResolveError::Format(_)));
    }

    #[test]
    fn test_render_reuses_selector_cache() {
        let template = compile("{.items[, ]}");
        let renderer = Renderer::new();
        for items in [json!(["a"]), json!(["b", "c"])] {
            renderer.render(&template, &json!({ "items": items })).unwrap();
        }
        assert_eq!(renderer.resolver().selectors().len(), 1);
    }

    #[test]
    fn test_render_with_warm_cache() {
        let selectors = SelectorCache::new();
        selectors.get_or_parse(",#1:");
        let renderer = Renderer::with_cache(selectors);

        let template = compile("{.items[,#1:]} {.items[0]}");
        let out = renderer
            .render(&template, &json!({"items": ["a", "b", "c"]}))
            .unwrap();
        assert_eq!(out, "b,c a");
        assert_eq!(renderer.resolver().selectors().len(), 2);
    }
}
