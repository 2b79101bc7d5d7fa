//! Template compilation - turns a pattern into resolved segments

use tracing::debug;

use crate::error::CompileError;
use crate::parser::{scan, Accessor, Fragment};

use super::registry::{Formatter, FormatterRegistry};

/// A variable ready to render: where to look and how to format
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub accessor: Accessor,
    pub formatter: Formatter,
}

/// One piece of a compiled template, in rendering order
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Variable(Variable),
}

/// A compiled pattern. Immutable, and reusable across any number of renders.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    pattern: String,
    segments: Vec<Segment>,
}

impl CompiledTemplate {
    /// The pattern this template was compiled from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The variables of this template, in rendering order
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable(variable) => Some(variable),
            Segment::Literal(_) => None,
        })
    }
}

/// Compiles patterns against a formatter registry
#[derive(Debug, Clone, Copy)]
pub struct TemplateCompiler<'r> {
    registry: &'r FormatterRegistry,
}

impl<'r> TemplateCompiler<'r> {
    pub fn new(registry: &'r FormatterRegistry) -> Self {
        Self { registry }
    }

    /// Compile a pattern, resolving every formatter name up front.
    ///
    /// The first unknown formatter aborts compilation. Malformed markers are
    /// kept as literal text rather than rejected.
    pub fn compile(&self, pattern: &str) -> Result<CompiledTemplate, CompileError> {
        let segments = scan(pattern)
            .into_iter()
            .map(|fragment| -> Result<Segment, CompileError> {
                match fragment.node {
                    Fragment::Literal(text) => Ok(Segment::Literal(text)),
                    Fragment::Marker(marker) => {
                        let formatter = match marker.formatter {
                            Some(name) => self.registry.resolve(&name.node).ok_or(
                                CompileError::UnknownFormatter {
                                    name: name.node,
                                    span: name.span,
                                },
                            )?,
                            None => self.registry.default_formatter(),
                        };
                        Ok(Segment::Variable(Variable {
                            accessor: marker.accessor,
                            formatter,
                        }))
                    }
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let template = CompiledTemplate {
            pattern: pattern.to_string(),
            segments,
        };
        debug!(
            pattern,
            variables = template.variables().count(),
            "compiled template"
        );
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Component;
    use pretty_assertions::assert_eq;

    fn compile(pattern: &str) -> Result<CompiledTemplate, CompileError> {
        TemplateCompiler::new(&FormatterRegistry::new()).compile(pattern)
    }

    #[test]
    fn test_compile_literal_only() {
        let template = compile("plain text").expect("Should compile");
        assert_eq!(
            template.segments(),
            &[Segment::Literal("plain text".to_string())]
        );
        assert_eq!(template.pattern(), "plain text");
    }

    #[test]
    fn test_compile_default_formatter() {
        let template = compile("{.params.message}").expect("Should compile");
        let variable = template.variables().next().expect("Should have a variable");
        assert_eq!(variable.formatter, Formatter::Structure { indent: 2 });
        assert_eq!(
            variable.accessor.components(),
            &[
                Component::Key("params".to_string()),
                Component::Key("message".to_string())
            ]
        );
    }

    #[test]
    fn test_compile_preserves_order() {
        let template = compile("[{.type|MessageType}] {.message}").expect("Should compile");
        let kinds: Vec<_> = template
            .segments()
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.clone(),
                Segment::Variable(v) => format!("<{}|{}>", v.accessor.as_str(), v.formatter.name()),
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["[", "<type|MessageType>", "] ", "<message|default>"]
        );
    }

    #[test]
    fn test_compile_unknown_formatter() {
        let err = compile("a {.x|position} b {.y|Nope}").unwrap_err();
        assert_eq!(
            err,
            CompileError::UnknownFormatter {
                name: "Nope".to_string(),
                span: 22..26,
            }
        );
    }

    #[test]
    fn test_compile_does_not_validate_fallback_text() {
        let template = compile("{.x|Nope").expect("Unterminated markers are literal");
        assert_eq!(template.variables().count(), 0);
    }
}
