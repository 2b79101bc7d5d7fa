//! Error types for compiling and rendering patterns

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in pattern text
pub type Span = std::ops::Range<usize>;

/// Errors raised while compiling a pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Neither a built-in formatter nor a known protocol enumeration
    #[error("unknown formatter '{name}'")]
    UnknownFormatter { name: String, span: Span },
}

impl CompileError {
    /// Format the error with pattern context using ariadne
    pub fn report(&self, pattern: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            CompileError::UnknownFormatter { name, span } => {
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message(self.to_string())
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(format!(
                                "'{}' is not a formatter or protocol enumeration",
                                name
                            ))
                            .with_color(Color::Red),
                    )
                    .with_help("built-in formatters are position, range, json and json-compact")
                    .finish()
                    .write((filename, Source::from(pattern)), &mut buf);

                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8(buf).unwrap_or_else(|_| self.to_string())
    }
}

/// Errors raised by a formatter on a resolved value
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("{formatter} formatter expects a '{field}' field")]
    MissingField {
        formatter: &'static str,
        field: &'static str,
    },

    #[error("{value} is not a member of {enumeration}")]
    UnknownEnumValue {
        enumeration: &'static str,
        value: String,
    },

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Errors raised while walking an accessor through a message
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("field not found: {field}")]
    FieldNotFound { field: String },

    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("field is not a list: {field}")]
    NotAList { field: String },

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// A failed render, naming the accessor that could not be rendered
#[derive(Error, Debug)]
#[error("failed to render '{accessor}': {source}")]
pub struct RenderError {
    pub accessor: String,
    #[source]
    pub source: ResolveError,
}
