//! LSP Message Format - render protocol messages through compact templates
//!
//! This library compiles format patterns and renders them against decoded
//! Language Server Protocol messages, for logging and recording traffic.
//!
//! A pattern is literal text with embedded variables. A variable is written
//! `{.accessor}` or `{.accessor|formatter}`:
//!
//! - accessor components are separated by `.`, e.g. `params.textDocument.uri`
//! - a list field is written `key[selector]`, where the selector is empty
//!   (every element, newline separated), an index `N`, a slice
//!   `start:stop[:step]`, a separator `sep`, or `sep#N` / `sep#start:stop`
//! - formatters are `position`, `range`, `json`, `json-compact` or the name of
//!   a protocol enumeration such as `MessageType`
//!
//! # Example
//!
//! ```rust
//! use lsp_message_format::format;
//! use serde_json::json;
//!
//! let message = json!({"params": {"type": 2, "message": "slow index"}});
//! let line = format("[{.params.type|MessageType}] {.params.message}", &message).unwrap();
//! assert_eq!(line, "[Warning] slow index");
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod renderer;
pub mod template;

pub use config::{Config, ConfigError};
pub use error::{CompileError, FormatError, RenderError, ResolveError};
pub use renderer::Renderer;
pub use template::{CompiledTemplate, Formatter, FormatterRegistry, TemplateCompiler};

use serde_json::Value;
use thiserror::Error;

/// A decoded protocol message
pub type Message = Value;

/// Errors that can occur during the format pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Error while compiling the pattern
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    /// Error while rendering a message
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Compile a pattern with the built-in formatters
///
/// # Example
///
/// ```rust
/// use lsp_message_format::compile;
///
/// assert!(compile("{.params.position|position}").is_ok());
/// assert!(compile("{.params|Bogus}").is_err());
/// ```
pub fn compile(pattern: &str) -> Result<CompiledTemplate, CompileError> {
    TemplateCompiler::new(&FormatterRegistry::new()).compile(pattern)
}

/// Render a compiled template against a message
///
/// Uses a fresh [`Renderer`]; keep a renderer around instead when rendering
/// many messages, so parsed selectors are reused.
pub fn render(template: &CompiledTemplate, message: &Message) -> Result<String, RenderError> {
    Renderer::new().render(template, message)
}

/// Compile `pattern` and render it against `message` in one step
pub fn format(pattern: &str, message: &Message) -> Result<String, Error> {
    let template = compile(pattern)?;
    Ok(render(&template, message)?)
}
