//! Template system for message format patterns
//!
//! This module compiles patterns into segments and resolves accessors against
//! messages. Formatter names are resolved once, at compile time, through the
//! [`FormatterRegistry`]; list selectors are parsed lazily at render time and
//! memoized by the [`Resolver`].
//!
//! # Example
//!
//! ```text
//! [{.params.type|MessageType}] {.params.message}
//! {.params.diagnostics[\n#:3].range|range}
//! {.result.items[, ].label}
//! ```

pub mod catalogue;
mod compiler;
mod registry;
mod resolver;

pub use catalogue::{EnumValue, Enumeration};
pub use compiler::{CompiledTemplate, Segment, TemplateCompiler, Variable};
pub use registry::{
    CustomFormatter, Formatter, FormatterRegistry, RegistryError, DEFAULT_JSON_INDENT,
};
pub use resolver::{Resolved, Resolver, SelectorCache};
