//! Text renderer for compiled templates
//!
//! This module evaluates a CompiledTemplate against a message and
//! concatenates the rendered segments.

pub mod text;

pub use text::Renderer;
