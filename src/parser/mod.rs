//! Parser for message format patterns

pub mod ast;
mod grammar;
pub mod lexer;
mod pattern;

pub use ast::*;
pub use grammar::{parse_selection, parse_selector, unescape_separator};
pub use pattern::scan;
