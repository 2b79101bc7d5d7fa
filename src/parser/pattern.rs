//! Scanner splitting a pattern into literal text and variable markers

use tracing::debug;

use crate::parser::ast::{Accessor, Fragment, Marker, Spanned};

const MARKER_OPEN: &str = "{.";
const MARKER_CLOSE: char = '}';

/// Outcome of looking for a marker at a `{.` position
#[derive(Debug, Clone, PartialEq, Eq)]
enum MarkerScan {
    /// A marker whose body ends just before the byte offset `close`
    Found { close: usize },
    /// `{.}` carries no accessor; it stays literal text
    EmptyBody,
    /// No `}` follows; the remainder of the pattern stays literal text
    Unterminated,
}

fn scan_marker(pattern: &str, open: usize) -> MarkerScan {
    let body_start = open + MARKER_OPEN.len();
    match pattern[body_start..].find(MARKER_CLOSE) {
        Some(0) => MarkerScan::EmptyBody,
        Some(offset) => MarkerScan::Found {
            close: body_start + offset,
        },
        None => MarkerScan::Unterminated,
    }
}

/// Split a pattern into fragments, in rendering order.
///
/// Malformed markers are never an error: an empty body or a missing closing
/// brace leaves the text as a literal. Adjacent literal text is merged.
pub fn scan(pattern: &str) -> Vec<Spanned<Fragment>> {
    let mut fragments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = pattern[cursor..].find(MARKER_OPEN) {
        let open = cursor + offset;
        match scan_marker(pattern, open) {
            MarkerScan::Found { close } => {
                push_literal(&mut fragments, pattern, literal_start..open);
                let body_start = open + MARKER_OPEN.len();
                let marker = parse_marker(&pattern[body_start..close], body_start);
                fragments.push(Spanned::new(Fragment::Marker(marker), open..close + 1));
                cursor = close + 1;
                literal_start = cursor;
            }
            MarkerScan::EmptyBody => {
                debug!(offset = open, "empty marker kept as literal text");
                cursor = open + 1;
            }
            MarkerScan::Unterminated => {
                debug!(offset = open, "unterminated marker kept as literal text");
                break;
            }
        }
    }

    push_literal(&mut fragments, pattern, literal_start..pattern.len());
    fragments
}

fn push_literal(fragments: &mut Vec<Spanned<Fragment>>, pattern: &str, span: std::ops::Range<usize>) {
    if span.is_empty() {
        return;
    }
    fragments.push(Spanned::new(
        Fragment::Literal(pattern[span.clone()].to_string()),
        span,
    ));
}

/// Byte offset of the first `|` outside brackets, so selectors may use it
fn formatter_bar(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in body.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Split a marker body at its first top-level `|` into accessor and
/// formatter name, both trimmed of surrounding whitespace.
fn parse_marker(body: &str, offset: usize) -> Marker {
    match formatter_bar(body).map(|bar| (&body[..bar], &body[bar + 1..])) {
        Some((accessor, formatter)) => {
            let name_start = offset + accessor.len() + 1;
            let leading = formatter.len() - formatter.trim_start().len();
            let name = formatter.trim();
            let span = name_start + leading..name_start + leading + name.len();
            Marker {
                accessor: Accessor::parse(accessor.trim()),
                formatter: Some(Spanned::new(name.to_string(), span)),
            }
        }
        None => Marker {
            accessor: Accessor::parse(body.trim()),
            formatter: None,
        },
    }
}
