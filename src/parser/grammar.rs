//! Selector parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::{Selection, Selector, Slice};
use crate::parser::lexer::{self, Token};

/// Parse the bracket contents of a list reference.
///
/// Accepted forms are `""`, `N`, `start:stop[:step]`, `sep`, `sep#N` and
/// `sep#start:stop[:step]`. Text that fits none of the index forms is read
/// as a bare separator selecting the whole sequence; this never fails.
pub fn parse_selector(text: &str) -> Selector {
    if text.is_empty() {
        return Selector::default();
    }

    if let Some((separator, index)) = text.rsplit_once('#') {
        return Selector {
            separator: unescape_separator(separator),
            selection: parse_selection(index).unwrap_or(Selection::All),
        };
    }

    if let Some(selection) = parse_selection(text) {
        return Selector {
            separator: "\n".to_string(),
            selection,
        };
    }

    Selector {
        separator: unescape_separator(text),
        selection: Selection::All,
    }
}

/// Expand the `\n` and `\t` escapes of a separator; empty means newline.
pub fn unescape_separator(separator: &str) -> String {
    if separator.is_empty() {
        return "\n".to_string();
    }
    separator.replace("\\n", "\n").replace("\\t", "\t")
}

/// Parse `N` or `start:stop[:step]`, returning `None` for anything else.
pub fn parse_selection(input: &str) -> Option<Selection> {
    let len = input.len();
    let tokens = lexer::lex(input).ok()?;

    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    selection_parser()
        .parse(token_stream)
        .into_result()
        .ok()
        .filter(|selection| !matches!(selection, Selection::Slice(Slice { step: Some(0), .. })))
}

fn selection_parser<'a, I>() -> impl Parser<'a, I, Selection, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let int = select! {
        Token::Int(n) => n,
    };

    let bound = int.clone().or_not();

    let slice = bound
        .clone()
        .then_ignore(just(Token::Colon))
        .then(bound.clone())
        .then(just(Token::Colon).ignore_then(bound).or_not())
        .map(|((start, stop), step)| {
            Selection::Slice(Slice {
                start,
                stop,
                step: step.flatten(),
            })
        });

    let index = int.map(Selection::Index);

    choice((slice, index)).then_ignore(end())
}
