//! Accessor resolution - walks an accessor through a message

use std::sync::Arc;

use fxhash::FxHashMap;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::trace;

use crate::error::{FormatError, ResolveError};
use crate::parser::{parse_selector, Component, Selection, Selector};

use super::registry::Formatter;

/// Read-through memo of parsed selectors, keyed by raw selector text.
///
/// Entries are pure functions of their key, so concurrent callers racing on
/// the same miss simply agree on the value.
#[derive(Debug, Default)]
pub struct SelectorCache {
    entries: RwLock<FxHashMap<String, Arc<Selector>>>,
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the parsed selector for `text`, parsing it on first use
    pub fn get_or_parse(&self, text: &str) -> Arc<Selector> {
        if let Some(selector) = self.entries.read().get(text) {
            return Arc::clone(selector);
        }

        let parsed = Arc::new(parse_selector(text));
        trace!(selector = text, parsed = ?parsed, "selector cache miss");
        let mut entries = self.entries.write();
        Arc::clone(entries.entry(text.to_string()).or_insert(parsed))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Result of walking an accessor
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'m> {
    /// The value the accessor points at, still to be formatted
    Value(&'m Value),
    /// Per-element output of a list selection, already formatted and joined
    Joined(String),
}

impl Resolved<'_> {
    /// Apply `formatter` unless the text was already produced per element
    pub fn into_text(self, formatter: &Formatter) -> Result<String, FormatError> {
        match self {
            Resolved::Value(value) => formatter.format(value),
            Resolved::Joined(text) => Ok(text),
        }
    }
}

/// Walks accessors through messages, memoizing selector parses
#[derive(Debug, Default)]
pub struct Resolver {
    selectors: SelectorCache,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver around an existing selector cache
    pub fn with_cache(selectors: SelectorCache) -> Self {
        Self { selectors }
    }

    pub fn selectors(&self) -> &SelectorCache {
        &self.selectors
    }

    /// Resolve `components` against `message`.
    ///
    /// A list component with an index descends into that element and keeps
    /// going. A list component selecting several elements resolves the rest
    /// of the accessor against each element, formats each result with
    /// `formatter` and joins them with the selector's separator; nothing
    /// after that component is applied to the joined text.
    pub fn resolve<'m>(
        &self,
        components: &[Component],
        message: &'m Value,
        formatter: &Formatter,
    ) -> Result<Resolved<'m>, ResolveError> {
        let mut current = message;

        for (position, component) in components.iter().enumerate() {
            match component {
                Component::Key(key) => current = field(current, key)?,
                Component::List { key, selector } => {
                    let items = field(current, key)?
                        .as_array()
                        .ok_or_else(|| ResolveError::NotAList { field: key.clone() })?;
                    let selector = self.selectors.get_or_parse(selector);
                    let rest = &components[position + 1..];

                    let selected: Vec<&'m Value> = match selector.selection {
                        Selection::Index(index) => {
                            current = element(items, index)?;
                            continue;
                        }
                        Selection::All => items.iter().collect(),
                        Selection::Slice(slice) => slice
                            .indices(items.len())
                            .into_iter()
                            .filter_map(|idx| items.get(idx))
                            .collect(),
                    };

                    return self.join(selected, rest, formatter, &selector.separator);
                }
            }
        }

        Ok(Resolved::Value(current))
    }

    fn join<'m>(
        &self,
        items: Vec<&'m Value>,
        rest: &[Component],
        formatter: &Formatter,
        separator: &str,
    ) -> Result<Resolved<'m>, ResolveError> {
        let parts = items
            .into_iter()
            .map(|item| -> Result<String, ResolveError> {
                Ok(self.resolve(rest, item, formatter)?.into_text(formatter)?)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Resolved::Joined(parts.join(separator)))
    }
}

fn field<'m>(value: &'m Value, key: &str) -> Result<&'m Value, ResolveError> {
    value
        .as_object()
        .and_then(|map| map.get(key))
        .ok_or_else(|| ResolveError::FieldNotFound {
            field: key.to_string(),
        })
}

/// Single element by index; negative indices count from the end
fn element(items: &[Value], index: i64) -> Result<&Value, ResolveError> {
    let len = items.len();
    let position = if index < 0 {
        index.checked_add(len as i64)
    } else {
        Some(index)
    };

    position
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|p| items.get(p))
        .ok_or(ResolveError::IndexOutOfRange { index, len })
}
