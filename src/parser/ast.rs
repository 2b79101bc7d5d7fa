//! Syntax tree types for message format patterns

/// Byte range in the pattern text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A scanned piece of a pattern, before formatter names are resolved
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Text copied to the output verbatim
    Literal(String),
    /// A `{.accessor}` or `{.accessor|formatter}` marker
    Marker(Marker),
}

/// The body of a variable marker
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub accessor: Accessor,
    /// Formatter name as written, with its location in the pattern
    pub formatter: Option<Spanned<String>>,
}

/// Path into a message, e.g. `params.diagnostics[, #:2].message`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    raw: String,
    components: Vec<Component>,
}

impl Accessor {
    /// Split an accessor into its components.
    ///
    /// Components are separated by `.` outside of brackets, so a selector may
    /// use a dot as its separator. Empty components are discarded.
    pub fn parse(raw: &str) -> Self {
        let mut components = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;

        for (idx, ch) in raw.char_indices() {
            match ch {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '.' if depth == 0 => {
                    push_component(&mut components, &raw[start..idx]);
                    start = idx + 1;
                }
                _ => {}
            }
        }
        push_component(&mut components, &raw[start..]);

        Self {
            raw: raw.to_string(),
            components,
        }
    }

    /// The accessor text as written in the pattern
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

fn push_component(components: &mut Vec<Component>, text: &str) {
    if !text.is_empty() {
        components.push(Component::parse(text));
    }
}

/// One step of an accessor path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Mapping lookup by key
    Key(String),
    /// `key[selector]`: a sequence field with its raw selector text
    List { key: String, selector: String },
}

impl Component {
    fn parse(text: &str) -> Self {
        if let Some(inner) = text.strip_suffix(']') {
            if let Some(open) = inner.rfind('[') {
                return Component::List {
                    key: inner[..open].to_string(),
                    selector: inner[open + 1..].to_string(),
                };
            }
        }
        Component::Key(text.to_string())
    }
}

/// Parsed selector of a list reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Joins per-element output when more than one element is selected
    pub separator: String,
    pub selection: Selection,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            separator: "\n".to_string(),
            selection: Selection::All,
        }
    }
}

/// Which elements of a sequence a selector picks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    Index(i64),
    Slice(Slice),
}

/// `start:stop:step` with every bound optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slice {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl Slice {
    /// Positions selected from a sequence of `len` elements.
    ///
    /// Negative bounds count from the end and out-of-range bounds clamp, so
    /// this never fails. A zero step selects nothing.
    pub fn indices(&self, len: usize) -> Vec<usize> {
        let len = len as i64;
        let step = self.step.unwrap_or(1);

        let mut out = Vec::new();
        if step > 0 {
            let clamp = |bound: i64| {
                if bound < 0 {
                    (bound + len).max(0)
                } else {
                    bound.min(len)
                }
            };
            let start = self.start.map_or(0, clamp);
            let stop = self.stop.map_or(len, clamp);
            let mut idx = start;
            while idx < stop {
                out.push(idx as usize);
                match idx.checked_add(step) {
                    Some(next) => idx = next,
                    None => break,
                }
            }
        } else if step < 0 {
            // -1 stands for "before the first element" when walking backwards
            let clamp = |bound: i64| {
                if bound < 0 {
                    (bound + len).max(-1)
                } else {
                    bound.min(len - 1)
                }
            };
            let start = self.start.map_or(len - 1, clamp);
            let stop = self.stop.map_or(-1, clamp);
            let mut idx = start;
            while idx > stop {
                out.push(idx as usize);
                match idx.checked_add(step) {
                    Some(next) => idx = next,
                    None => break,
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slice(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Slice {
        Slice { start, stop, step }
    }

    #[test]
    fn test_accessor_drops_empty_components() {
        let accessor = Accessor::parse("params..message.");
        assert_eq!(
            accessor.components(),
            &[
                Component::Key("params".to_string()),
                Component::Key("message".to_string())
            ]
        );
        assert_eq!(accessor.as_str(), "params..message.");
    }

    #[test]
    fn test_accessor_list_component() {
        let accessor = Accessor::parse("params.items[, #1:].label");
        assert_eq!(
            accessor.components(),
            &[
                Component::Key("params".to_string()),
                Component::List {
                    key: "items".to_string(),
                    selector: ", #1:".to_string()
                },
                Component::Key("label".to_string()),
            ]
        );
    }

    #[test]
    fn test_accessor_dot_inside_selector() {
        let accessor = Accessor::parse("items[.].name");
        assert_eq!(
            accessor.components(),
            &[
                Component::List {
                    key: "items".to_string(),
                    selector: ".".to_string()
                },
                Component::Key("name".to_string()),
            ]
        );
    }

    #[test]
    fn test_accessor_empty_selector() {
        let accessor = Accessor::parse("items[]");
        assert_eq!(
            accessor.components(),
            &[Component::List {
                key: "items".to_string(),
                selector: String::new()
            }]
        );
    }

    #[test]
    fn test_slice_forward() {
        assert_eq!(slice(Some(1), None, None).indices(3), vec![1, 2]);
        assert_eq!(slice(None, Some(2), None).indices(3), vec![0, 1]);
        assert_eq!(slice(None, None, Some(2)).indices(5), vec![0, 2, 4]);
    }

    #[test]
    fn test_slice_clamps_out_of_range() {
        assert_eq!(slice(Some(1), Some(100), None).indices(3), vec![1, 2]);
        assert_eq!(slice(Some(-100), Some(1), None).indices(3), vec![0]);
        assert!(slice(Some(10), None, None).indices(3).is_empty());
    }

    #[test]
    fn test_slice_negative_bounds() {
        assert_eq!(slice(Some(-2), None, None).indices(4), vec![2, 3]);
        assert_eq!(slice(None, Some(-1), None).indices(4), vec![0, 1, 2]);
    }

    #[test]
    fn test_slice_reverse() {
        assert_eq!(slice(None, None, Some(-1)).indices(3), vec![2, 1, 0]);
        assert_eq!(slice(Some(1), None, Some(-1)).indices(3), vec![1, 0]);
        assert_eq!(slice(Some(100), Some(0), Some(-2)).indices(5), vec![4, 2]);
    }

    #[test]
    fn test_slice_empty_sequence() {
        assert!(slice(None, None, None).indices(0).is_empty());
        assert!(slice(None, None, Some(-1)).indices(0).is_empty());
    }

    #[test]
    fn test_slice_huge_step_stops() {
        assert_eq!(slice(Some(1), None, Some(i64::MAX)).indices(3), vec![1]);
        assert_eq!(slice(None, None, Some(i64::MIN)).indices(3), vec![2]);
    }
}
