//! Formatter registry for resolving formatter names

use std::fmt;
use std::sync::Arc;

use fxhash::FxHashMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use thiserror::Error;

use crate::error::FormatError;

use super::catalogue::{self, Enumeration};

/// Indent used by the `json` formatter unless configured otherwise
pub const DEFAULT_JSON_INDENT: usize = 2;

const BUILTIN_NAMES: &[&str] = &["position", "range", "json", "json-compact"];

/// Errors that can occur while registering formatters
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The name is already taken by a built-in or an earlier registration
    #[error("duplicate formatter definition: {name}")]
    Duplicate { name: String },
}

type FormatFn = dyn Fn(&Value) -> Result<String, FormatError> + Send + Sync;

/// A formatter registered at runtime
#[derive(Clone)]
pub struct CustomFormatter {
    name: Arc<str>,
    func: Arc<FormatFn>,
}

impl fmt::Debug for CustomFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomFormatter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Converts a resolved value into display text
#[derive(Debug, Clone)]
pub enum Formatter {
    /// Used when a marker names no formatter
    Structure { indent: usize },
    /// `<line>:<character>`
    Position,
    /// `<start>-<end>`, both ends formatted as positions
    Range,
    Json { indent: usize },
    JsonCompact,
    /// Integer (or string) wire value to its symbolic name
    Enumeration(&'static Enumeration),
    Custom(CustomFormatter),
}

impl Formatter {
    pub fn name(&self) -> &str {
        match self {
            Formatter::Structure { .. } => "default",
            Formatter::Position => "position",
            Formatter::Range => "range",
            Formatter::Json { .. } => "json",
            Formatter::JsonCompact => "json-compact",
            Formatter::Enumeration(e) => e.name,
            Formatter::Custom(c) => &c.name,
        }
    }

    pub fn format(&self, value: &Value) -> Result<String, FormatError> {
        match self {
            Formatter::Structure { indent } | Formatter::Json { indent } => {
                format_json(value, Some(*indent))
            }
            Formatter::JsonCompact => format_json(value, None),
            Formatter::Position => format_position(value, "position"),
            Formatter::Range => format_range(value),
            Formatter::Enumeration(enumeration) => enumeration
                .name_of(value)
                .map(str::to_string)
                .ok_or_else(|| FormatError::UnknownEnumValue {
                    enumeration: enumeration.name,
                    value: value.to_string(),
                }),
            Formatter::Custom(custom) => (custom.func)(value),
        }
    }
}

impl PartialEq for Formatter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Formatter::Structure { indent: a }, Formatter::Structure { indent: b })
            | (Formatter::Json { indent: a }, Formatter::Json { indent: b }) => a == b,
            (Formatter::Position, Formatter::Position)
            | (Formatter::Range, Formatter::Range)
            | (Formatter::JsonCompact, Formatter::JsonCompact) => true,
            (Formatter::Enumeration(a), Formatter::Enumeration(b)) => a.name == b.name,
            (Formatter::Custom(a), Formatter::Custom(b)) => Arc::ptr_eq(&a.func, &b.func),
            _ => false,
        }
    }
}

/// Text form of a scalar: strings raw, everything else as JSON
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_json(value: &Value, indent: Option<usize>) -> Result<String, FormatError> {
    if let Value::String(s) = value {
        return Ok(s.clone());
    }
    let Some(indent) = indent else {
        return Ok(serde_json::to_string(value)?);
    };

    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| FormatError::Custom(e.to_string()))
}

fn format_position(value: &Value, formatter: &'static str) -> Result<String, FormatError> {
    let field = |name: &'static str| {
        value.get(name).map(scalar_text).ok_or(FormatError::MissingField {
            formatter,
            field: name,
        })
    };
    Ok(format!("{}:{}", field("line")?, field("character")?))
}

fn format_range(value: &Value) -> Result<String, FormatError> {
    let end = |name: &'static str| {
        value.get(name).ok_or(FormatError::MissingField {
            formatter: "range",
            field: name,
        })
    };
    Ok(format!(
        "{}-{}",
        format_position(end("start")?, "range")?,
        format_position(end("end")?, "range")?
    ))
}

/// Registry resolving formatter names.
///
/// Built once, then only read: resolution never mutates the registry, so a
/// shared reference can serve any number of compilations.
#[derive(Debug, Clone)]
pub struct FormatterRegistry {
    json_indent: usize,
    custom: FxHashMap<String, Formatter>,
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatterRegistry {
    /// Create a registry holding only the built-in formatters
    pub fn new() -> Self {
        Self {
            json_indent: DEFAULT_JSON_INDENT,
            custom: FxHashMap::default(),
        }
    }

    /// Set the indent used by `json` and by markers without a formatter
    pub fn with_json_indent(mut self, indent: usize) -> Self {
        self.json_indent = indent;
        self
    }

    pub fn json_indent(&self) -> usize {
        self.json_indent
    }

    /// Register a custom formatter under a case-insensitive name
    pub fn register<F>(&mut self, name: &str, func: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value) -> Result<String, FormatError> + Send + Sync + 'static,
    {
        let key = name.to_lowercase();
        if BUILTIN_NAMES.contains(&key.as_str()) || self.custom.contains_key(&key) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
            });
        }

        let formatter = Formatter::Custom(CustomFormatter {
            name: Arc::from(name),
            func: Arc::new(func),
        });
        self.custom.insert(key, formatter);
        Ok(())
    }

    /// Formatter applied to markers that name none
    pub fn default_formatter(&self) -> Formatter {
        Formatter::Structure {
            indent: self.json_indent,
        }
    }

    /// Resolve a formatter name.
    ///
    /// Built-in and custom names match case-insensitively; anything else must
    /// be the exact name of a protocol enumeration.
    pub fn resolve(&self, name: &str) -> Option<Formatter> {
        let key = name.to_lowercase();
        let formatter = match key.as_str() {
            "position" => Formatter::Position,
            "range" => Formatter::Range,
            "json" => Formatter::Json {
                indent: self.json_indent,
            },
            "json-compact" => Formatter::JsonCompact,
            _ => match self.custom.get(&key) {
                Some(custom) => custom.clone(),
                None => Formatter::Enumeration(catalogue::lookup(name)?),
            },
        };
        Some(formatter)
    }

    /// Names of all static formatters, built-ins first
    pub fn names(&self) -> Vec<&str> {
        let mut custom: Vec<&str> = self.custom.values().map(Formatter::name).collect();
        custom.sort_unstable();
        BUILTIN_NAMES.iter().copied().chain(custom).collect()
    }
}
