//! Symbolic enumerations of the Language Server Protocol
//!
//! Each entry maps the wire value of an enumerant to its symbolic name, so a
//! pattern can render `{.params.type|MessageType}` as `Warning` rather than
//! `2`. The table covers the enumerations of LSP 3.17 plus the 3.18 additions
//! already seen in the wild.

use serde_json::Value;

/// Wire value of an enumerant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumValue {
    Int(i64),
    Str(&'static str),
}

/// A protocol enumeration with its enumerants
#[derive(Debug, PartialEq, Eq)]
pub struct Enumeration {
    pub name: &'static str,
    pub members: &'static [(EnumValue, &'static str)],
}

impl Enumeration {
    /// Symbolic name of the enumerant whose wire value is `value`
    pub fn name_of(&self, value: &Value) -> Option<&'static str> {
        let wanted = match value {
            Value::Number(n) => EnumValue::Int(whole_number(n)?),
            Value::String(s) => {
                return self
                    .members
                    .iter()
                    .find(|(v, _)| matches!(v, EnumValue::Str(m) if *m == s.as_str()))
                    .map(|(_, name)| *name);
            }
            _ => return None,
        };
        self.members
            .iter()
            .find(|(v, _)| *v == wanted)
            .map(|(_, name)| *name)
    }
}

/// Integer value of `n`, accepting floats without a fractional part
fn whole_number(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Look up an enumeration by its exact protocol name
pub fn lookup(name: &str) -> Option<&'static Enumeration> {
    ENUMERATIONS.iter().find(|e| e.name == name)
}

/// Names of every enumeration in the catalogue
pub fn names() -> impl Iterator<Item = &'static str> {
    ENUMERATIONS.iter().map(|e| e.name)
}

use EnumValue::{Int, Str};

macro_rules! enumeration {
    ($name:literal { $($value:expr => $member:literal),+ $(,)? }) => {
        Enumeration {
            name: $name,
            members: &[$(($value, $member)),+],
        }
    };
}

static ENUMERATIONS: &[Enumeration] = &[
    enumeration!("ErrorCodes" {
        Int(-32700) => "ParseError",
        Int(-32600) => "InvalidRequest",
        Int(-32601) => "MethodNotFound",
        Int(-32602) => "InvalidParams",
        Int(-32603) => "InternalError",
        Int(-32002) => "ServerNotInitialized",
        Int(-32001) => "UnknownErrorCode",
    }),
    enumeration!("LSPErrorCodes" {
        Int(-32803) => "RequestFailed",
        Int(-32802) => "ServerCancelled",
        Int(-32801) => "ContentModified",
        Int(-32800) => "RequestCancelled",
    }),
    enumeration!("MessageType" {
        Int(1) => "Error",
        Int(2) => "Warning",
        Int(3) => "Info",
        Int(4) => "Log",
        Int(5) => "Debug",
    }),
    enumeration!("TextDocumentSyncKind" {
        Int(0) => "None",
        Int(1) => "Full",
        Int(2) => "Incremental",
    }),
    enumeration!("TextDocumentSaveReason" {
        Int(1) => "Manual",
        Int(2) => "AfterDelay",
        Int(3) => "FocusOut",
    }),
    enumeration!("DiagnosticSeverity" {
        Int(1) => "Error",
        Int(2) => "Warning",
        Int(3) => "Information",
        Int(4) => "Hint",
    }),
    enumeration!("DiagnosticTag" {
        Int(1) => "Unnecessary",
        Int(2) => "Deprecated",
    }),
    enumeration!("SymbolKind" {
        Int(1) => "File",
        Int(2) => "Module",
        Int(3) => "Namespace",
        Int(4) => "Package",
        Int(5) => "Class",
        Int(6) => "Method",
        Int(7) => "Property",
        Int(8) => "Field",
        Int(9) => "Constructor",
        Int(10) => "Enum",
        Int(11) => "Interface",
        Int(12) => "Function",
        Int(13) => "Variable",
        Int(14) => "Constant",
        Int(15) => "String",
        Int(16) => "Number",
        Int(17) => "Boolean",
        Int(18) => "Array",
        Int(19) => "Object",
        Int(20) => "Key",
        Int(21) => "Null",
        Int(22) => "EnumMember",
        Int(23) => "Struct",
        Int(24) => "Event",
        Int(25) => "Operator",
        Int(26) => "TypeParameter",
    }),
    enumeration!("SymbolTag" {
        Int(1) => "Deprecated",
    }),
    enumeration!("CompletionItemKind" {
        Int(1) => "Text",
        Int(2) => "Method",
        Int(3) => "Function",
        Int(4) => "Constructor",
        Int(5) => "Field",
        Int(6) => "Variable",
        Int(7) => "Class",
        Int(8) => "Interface",
        Int(9) => "Module",
        Int(10) => "Property",
        Int(11) => "Unit",
        Int(12) => "Value",
        Int(13) => "Enum",
        Int(14) => "Keyword",
        Int(15) => "Snippet",
        Int(16) => "Color",
        Int(17) => "File",
        Int(18) => "Reference",
        Int(19) => "Folder",
        Int(20) => "EnumMember",
        Int(21) => "Constant",
        Int(22) => "Struct",
        Int(23) => "Event",
        Int(24) => "Operator",
        Int(25) => "TypeParameter",
    }),
    enumeration!("CompletionItemTag" {
        Int(1) => "Deprecated",
    }),
    enumeration!("CompletionTriggerKind" {
        Int(1) => "Invoked",
        Int(2) => "TriggerCharacter",
        Int(3) => "TriggerForIncompleteCompletions",
    }),
    enumeration!("InsertTextFormat" {
        Int(1) => "PlainText",
        Int(2) => "Snippet",
    }),
    enumeration!("InsertTextMode" {
        Int(1) => "AsIs",
        Int(2) => "AdjustIndentation",
    }),
    enumeration!("SignatureHelpTriggerKind" {
        Int(1) => "Invoked",
        Int(2) => "TriggerCharacter",
        Int(3) => "ContentChange",
    }),
    enumeration!("DocumentHighlightKind" {
        Int(1) => "Text",
        Int(2) => "Read",
        Int(3) => "Write",
    }),
    enumeration!("CodeActionTriggerKind" {
        Int(1) => "Invoked",
        Int(2) => "Automatic",
    }),
    enumeration!("InlayHintKind" {
        Int(1) => "Type",
        Int(2) => "Parameter",
    }),
    enumeration!("InlineCompletionTriggerKind" {
        Int(0) => "Invoked",
        Int(1) => "Automatic",
    }),
    enumeration!("FileChangeType" {
        Int(1) => "Created",
        Int(2) => "Changed",
        Int(3) => "Deleted",
    }),
    enumeration!("WatchKind" {
        Int(1) => "Create",
        Int(2) => "Change",
        Int(4) => "Delete",
    }),
    enumeration!("NotebookCellKind" {
        Int(1) => "Markup",
        Int(2) => "Code",
    }),
    enumeration!("PrepareSupportDefaultBehavior" {
        Int(1) => "Identifier",
    }),
    enumeration!("MarkupKind" {
        Str("plaintext") => "PlainText",
        Str("markdown") => "Markdown",
    }),
    enumeration!("TraceValues" {
        Str("off") => "Off",
        Str("messages") => "Messages",
        Str("verbose") => "Verbose",
    }),
    enumeration!("PositionEncodingKind" {
        Str("utf-8") => "Utf8",
        Str("utf-16") => "Utf16",
        Str("utf-32") => "Utf32",
    }),
    enumeration!("FoldingRangeKind" {
        Str("comment") => "Comment",
        Str("imports") => "Imports",
        Str("region") => "Region",
    }),
    enumeration!("DocumentDiagnosticReportKind" {
        Str("full") => "Full",
        Str("unchanged") => "Unchanged",
    }),
    enumeration!("ResourceOperationKind" {
        Str("create") => "Create",
        Str("rename") => "Rename",
        Str("delete") => "Delete",
    }),
];
