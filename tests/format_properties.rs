//! Integration tests for compiling and rendering message patterns

use lsp_message_format::{
    compile, format, render, CompileError, Config, Renderer, ResolveError, TemplateCompiler,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn items() -> Value {
    json!({"items": ["a", "b", "c"]})
}

#[test]
fn test_pattern_without_markers_is_unchanged() {
    let patterns = [
        "",
        "plain text",
        "braces {without} a dot",
        "unterminated {.params.message",
        "empty {.} marker",
        "escapes \\n and \\t stay literal",
    ];
    let messages = [json!({}), json!(null), items()];

    for pattern in patterns {
        let template = compile(pattern).expect("Should compile");
        for message in &messages {
            assert_eq!(render(&template, message).unwrap(), pattern);
        }
    }
}

#[test]
fn test_simple_accessor() {
    let template = compile("{.params.message}").unwrap();
    let message = json!({"params": {"message": "hi"}});
    assert_eq!(render(&template, &message).unwrap(), "hi");
}

#[test]
fn test_whole_list_newline_separated() {
    let template = compile("{.items[]}").unwrap();
    assert_eq!(render(&template, &items()).unwrap(), "a\nb\nc");
}

#[test]
fn test_single_index() {
    let template = compile("{.items[0]}").unwrap();
    assert_eq!(render(&template, &items()).unwrap(), "a");
}

#[test]
fn test_custom_separator_with_slice() {
    let template = compile("{.items[,#1:]}").unwrap();
    assert_eq!(render(&template, &items()).unwrap(), "b,c");
}

#[test]
fn test_bare_separator() {
    let template = compile("{.items[ | ]}").unwrap();
    assert_eq!(render(&template, &json!({"items": [1, 2]})).unwrap(), "1 | 2");
}

#[test]
fn test_escaped_tab_separator() {
    let template = compile("{.items[\\t]}").unwrap();
    assert_eq!(render(&template, &items()).unwrap(), "a\tb\tc");
}

#[test]
fn test_message_type_enumeration() {
    let template = compile("{.type|MessageType}").unwrap();
    assert_eq!(render(&template, &json!({"type": 1})).unwrap(), "Error");
}

#[test]
fn test_json_and_compact_parse_back_equal() {
    let message = json!({"body": {"uri": "file:///a.rs", "version": 3, "tags": [1, 2]}});
    let pretty = format("{.body|json}", &message).unwrap();
    let compact = format("{.body|json-compact}", &message).unwrap();

    assert!(pretty.contains('\n'));
    assert!(pretty.contains("  \"uri\""));
    assert!(!compact.contains(char::is_whitespace));

    let a: Value = serde_json::from_str(&pretty).unwrap();
    let b: Value = serde_json::from_str(&compact).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, message["body"]);
}

#[test]
fn test_repeated_renders_are_identical() {
    let template =
        compile("{.method} {.params.items[; #::2].label} {.params|json-compact}").unwrap();
    let message = json!({
        "method": "textDocument/completion",
        "params": {"items": [{"label": "x"}, {"label": "y"}, {"label": "z"}]}
    });
    let renderer = Renderer::new();
    let first = renderer.render(&template, &message).unwrap();
    for _ in 0..5 {
        assert_eq!(renderer.render(&template, &message).unwrap(), first);
    }
    assert!(first.starts_with("textDocument/completion x; z "));
}

#[test]
fn test_index_out_of_range_fails() {
    let template = compile("{.items[10]}").unwrap();
    let err = render(&template, &items()).unwrap_err();
    assert_eq!(err.accessor, "items[10]");
    assert!(matches!(
        err.source,
        ResolveError::IndexOutOfRange { index: 10, len: 3 }
    ));
}

#[test]
fn test_slice_out_of_range_clamps() {
    let template = compile("{.items[1:100]}").unwrap();
    assert_eq!(render(&template, &items()).unwrap(), "b\nc");
}

#[test]
fn test_slice_step_past_end_of_integers() {
    let template = compile("{.items[1::9223372036854775807]}").unwrap();
    assert_eq!(render(&template, &items()).unwrap(), "b");
}

#[test]
fn test_unknown_formatter_fails_compile() {
    let err = compile("{.type|NotAnEnum}").unwrap_err();
    assert!(matches!(err, CompileError::UnknownFormatter { ref name, .. } if name == "NotAnEnum"));
}

#[test]
fn test_diagnostics_log_line() {
    let message = json!({
        "method": "textDocument/publishDiagnostics",
        "params": {
            "uri": "file:///src/main.rs",
            "diagnostics": [
                {
                    "range": {"start": {"line": 1, "character": 4}, "end": {"line": 1, "character": 9}},
                    "severity": 1,
                    "message": "mismatched types"
                },
                {
                    "range": {"start": {"line": 7, "character": 0}, "end": {"line": 7, "character": 3}},
                    "severity": 2,
                    "message": "unused variable"
                }
            ]
        }
    });
    let out = format(
        "{.params.uri}\n{.params.diagnostics[\\n].range|range}",
        &message,
    )
    .unwrap();
    assert_eq!(out, "file:///src/main.rs\n1:4-1:9\n7:0-7:3");

    let out = format("{.params.diagnostics[-1].severity|DiagnosticSeverity}", &message).unwrap();
    assert_eq!(out, "Warning");
}

#[test]
fn test_default_formatter_pretty_prints_structures() {
    let out = format("{.params}", &json!({"params": {"a": 1}})).unwrap();
    assert_eq!(out, "{\n  \"a\": 1\n}");
}

#[test]
fn test_config_indent_flows_into_templates() {
    let config = Config::default().with_json_indent(4);
    let registry = config.registry();
    let template = TemplateCompiler::new(&registry).compile("{.params}").unwrap();
    let out = Renderer::new()
        .render(&template, &json!({"params": {"a": 1}}))
        .unwrap();
    assert_eq!(out, "{\n    \"a\": 1\n}");
}

#[test]
fn test_renderer_shared_between_threads() {
    let template = compile("{.items[,]}").unwrap();
    let renderer = Renderer::new();

    std::thread::scope(|scope| {
        for n in 0..4 {
            let (template, renderer) = (&template, &renderer);
            scope.spawn(move || {
                let message = json!({"items": vec![n; 3]});
                let expected = format!("{n},{n},{n}");
                assert_eq!(renderer.render(template, &message).unwrap(), expected);
            });
        }
    });
    assert_eq!(renderer.resolver().selectors().len(), 1);
}
