use stache::{Delimiter, Engine, Error, ErrorKind};

#[test]
fn compile_empty() {
    Engine::new().compile("").unwrap();
}

#[test]
fn compile_raw() {
    Engine::new().compile("lorem ipsum dolor sit amet").unwrap();
}

#[test]
fn compile_comment() {
    Engine::new()
        .compile("lorem {{! ipsum dolor }} sit amet")
        .unwrap();
}

#[test]
fn compile_variables() {
    Engine::new()
        .compile("lorem {{ ipsum.dolor }} {{{ sit }}} {{& amet }}")
        .unwrap();
}

#[test]
fn compile_sections() {
    Engine::new()
        .compile("{{#lorem}}{{^ipsum}}{{dolor}}{{/ipsum}}{{/lorem}}")
        .unwrap();
}

#[test]
fn compile_partial() {
    Engine::new().compile("lorem {{> ipsum }}").unwrap();
}

#[test]
fn compile_set_delimiter() {
    Engine::new()
        .compile("{{=<% %>=}}<%#lorem%><%/lorem%>")
        .unwrap();
}

#[test]
fn compile_source() {
    let source = String::from("lorem {{ ipsum }}");
    let engine = Engine::new();
    let template = engine.compile(&source).unwrap();
    assert_eq!(template.source(), "lorem {{ ipsum }}");
}

#[test]
fn compile_err_unclosed_tag() {
    let err = Engine::new().compile("lorem {{ ipsum").unwrap_err();
    assert_err(
        &err,
        ErrorKind::UnclosedTag,
        "unclosed tag, expected `}}`",
        6..8,
        "
   |
 1 | lorem {{ ipsum
   |       ^^ unclosed tag, expected `}}`
",
    );
}

#[test]
fn compile_err_unclosed_tag_custom_delimiter() {
    let err = Engine::with_delimiter(Delimiter::new("<%", "%>"))
        .compile("lorem\nipsum <%# dolor")
        .unwrap_err();
    assert_err(
        &err,
        ErrorKind::UnclosedTag,
        "unclosed tag, expected `%>`",
        12..14,
        "
   |
 2 | ipsum <%# dolor
   |       ^^ unclosed tag, expected `%>`
",
    );
}

#[test]
fn compile_err_unclosed_tag_after_set_delimiter() {
    let err = Engine::new().compile("{{=[ ]=}} [lorem").unwrap_err();
    assert_err(
        &err,
        ErrorKind::UnclosedTag,
        "unclosed tag, expected `]`",
        10..11,
        "
   |
 1 | {{=[ ]=}} [lorem
   |           ^ unclosed tag, expected `]`
",
    );
}

#[test]
fn compile_err_unmatched_section_close() {
    let err = Engine::new().compile("lorem {{/ipsum}} dolor").unwrap_err();
    assert_err(
        &err,
        ErrorKind::UnmatchedSectionClose,
        "unexpected section close, no section is open",
        6..16,
        "
   |
 1 | lorem {{/ipsum}} dolor
   |       ^^^^^^^^^^ unexpected section close, no section is open
",
    );
}

#[test]
fn compile_err_mismatched_section_close() {
    let err = Engine::new()
        .compile("{{#lorem}}\n{{#ipsum}}\n{{/lorem}}\n")
        .unwrap_err();
    assert_err(
        &err,
        ErrorKind::MismatchedSectionClose,
        "unexpected section close, expected `ipsum` to be closed first",
        22..32,
        "
   |
 3 | {{/lorem}}
   | ^^^^^^^^^^ unexpected section close, expected `ipsum` to be closed first
",
    );
}

#[test]
fn compile_err_unclosed_section() {
    let err = Engine::new()
        .compile("lorem {{#ipsum}} dolor")
        .unwrap_err();
    assert_err(
        &err,
        ErrorKind::UnclosedSection,
        "unclosed section `ipsum`",
        6..16,
        "
   |
 1 | lorem {{#ipsum}} dolor
   |       ^^^^^^^^^^ unclosed section `ipsum`
",
    );
}

#[test]
fn compile_err_unclosed_inverted_section() {
    let err = Engine::new().compile("{{^ipsum}}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnclosedSection);
}

#[test]
fn compile_err_invalid_delimiter() {
    let err = Engine::new().compile("{{=<% %> x=}}").unwrap_err();
    assert_err(
        &err,
        ErrorKind::InvalidDelimiter,
        "invalid set delimiter tag, expected two markers separated by whitespace",
        0..13,
        "
   |
 1 | {{=<% %> x=}}
   | ^^^^^^^^^^^^^ invalid set delimiter tag, expected two markers separated by whitespace
",
    );
}

#[test]
fn compile_err_invalid_delimiter_single_marker() {
    let err = Engine::new().compile("{{=<%=}}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDelimiter);
}

#[test]
fn compile_err_unclosed_triple_after_set_delimiter() {
    let err = Engine::new().compile("{{=<% %>=}}<%{ lorem %>").unwrap_err();
    assert_err(
        &err,
        ErrorKind::UnclosedTag,
        "unclosed tag, expected `}%>`",
        11..13,
        "
   |
 1 | {{=<% %>=}}<%{ lorem %>
   |            ^^ unclosed tag, expected `}%>`
",
    );
}

#[test]
fn compile_err_unicode_width() {
    let err = Engine::new().compile("привіт {{ світ").unwrap_err();
    assert_eq!(
        format!("{err:#}"),
        "
   |
 1 | привіт {{ світ
   |        ^^ unclosed tag, expected `}}`
"
    );
}

#[track_caller]
fn assert_err(
    err: &Error,
    kind: ErrorKind,
    reason: &str,
    span: std::ops::Range<usize>,
    pretty: &str,
) {
    assert_eq!(err.kind(), kind);
    assert_eq!(
        err.to_string(),
        format!("{reason} between bytes {} and {}", span.start, span.end)
    );
    assert_eq!(format!("{err:#}"), pretty);
}
