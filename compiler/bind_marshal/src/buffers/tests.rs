use pretty_assertions::assert_eq;

use super::*;

// ── CodeBuffer ──────────────────────────────────────────────

#[test]
fn braces_indent_their_body() {
    let mut buf = CodeBuffer::new();
    buf.writeln("for(auto _element : xs)");
    buf.open_brace();
    buf.writeln("use(_element);");
    buf.close_brace();

    assert_eq!(
        buf.render(4),
        "for(auto _element : xs)\n{\n    use(_element);\n}\n"
    );
    assert_eq!(buf.len(), 4);
}

#[test]
fn append_reindents_under_current_level() {
    let mut inner = CodeBuffer::new();
    inner.writeln("a;");
    inner.open_brace();
    inner.writeln("b;");
    inner.close_brace();

    let mut outer = CodeBuffer::new();
    outer.open_brace();
    outer.append(inner);
    outer.close_brace();

    assert_eq!(outer.render(2), "{\n  a;\n  {\n    b;\n  }\n}\n");
}

#[test]
fn lines_strip_indentation() {
    let mut buf = CodeBuffer::new();
    buf.indent();
    buf.writeln("x;");
    buf.dedent();
    buf.writeln("y;");
    assert_eq!(buf.lines().collect::<Vec<_>>(), vec!["x;", "y;"]);
}

#[test]
fn empty_buffer_renders_nothing() {
    let buf = CodeBuffer::new();
    assert!(buf.is_empty());
    assert_eq!(buf.render(4), "");
}

// ── MarshalBuffers ──────────────────────────────────────────

#[test]
fn commit_keeps_prefix_and_order() {
    let mut target = MarshalBuffers::new();
    target.return_expr.push('*');
    target.cleanup.writeln("first();");

    let mut staged = MarshalBuffers::new();
    staged.setup.writeln("prepare();");
    staged.return_expr.push_str("value");
    staged.cleanup.writeln("second();");
    target.commit(staged);

    assert_eq!(target.return_expr, "*value");
    assert_eq!(target.setup.lines().collect::<Vec<_>>(), vec!["prepare();"]);
    assert_eq!(
        target.cleanup.lines().collect::<Vec<_>>(),
        vec!["first();", "second();"]
    );
    assert!(!target.is_empty());
    assert!(MarshalBuffers::new().is_empty());
}
