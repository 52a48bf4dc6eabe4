use indoc::indoc;

use super::{parse_document, parse_document_full};

#[test]
fn define_registers_a_macro() {
    let input = indoc! {r#"
    #define M x y
    body
    #enddef
    [foo][/foo]
    "#};
    let result = parse_document_full(input, "test.cfg").unwrap();

    let m = result.preprocessor.macros.get("M").expect("macro M registered");
    assert_eq!(m.name, "M");
    assert_eq!(m.params, vec!["x", "y"]);
    assert_eq!(m.body, "body\n");
    assert_eq!(m.cursor.line, 1);

    // the definition leaves no trace in the tree
    insta::assert_snapshot!(result.root.dump(), @r#"
    body "root"
      body "foo"
    "#);
}

#[test]
fn define_without_parameters() {
    let input = "#define EMPTY\nvalue\n#enddef\n";
    let result = parse_document_full(input, "test.cfg").unwrap();
    let m = result.preprocessor.macros.get("EMPTY").unwrap();
    assert!(m.params.is_empty());
    assert_eq!(m.body, "value\n");
}

#[test]
fn comment_lines_are_dropped_from_define_bodies() {
    let input = indoc! {r#"
    #define M
    first
    # a comment inside the body
    second
    #enddef
    "#};
    let result = parse_document_full(input, "test.cfg").unwrap();
    assert_eq!(result.preprocessor.macros.get("M").unwrap().body, "first\nsecond\n");
}

#[test]
fn missing_enddef_is_a_parse_error() {
    let err = parse_document("#define M x\nbody\n", "test.cfg").unwrap_err();
    assert!(err.expected.contains("#enddef"));
}

#[test]
fn define_requires_a_name() {
    assert!(parse_document("#definefoo\n", "test.cfg").is_err());
}

#[test]
fn first_definition_wins() {
    let input = indoc! {r#"
    #define M
    first
    #enddef
    #define M
    second
    #enddef
    "#};
    let result = parse_document_full(input, "test.cfg").unwrap();
    assert_eq!(result.preprocessor.macros.len(), 1);
    assert_eq!(result.preprocessor.macros.get("M").unwrap().body, "first\n");
}

#[test]
fn undef_removes_a_definition() {
    let input = indoc! {r#"
    #define M
    x
    #enddef
    #undef M
    "#};
    let result = parse_document_full(input, "test.cfg").unwrap();
    assert!(result.preprocessor.macros.is_empty());
}

#[test]
fn undef_of_unknown_name_is_ignored() {
    let result = parse_document_full("#undef NEVER_DEFINED\n", "test.cfg").unwrap();
    assert!(result.preprocessor.macros.is_empty());
}

#[test]
fn undef_without_whitespace_is_a_comment() {
    // `#undefX` does not match the undef directive and falls through to the
    // comment rule.
    let result = parse_document_full("#undefX\n", "test.cfg").unwrap();
    assert!(result.root.children.is_empty());
}

#[test]
fn conditional_blocks_are_discarded() {
    let input = indoc! {r#"
    #ifdef FOO
    [skipped]
    a=b
    [/skipped]
    #endif
    [kept][/kept]
    "#};
    let root = parse_document(input, "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      body "kept"
    "#);
}

#[test]
fn conditional_block_with_else() {
    let input = indoc! {r#"
    #ifver ENGINE_VERSION
    hidden=1
    #else
    also_hidden=1
    #endif
    "#};
    // Everything up to the first #else is discarded; the #else line itself
    // and what follows read as ordinary lines, so `also_hidden` survives.
    let root = parse_document(input, "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "also_hidden" = "1"
    "#);
}

#[test]
fn error_and_warning_directives_consume_the_line() {
    let input = indoc! {r#"
    #error something went wrong
    #warning be careful
    a=1
    "#};
    let root = parse_document(input, "test.cfg").unwrap();
    assert_eq!(root.children.len(), 1);
}

#[test]
fn nested_braces_in_macro_invocations_are_preserved() {
    let root = parse_document("{A {B C}}\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      macro "{A {B C}}"
    "#);
}

#[test]
fn macro_invocations_survive_in_values_and_children() {
    let input = indoc! {r#"
    [foo]
    {INCLUDE other}
    a={VALUE_OF a}
    [/foo]
    "#};
    let body = super::parse(input).unwrap();
    insta::assert_snapshot!(body.dump(), @r#"
    body "foo"
      macro "{INCLUDE other}"
      pair "a" = {VALUE_OF a}
    "#);
}

#[test]
fn cursor_tracks_the_given_filename() {
    let result = parse_document_full("a=1\n", "data/units.cfg").unwrap();
    assert_eq!(result.preprocessor.cursor().file, "data/units.cfg");
}
