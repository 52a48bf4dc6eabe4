use indoc::indoc;

use super::{parse, parse_document, parse_document_full};
use crate::ast::{Node, Str, TextVariant};

#[test]
fn simple_pair() {
    let root = parse_document("a=b\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "a" = "b"
    "#);
}

#[test]
fn alphanumeric_keys_and_values() {
    let root = parse_document("a23=b43\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "a23" = "b43"
    "#);
}

#[test]
fn underscore_in_key() {
    let root = parse_document("a_asdf=23432\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "a_asdf" = "23432"
    "#);
}

#[test]
fn dash_is_not_a_key_character() {
    assert!(parse_document("a-asdf=23432\n", "test.cfg").is_err());
}

#[test]
fn empty_value() {
    let root = parse_document("a=\n", "test.cfg").unwrap();
    let Node::Pair(pair) = &root.children[0] else {
        panic!("expected a pair");
    };
    assert!(pair.value.is_empty());
}

#[test]
fn trailing_newline_is_appended() {
    let body = parse("[foo][/foo]").unwrap();
    assert_eq!(body.name, "foo");
    assert!(body.children.is_empty());
}

#[test]
fn double_quoted_value_spans_newlines() {
    let root = parse_document("a=\"\nfoooooooo\"\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "a" = "\nfoooooooo"
    "#);
}

#[test]
fn angle_quoted_value() {
    let root = parse_document("a=<<asdf>>\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "a" = "asdf"
    "#);
}

#[test]
fn translatable_marker_is_absorbed() {
    let root = parse_document("user_team_name=_\"Enemies\"\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "user_team_name" = "Enemies"
    "#);
}

#[test]
fn quoted_concatenation_with_plus() {
    let root = parse_document("a=\" bar \" + _\"baz\"\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "a" = " bar " + "baz"
    "#);
}

#[test]
fn quoted_concatenation_across_newlines() {
    let input = indoc! {r#"
    a = " bar " +

     _ "baz"
    "#};
    let root = parse_document(input, "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "a" = " bar " + "baz"
    "#);
}

#[test]
fn adjacent_quoted_pieces_concatenate_without_plus() {
    let root = parse_document("a=\"x\" \"y\"\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "a" = "x" + "y"
    "#);
}

#[test]
fn plus_after_blank_line_continues_the_value() {
    let root = parse_document("a=\" bar \"\n\n + \"baz\"\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "a" = " bar " + "baz"
    "#);
}

#[test]
fn unquoted_value_with_macros() {
    let root = parse_document("a={BAR},asd,fgh\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "a" = {BAR} + ",asd,fgh"
    "#);
}

#[test]
fn lone_macro_value() {
    let root = parse_document("a={BAR}\n", "test.cfg").unwrap();
    let Node::Pair(pair) = &root.children[0] else {
        panic!("expected a pair");
    };
    assert_eq!(
        pair.value,
        Str(vec![TextVariant::Macro(crate::ast::MacroInstance::new(
            "BAR"
        ))])
    );
}

#[test]
fn macro_invocation_at_config_level() {
    let root = parse_document("{BAR}\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      macro "{BAR}"
    "#);
}

#[test]
fn comments() {
    let root = parse_document("#foo bar baz\n", "test.cfg").unwrap();
    assert!(root.children.is_empty());

    let root = parse_document("    # foo bar baz\n", "test.cfg").unwrap();
    assert!(root.children.is_empty());

    let root = parse_document(" \n\n  #foo bar baz\n", "test.cfg").unwrap();
    assert!(root.children.is_empty());
}

#[test]
fn trailing_comment_after_value() {
    let root = parse_document("foo=_\"bar\" # blah blah blah\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "foo" = "bar"
    "#);

    let root = parse_document("foo=bar # blah blah blah\n", "test.cfg").unwrap();
    let Node::Pair(pair) = &root.children[0] else {
        panic!("expected a pair");
    };
    // unquoted runs keep everything up to the comment marker
    assert_eq!(pair.value.flatten(), "bar ");
}

#[test]
fn multi_assignment_expands_to_pairs() {
    let body = parse("[foo]x,y=1,2\n[/foo]\n").unwrap();
    assert_eq!(body.name, "foo");
    insta::assert_snapshot!(body.dump(), @r#"
    body "foo"
      pair "x" = "1"
      pair "y" = "2"
    "#);
}

#[test]
fn multi_assignment_discards_extra_keys() {
    let root = parse_document("x,y,z=1,2\n", "test.cfg").unwrap();
    assert_eq!(root.children.len(), 2);
}

#[test]
fn multi_assignment_discards_extra_values() {
    let root = parse_document("x,y=1,2,3\n", "test.cfg").unwrap();
    insta::assert_snapshot!(root.dump(), @r#"
    body "root"
      pair "x" = "1"
      pair "y" = "2"
    "#);
}

#[test]
fn nested_tags() {
    let input = indoc! {r#"
    [foo]
    a = bde4_@342
    [bar]
    [foo]
    [sd]
    a= b
    [/sd]
    [/foo]
    [/bar]
    [/foo]
    "#};
    let body = parse(input).unwrap();
    insta::assert_snapshot!(body.dump(), @r#"
    body "foo"
      pair "a" = "bde4_@342"
      body "bar"
        body "foo"
          body "sd"
            pair "a" = "b"
    "#);
}

#[test]
fn tag_mismatch_is_a_parse_error() {
    let err = parse("[foo]\n[/bar]\n").unwrap_err();
    assert!(err.expected.contains("[/foo]"), "expected: {}", err.expected);
    assert!(err.context.starts_with("[/bar]"), "context: {}", err.context);
    assert_eq!(err.line, 2);
}

#[test]
fn two_top_level_tags_reject_single_parse() {
    assert!(parse("[foo][bar][/bar][/foo][baz][/baz]\n").is_err());
    let root = parse_document("[foo][bar][/bar][/foo][baz][/baz]\n", "test.cfg").unwrap();
    assert_eq!(root.children.len(), 2);
}

#[test]
fn merge_marker_is_split_off_the_name() {
    let body = parse("[+foo]a=b\n[/foo]\n").unwrap();
    assert_eq!(body.name, "foo");
    assert!(body.merge);
    insta::assert_snapshot!(body.dump(), @r#"
    body "foo" (merge)
      pair "a" = "b"
    "#);
}

#[test]
fn end_tag_before_start_is_an_error() {
    assert!(parse_document("[/foo]\n", "test.cfg").is_err());
}

#[test]
fn empty_document() {
    let root = parse_document("", "test.cfg").unwrap();
    assert!(root.children.is_empty());
    assert_eq!(root.name, "root");
}

#[test]
fn garbage_after_document_nodes_is_an_error() {
    let err = parse_document("a=b\n,,,\n", "test.cfg").unwrap_err();
    assert!(err.context.starts_with(",,,"));
}

#[test]
fn parse_error_carries_position_and_file() {
    let err = parse_document("[foo]\na=1\n", "campaign.cfg").unwrap_err();
    assert_eq!(err.file, "campaign.cfg");
    assert!(err.expected.contains("[/foo]"));
}

#[test]
fn line_counter_matches_newline_count() {
    let input = indoc! {r#"
    a="multi
    line
    value"
    # a comment
    [foo]
    b=<<raw
    text>>
    {MACRO
    SPANNING}
    [/foo]
    "#};
    let result = parse_document_full(input, "test.cfg").unwrap();
    let newlines = input.matches('\n').count() as u32;
    assert_eq!(result.preprocessor.line(), 1 + newlines);
}

#[test]
fn line_counter_survives_value_backtracking() {
    // The continuation lookahead after "x" consumes the newline, finds no
    // further piece, and backtracks; the newline must not count twice.
    let input = "a=\"x\"\n oops=1\nb=c\n";
    let result = parse_document_full(input, "test.cfg").unwrap();
    assert_eq!(result.root.children.len(), 3);
    assert_eq!(result.preprocessor.line(), 4);
}

#[test]
fn big_menu_image_value() {
    let input = "difficulty_descriptions={MENU_IMG_TXT2 \
\"units/human-loyalists/horseman/horseman.png~RC(magenta>red)\" _\"Horseman\" \
_\"(Beginner)\"} +\n     \";\" + {MENU_IMG_TXT2 \
\"units/human-loyalists/grand-knight/grand-knight.png~RC(magenta>red)\" _\"Knight\" \
_\"(Challenging)\"}\n";
    let root = parse_document(input, "test.cfg").unwrap();
    let Node::Pair(pair) = &root.children[0] else {
        panic!("expected a pair");
    };
    assert_eq!(pair.key, "difficulty_descriptions");
    assert_eq!(pair.value.0.len(), 3);
}

#[test]
fn unterminated_tag_is_an_error() {
    assert!(parse("[foo]\na=b\n").is_err());
}

#[test]
fn unterminated_macro_is_an_error() {
    let err = parse_document("a={BAR\n", "test.cfg").unwrap_err();
    assert!(err.expected.contains("macro"), "expected: {}", err.expected);
}
