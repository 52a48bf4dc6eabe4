use crate::ast::{MacroInstance, Str, TextVariant};

use super::Attribute;

fn coerce_ok<A: Attribute + Default>(text: &str) -> A {
    let mut target = A::default();
    A::coerce(&mut target, &Str::literal(text)).expect("coercion should succeed");
    target
}

fn coerce_err<A: Attribute + Default>(text: &str) -> String {
    let mut target = A::default();
    A::coerce(&mut target, &Str::literal(text)).expect_err("coercion should fail")
}

#[test]
fn integer() {
    assert_eq!(coerce_ok::<i64>("42"), 42);
    assert_eq!(coerce_ok::<i64>("-17"), -17);
    assert_eq!(coerce_ok::<i64>("  5  "), 5);
    assert_eq!(coerce_err::<i64>("five"), "lexical cast failed");
    assert_eq!(i64::debug_name(), "integer");
}

#[test]
fn nonnegative_integer_rejects_sign() {
    assert_eq!(coerce_ok::<u64>("42"), 42);
    assert_eq!(coerce_err::<u64>("-1"), "lexical cast failed");
    assert_eq!(u64::debug_name(), "nonnegative integer");
}

#[test]
fn decimal_number() {
    assert_eq!(coerce_ok::<f64>("2.5"), 2.5);
    assert_eq!(coerce_ok::<f64>("-0.125"), -0.125);
    assert_eq!(coerce_err::<f64>("x"), "lexical cast failed");
    assert_eq!(f64::debug_name(), "decimal number");
}

#[test]
fn failed_coercion_leaves_the_target_untouched() {
    let mut target = 7i64;
    let result = i64::coerce(&mut target, &Str::literal("not a number"));
    assert!(result.is_err());
    assert_eq!(target, 7);

    let mut flag = true;
    assert!(bool::coerce(&mut flag, &Str::literal("maybe")).is_err());
    assert!(flag);
}

#[test]
fn string_flattens_macro_pieces() {
    let value = Str(vec![
        TextVariant::Literal("pre ".into()),
        TextVariant::Macro(MacroInstance::new("NAME")),
    ]);
    let mut target = String::new();
    String::coerce(&mut target, &value).unwrap();
    assert_eq!(target, "pre {NAME}");
    assert_eq!(String::debug_name(), "string");
}

#[test]
fn boolean_accepts_yes_on_no_off() {
    assert!(coerce_ok::<bool>("yes"));
    assert!(coerce_ok::<bool>("on"));
    assert!(!coerce_ok::<bool>("no"));
    assert!(!coerce_ok::<bool>("off"));
    assert_eq!(
        coerce_err::<bool>("maybe"),
        "Legal values are: 'yes', 'no', 'on', 'off'. Found 'maybe'."
    );
    assert_eq!(bool::debug_name(), "boolean");
}

#[test]
fn string_list_splits_and_trims() {
    assert_eq!(coerce_ok::<Vec<String>>("1,2,3"), vec!["1", "2", "3"]);
    assert_eq!(coerce_ok::<Vec<String>>(" a , b "), vec!["a", "b"]);
    assert_eq!(<Vec<String>>::debug_name(), "comma separated list");
}

#[test]
fn string_list_edge_cases() {
    // unspecified by the grammar; this implementation maps blank input to an
    // empty list and keeps the empty element a trailing comma produces
    assert_eq!(coerce_ok::<Vec<String>>(""), Vec::<String>::new());
    assert_eq!(coerce_ok::<Vec<String>>("   "), Vec::<String>::new());
    assert_eq!(coerce_ok::<Vec<String>>("a,"), vec!["a", ""]);
}

#[test]
fn int_pair() {
    assert_eq!(coerce_ok::<(i64, i64)>("3,4"), (3, 4));
    assert_eq!(coerce_ok::<(i64, i64)>(" 3 , -4 "), (3, -4));
    assert_eq!(
        coerce_err::<(i64, i64)>("1,2,3"),
        "Expected pair, found 3 elements"
    );
    assert_eq!(
        coerce_err::<(i64, i64)>("x,2"),
        "Expected integer, found 'x' (first element)"
    );
    assert_eq!(
        coerce_err::<(i64, i64)>("1,y"),
        "Expected integer, found 'y' (second element)"
    );
    assert_eq!(<(i64, i64)>::debug_name(), "int pair");
}

#[test]
fn optional_lifts_the_inner_type() {
    assert_eq!(coerce_ok::<Option<i64>>("5"), Some(5));
    assert_eq!(coerce_ok::<Option<i64>>(""), None);
    assert_eq!(coerce_err::<Option<i64>>("x"), "lexical cast failed");
    assert_eq!(Option::<i64>::debug_name(), "optional integer");
    assert_eq!(
        Option::<Vec<String>>::debug_name(),
        "optional comma separated list"
    );
}
