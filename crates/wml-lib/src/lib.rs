//! WML parsing and schema-driven coercion.
//!
//! The crate turns WML source text — a bracketed-tag tree language with
//! `key = value` attributes, `#` preprocessor directives, and `{…}` macro
//! invocations — into an AST, and then coerces that AST into user-declared
//! record types while accumulating structured diagnostics for every schema
//! violation, malformed value, and unused input node.
//!
//! # Example
//!
//! ```
//! use wml_lib::{CoerceLog, coerce, parse};
//!
//! wml_lib::wml_tag! {
//!     pub struct Scenario("scenario") {
//!         req name: String,
//!         def turns: i64 = 20,
//!     }
//! }
//!
//! let body = parse("[scenario]\nname=test\n[/scenario]\n").expect("valid wml");
//! let mut log = CoerceLog::new();
//! let scenario: Scenario = coerce(&body.children, &mut log);
//!
//! assert_eq!(scenario.name, "test");
//! assert_eq!(scenario.turns, 20);
//! assert!(log.is_empty());
//! ```
//!
//! Parse errors are fatal per document and returned by value; coercion
//! incidents accumulate in the caller's [`CoerceLog`] and never abort.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod log;
pub mod parser;
pub mod schema;


pub use ast::{Body, Config, MacroInstance, Node, Pair, Str, TextVariant};
pub use log::{CoerceLog, ContextGuard, Incident};
pub use parser::{
    ParseError, ParseErrorPrinter, ParseResult, PpCursor, PpMacro, PpState, parse, parse_document,
    parse_document_full,
};
pub use schema::{
    AllChildrenMap, Attribute, ChildContainer, Coercer, RawBody, StringMap, Tag, TagSeq, TagUnion,
    coerce, coerce_body,
};
