//! Hand-written parser for the WML surface language.
//!
//! # Architecture
//!
//! The grammar is context-sensitive (quoting modes, `#` directives to end of
//! line, brace-balanced macro blobs), so there is no separate tokenizer: the
//! productions in [`grammar`] work directly on bytes through the state
//! machine in [`core`]. One byte of lookahead decides almost everything; the
//! two genuine ambiguities (quoted vs. unquoted values, pair vs.
//! multi-assignment) are handled with checkpoints that restore the line
//! counter along with the position.
//!
//! Preprocessor directives are parsed and tracked in a per-call
//! [`PpState`] — macro definitions are registered, conditional blocks are
//! discarded, and macro invocations stay opaque AST nodes. Nothing is ever
//! expanded.
//!
//! Every parse call owns its state and error reporting; there is no shared
//! or process-global sink.

mod core;
mod error;
mod grammar;
mod preprocessor;

#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod preprocessor_tests;

use std::borrow::Cow;

use crate::ast::Body;

use self::core::Parser;

pub use error::{ParseError, ParseErrorPrinter};
pub use preprocessor::{PpCursor, PpMacro, PpState};

/// A parsed document plus the preprocessor state it accumulated.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Synthetic body named `root` wrapping the top-level nodes.
    pub root: Body,
    pub preprocessor: PpState,
}

/// The grammar expects every line to be terminated.
fn with_trailing_newline(text: &str) -> Cow<'_, str> {
    if text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        let mut owned = text.to_owned();
        owned.push('\n');
        Cow::Owned(owned)
    }
}

/// Parses a single top-level tag. Trailing input is an error.
pub fn parse(text: &str) -> Result<Body, ParseError> {
    let storage = with_trailing_newline(text);
    let mut parser = Parser::new(&storage, "root");
    let body = parser.parse_body()?;
    if !parser.at_eof() {
        return Err(parser.fail("end of input"));
    }
    Ok(body)
}

/// Parses a whole document — any sequence of top-level nodes — and wraps it
/// in a synthetic body named `root`. `filename` is used for error positions.
pub fn parse_document(text: &str, filename: &str) -> Result<Body, ParseError> {
    parse_document_full(text, filename).map(|result| result.root)
}

/// Like [`parse_document`], but also returns the preprocessor state (macro
/// table and final cursor).
pub fn parse_document_full(text: &str, filename: &str) -> Result<ParseResult, ParseError> {
    let storage = with_trailing_newline(text);
    let mut parser = Parser::new(&storage, filename);
    let children = parser.parse_config()?;
    parser.skip_ws_all();
    if !parser.at_eof() {
        return Err(parser.fail("a node"));
    }
    let root = Body {
        name: "root".to_owned(),
        merge: false,
        children,
    };
    Ok(ParseResult {
        root,
        preprocessor: parser.into_state(),
    })
}
