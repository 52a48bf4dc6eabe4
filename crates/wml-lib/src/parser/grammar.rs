//! Grammar productions for the WML surface language.
//!
//! ```text
//! config       := nodelist?
//! nodelist     := (pp_line | macro_instance | wml | pair | pairlist)*
//! wml          := start_tag config end_tag
//! start_tag    := '[' !'/' '+'? (char - ']')+ ']'
//! end_tag      := '[/' name ']'                     (name must match)
//! pair         := key ws* '=' value
//! pairlist     := key (',' key)* '=' vlist_elem (',' vlist_elem)*
//! value        := quoted_value | unquoted_value
//! quoted_value := piece (('+'? piece))*             (ws and newlines around '+')
//! piece        := '_'? (macro_instance | '<<' … '>>' | '"' … '"')
//! macro_instance := '{' balanced '}'
//! pp_line      := '#' (define | undef | if | error | warning | comment)
//! ```
//!
//! Productions are `parse_*` methods extending [`Parser`]. The grammar is
//! mostly decided by one byte of lookahead; the only backtracking points are
//! quoted-versus-unquoted values and the comma lookahead that separates a
//! plain pair from a multi-assignment line. Checkpoints restore the
//! preprocessor line counter along with the position.

use super::core::Parser;
use super::error::ParseError;
use crate::ast::{Body, MacroInstance, Node, Pair, Str, TextVariant};

const IF_DIRECTIVES: [&str; 6] = ["ifver", "ifnver", "ifhave", "ifnhave", "ifdef", "ifndef"];

fn is_ws_weak(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r')
}

fn is_key_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_key_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_pp_symbol_char(b: u8) -> bool {
    !matches!(b, b'{' | b'}' | b' ' | b'\n' | b'\t' | b'\r')
}

impl<'src> Parser<'src> {
    // Whitespace

    pub(super) fn skip_ws_weak(&mut self) {
        while self.peek().is_some_and(is_ws_weak) {
            self.bump();
        }
    }

    /// Like [`Self::skip_ws_weak`] but reports whether anything was consumed.
    fn skip_ws_weak1(&mut self) -> bool {
        let start = self.pos;
        self.skip_ws_weak();
        self.pos > start
    }

    pub(super) fn skip_ws_all(&mut self) {
        while self.peek().is_some_and(|b| is_ws_weak(b) || b == b'\n') {
            self.bump();
        }
    }

    /// Weak whitespace followed by at most one newline.
    fn skip_to_eol(&mut self) {
        self.skip_ws_weak();
        self.eat(b'\n');
    }

    /// Weak whitespace, then either a `#` lookahead (left for the
    /// preprocessor) or a consumed newline. Anything else is an error.
    fn consume_to_eol(&mut self) -> Result<(), ParseError> {
        self.skip_ws_weak();
        if self.peek() == Some(b'#') {
            return Ok(());
        }
        if self.eat(b'\n') {
            return Ok(());
        }
        Err(self.fail("end of line"))
    }

    /// Consumes the rest of the line including its newline.
    fn skip_ignore_line(&mut self) {
        self.take_while(|b| b != b'\n');
        self.eat(b'\n');
    }

    // Terminals

    fn parse_key(&mut self) -> Result<&'src str, ParseError> {
        if !self.peek().is_some_and(is_key_start) {
            return Err(self.fail("attribute key"));
        }
        Ok(self.take_while(is_key_char))
    }

    fn parse_double_quoted(&mut self) -> Result<&'src str, ParseError> {
        self.bump(); // opening quote
        let content = self.take_while(|b| b != b'"');
        if !self.eat(b'"') {
            return Err(self.fail("closing '\"'"));
        }
        Ok(content)
    }

    fn parse_angle_quoted(&mut self) -> Result<&'src str, ParseError> {
        self.advance_to(self.pos + 2); // <<
        match self.src[self.pos..].find(">>") {
            Some(rel) => {
                let start = self.pos;
                self.advance_to(start + rel);
                let content = &self.src[start..self.pos];
                self.advance_to(self.pos + 2);
                Ok(content)
            }
            None => Err(self.fail("closing '>>'")),
        }
    }

    /// A run of raw value text. Stops at newline, `"`, `{`, `#`, a `<<`
    /// opener, and (inside value lists) `,`.
    fn unquoted_run(&mut self, exclude_comma: bool) -> Option<&'src str> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if matches!(b, b'\n' | b'"' | b'{' | b'#') {
                break;
            }
            if exclude_comma && b == b',' {
                break;
            }
            if b == b'<' && self.peek_at(1) == Some(b'<') {
                break;
            }
            self.bump();
        }
        if self.pos == start {
            None
        } else {
            Some(&self.src[start..self.pos])
        }
    }

    /// Brace-balanced `{…}` blob; the interior is preserved verbatim.
    fn parse_macro_instance(&mut self) -> Result<MacroInstance, ParseError> {
        self.bump(); // '{'
        let start = self.pos;
        let mut depth = 1usize;
        while let Some(b) = self.peek() {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        let text = self.src[start..self.pos].to_owned();
                        self.bump();
                        return Ok(MacroInstance { text });
                    }
                }
                _ => {}
            }
            self.bump();
        }
        Err(self.fail("'}' closing macro invocation"))
    }

    // Values

    /// One piece of a quoted value: optional `_` translatable marker
    /// (absorbed), then a macro invocation, `<<…>>` string, or `"…"` string.
    /// Returns `None` (position restored) when no piece starts here.
    fn parse_quoted_piece(&mut self) -> Result<Option<TextVariant>, ParseError> {
        let cp = self.checkpoint();
        self.skip_ws_weak();
        if self.eat(b'_') {
            self.skip_ws_weak();
        }
        match self.peek() {
            Some(b'{') => Ok(Some(TextVariant::Macro(self.parse_macro_instance()?))),
            Some(b'"') => Ok(Some(TextVariant::Literal(
                self.parse_double_quoted()?.to_owned(),
            ))),
            Some(b'<') if self.starts_with("<<") => Ok(Some(TextVariant::Literal(
                self.parse_angle_quoted()?.to_owned(),
            ))),
            _ => {
                self.restore(cp);
                Ok(None)
            }
        }
    }

    /// `+`-separated quoted pieces. Whitespace and newlines may surround the
    /// `+`, and the `+` itself is optional between adjacent pieces.
    fn parse_quoted_value(&mut self) -> Result<Str, ParseError> {
        let mut pieces = Vec::new();
        match self.parse_quoted_piece()? {
            Some(piece) => pieces.push(piece),
            None => return Err(self.fail("quoted value")),
        }
        loop {
            let cp = self.checkpoint();
            self.skip_ws_all();
            self.eat(b'+');
            self.skip_ws_all();
            match self.parse_quoted_piece()? {
                Some(piece) => pieces.push(piece),
                None => {
                    self.restore(cp);
                    break;
                }
            }
        }
        Ok(Str(pieces))
    }

    /// Raw text runs and macro invocations; may be empty.
    fn parse_unquoted_value(&mut self) -> Result<Str, ParseError> {
        self.skip_ws_weak();
        let mut pieces = Vec::new();
        loop {
            if self.peek() == Some(b'{') {
                pieces.push(TextVariant::Macro(self.parse_macro_instance()?));
            } else if let Some(run) = self.unquoted_run(false) {
                pieces.push(TextVariant::Literal(run.to_owned()));
            } else {
                break;
            }
        }
        Ok(Str(pieces))
    }

    /// Attribute value: quoted form first, unquoted as fallback. Both must
    /// run out at the end of the line (or a `#` comment).
    fn parse_value(&mut self) -> Result<Str, ParseError> {
        let cp = self.checkpoint();
        if let Ok(value) = self.parse_quoted_value() {
            if self.consume_to_eol().is_ok() {
                return Ok(value);
            }
        }
        self.restore(cp);

        let value = self.parse_unquoted_value()?;
        self.consume_to_eol()?;
        Ok(value)
    }

    /// Comma-separated raw elements of a multi-assignment right hand side.
    fn parse_valuelist(&mut self) -> Result<Vec<String>, ParseError> {
        let mut values = Vec::new();
        self.skip_ws_weak();
        match self.unquoted_run(true) {
            Some(run) => values.push(run.to_owned()),
            None => return Err(self.fail("value list")),
        }
        loop {
            let cp = self.checkpoint();
            self.skip_ws_weak();
            if !self.eat(b',') {
                self.restore(cp);
                break;
            }
            self.skip_ws_weak();
            match self.unquoted_run(true) {
                Some(run) => values.push(run.to_owned()),
                None => {
                    self.restore(cp);
                    break;
                }
            }
        }
        Ok(values)
    }

    // Attribute lines

    /// One `key = value` line or a `k1,k2 = v1,v2` multi-assignment.
    ///
    /// A multi-assignment expands to `min(|keys|, |values|)` pairs; extra
    /// keys or values are discarded.
    fn parse_pair_line(&mut self, out: &mut Vec<Node>) -> Result<(), ParseError> {
        let mut keys = vec![self.parse_key()?];
        loop {
            let cp = self.checkpoint();
            self.skip_ws_weak();
            if !self.eat(b',') {
                self.restore(cp);
                break;
            }
            self.skip_ws_weak();
            match self.parse_key() {
                Ok(key) => keys.push(key),
                Err(_) => {
                    self.restore(cp);
                    break;
                }
            }
        }
        self.skip_ws_weak();
        if !self.eat(b'=') {
            return Err(self.fail("'='"));
        }

        if keys.len() == 1 {
            let value = self.parse_value()?;
            self.skip_to_eol();
            out.push(Node::Pair(Pair::new(keys[0], value)));
        } else {
            let values = self.parse_valuelist()?;
            self.skip_to_eol();
            for (key, value) in keys.into_iter().zip(values) {
                out.push(Node::Pair(Pair::new(key, Str::literal(value))));
            }
        }
        Ok(())
    }

    // Tags

    /// `[name]`, with an optional leading `+` merge marker split off into
    /// the body's `merge` flag.
    fn parse_start_tag(&mut self) -> Result<(&'src str, bool), ParseError> {
        self.bump(); // '['
        if self.peek() == Some(b'/') {
            return Err(self.fail("tag name"));
        }
        let merge = self.eat(b'+');
        let name = self.take_while(|b| b != b']');
        if name.is_empty() {
            return Err(self.fail("tag name"));
        }
        if !self.eat(b']') {
            return Err(self.fail("']'"));
        }
        Ok((name, merge))
    }

    fn parse_end_tag(&mut self, name: &str) -> Result<(), ParseError> {
        self.skip_ws_all();
        let cp = self.checkpoint();
        let matched = self.eat_str("[/") && self.eat_str(name) && self.eat(b']');
        if !matched {
            self.restore(cp);
            return Err(self.fail(format!("closing tag [/{}]", name)));
        }
        Ok(())
    }

    pub(super) fn parse_body(&mut self) -> Result<Body, ParseError> {
        self.skip_ws_all();
        if self.peek() != Some(b'[') {
            return Err(self.fail("'['"));
        }
        self.parse_body_at_bracket()
    }

    fn parse_body_at_bracket(&mut self) -> Result<Body, ParseError> {
        let (name, merge) = self.parse_start_tag()?;
        self.skip_ws_all();
        let children = self.parse_config()?;
        self.parse_end_tag(name)?;
        self.skip_to_eol();
        Ok(Body {
            name: name.to_owned(),
            merge,
            children,
        })
    }

    /// The interior of a tag (and the top level of a document): any number
    /// of preprocessor lines, macro invocations, nested tags, and attribute
    /// lines. Stops before an end tag or anything else it cannot start.
    pub(super) fn parse_config(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            let cp = self.checkpoint();
            self.skip_ws_all();
            match self.peek() {
                Some(b'#') => {
                    self.bump();
                    self.parse_directive()?;
                }
                Some(b'{') => {
                    let m = self.parse_macro_instance()?;
                    self.skip_to_eol();
                    nodes.push(Node::Macro(m));
                }
                Some(b'[') => {
                    if self.peek_at(1) == Some(b'/') {
                        self.restore(cp);
                        break;
                    }
                    nodes.push(Node::Body(self.parse_body_at_bracket()?));
                }
                Some(b) if is_key_start(b) => {
                    self.parse_pair_line(&mut nodes)?;
                }
                _ => {
                    self.restore(cp);
                    break;
                }
            }
        }
        Ok(nodes)
    }

    // Preprocessor directives. The leading `#` is already consumed.

    fn parse_directive(&mut self) -> Result<(), ParseError> {
        if self.eat_str("define") {
            return self.parse_define();
        }

        let cp = self.checkpoint();
        if self.eat_str("undef") && self.skip_ws_weak1() {
            let name = self.parse_pp_symbol()?;
            self.pp.remove_macro(name);
            self.skip_ignore_line();
            return Ok(());
        }
        self.restore(cp);

        if self.eat_str("error") || self.eat_str("warning") {
            self.skip_ignore_line();
            return Ok(());
        }

        for kw in IF_DIRECTIVES {
            let cp = self.checkpoint();
            if self.eat_str(kw) && self.skip_ws_weak1() {
                self.parse_pp_symbol()?;
                self.skip_ignore_line();
                self.skip_conditional_block();
                return Ok(());
            }
            self.restore(cp);
        }

        // Anything else after '#' is a comment.
        self.skip_ignore_line();
        Ok(())
    }

    fn parse_pp_symbol(&mut self) -> Result<&'src str, ParseError> {
        let sym = self.take_while(is_pp_symbol_char);
        if sym.is_empty() {
            return Err(self.fail("preprocessor symbol"));
        }
        Ok(sym)
    }

    fn try_pp_symbol(&mut self) -> Option<&'src str> {
        let sym = self.take_while(is_pp_symbol_char);
        if sym.is_empty() { None } else { Some(sym) }
    }

    /// `#define NAME arg*` through `#enddef`. The definition is registered;
    /// nothing is expanded.
    fn parse_define(&mut self) -> Result<(), ParseError> {
        if !self.skip_ws_weak1() {
            return Err(self.fail("whitespace after #define"));
        }
        let name = self.parse_pp_symbol()?;
        let mut params = Vec::new();
        loop {
            let cp = self.checkpoint();
            if !self.skip_ws_weak1() {
                break;
            }
            match self.try_pp_symbol() {
                Some(sym) => params.push(sym.to_owned()),
                None => {
                    self.restore(cp);
                    break;
                }
            }
        }
        let cursor = self.pp.cursor().clone();
        self.skip_ignore_line();

        let body = self.parse_define_body()?;
        self.pp.add_macro(name, params, body, cursor);
        Ok(())
    }

    /// Body text up to `#enddef`. `#`-comment lines inside the body are
    /// dropped from the recorded text.
    fn parse_define_body(&mut self) -> Result<String, ParseError> {
        let mut body = String::new();
        let mut run_start = self.pos;
        loop {
            if self.starts_with("#enddef") {
                body.push_str(&self.src[run_start..self.pos]);
                self.advance_to(self.pos + "#enddef".len());
                self.skip_ignore_line();
                return Ok(body);
            }
            match self.peek() {
                Some(b'#') => {
                    body.push_str(&self.src[run_start..self.pos]);
                    self.bump();
                    self.skip_ignore_line();
                    run_start = self.pos;
                }
                Some(_) => self.bump(),
                None => return Err(self.fail("#enddef")),
            }
        }
    }

    /// Conditional block contents are discarded up to the next line that
    /// begins `#else` or `#endif`; that line itself is left for the comment
    /// rule. Nested conditionals are not supported.
    fn skip_conditional_block(&mut self) {
        loop {
            if self.at_eof() || self.starts_with("#else") || self.starts_with("#endif") {
                break;
            }
            self.skip_ignore_line();
        }
    }
}
