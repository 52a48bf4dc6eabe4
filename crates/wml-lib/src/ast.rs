//! The WML tree representation.
//!
//! A document is a tree of [`Node`]s: nested tags ([`Body`]), `key = value`
//! attributes ([`Pair`]), and opaque macro invocations ([`MacroInstance`]).
//! Attribute values are [`Str`]s — ordered sequences of literal text pieces
//! and inlined macro invocations, modelling `+`-concatenation on the right
//! hand side of an attribute.

use std::fmt;

use serde::Serialize;

/// A `{…}` macro invocation, preserved verbatim.
///
/// `text` is the brace-balanced interior with the outer braces stripped;
/// nested braces are kept as written. Invocations are never expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroInstance {
    pub text: String,
}

impl MacroInstance {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl fmt::Display for MacroInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.text)
    }
}

/// One piece of an attribute value: literal text or a macro invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TextVariant {
    Literal(String),
    Macro(MacroInstance),
}

/// An attribute value: text interspersed with macro instances.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Str(pub Vec<TextVariant>);

impl Str {
    /// A value made of a single literal piece.
    pub fn literal(text: impl Into<String>) -> Self {
        Self(vec![TextVariant::Literal(text.into())])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenates all pieces: literals verbatim, macros as their `{…}`
    /// source form. This is the text handed to attribute coercion.
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        for piece in &self.0 {
            match piece {
                TextVariant::Literal(text) => out.push_str(text),
                TextVariant::Macro(m) => {
                    out.push('{');
                    out.push_str(&m.text);
                    out.push('}');
                }
            }
        }
        out
    }
}

impl From<&str> for Str {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl fmt::Display for Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "\"\"");
        }
        for (i, piece) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            match piece {
                TextVariant::Literal(text) => write!(f, "{:?}", text)?,
                TextVariant::Macro(m) => write!(f, "{}", m)?,
            }
        }
        Ok(())
    }
}

/// A `key = value` attribute line.
///
/// Keys within a body need not be unique; order is preserved and later
/// duplicates shadow nothing — consumption is first-match during coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    pub key: String,
    pub value: Str,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: Str) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A named tag: `[name] … [/name]`.
///
/// `merge` records a `[+name]` start tag; the `+` is not part of the
/// matching name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Body {
    pub name: String,
    pub merge: bool,
    pub children: Vec<Node>,
}

impl Body {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            merge: false,
            children: Vec::new(),
        }
    }

    /// Renders the tree as an indented dump, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, indent: usize) {
        let pad = "  ".repeat(indent);
        if self.merge {
            out.push_str(&format!("{}body \"{}\" (merge)\n", pad, self.name));
        } else {
            out.push_str(&format!("{}body \"{}\"\n", pad, self.name));
        }
        for child in &self.children {
            child.dump_into(out, indent + 1);
        }
    }
}

/// One element of a tag body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    Body(Body),
    Pair(Pair),
    Macro(MacroInstance),
}

impl Node {
    fn dump_into(&self, out: &mut String, indent: usize) {
        match self {
            Node::Body(body) => body.dump_into(out, indent),
            Node::Pair(pair) => {
                let pad = "  ".repeat(indent);
                out.push_str(&format!("{}pair \"{}\" = {}\n", pad, pair.key, pair.value));
            }
            Node::Macro(m) => {
                let pad = "  ".repeat(indent);
                out.push_str(&format!("{}macro \"{}\"\n", pad, m));
            }
        }
    }
}

/// The children of a body; also the top-level shape of a parsed document.
pub type Config = Vec<Node>;
