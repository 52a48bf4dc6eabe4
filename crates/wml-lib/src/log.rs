//! Error collection for schema coercion.
//!
//! Coercion never aborts: every schema violation, malformed value, and
//! unconsumed input node becomes an [`Incident`] appended to a [`CoerceLog`].
//! The log carries a context stack of tag names so each incident can report
//! where in the tree it happened, rendered as `[c1][c2]…`.

use std::fmt;

use crate::ast::{Node, Str};
use crate::schema::{Attribute, Tag};

/// A single non-fatal diagnostic produced during coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    /// Contextual path, e.g. `[side][unit] Key: gold`.
    pub at: String,
    /// Human-readable description of the problem.
    pub what: String,
    /// The offending literal, or empty when there is none.
    pub source: String,
}

impl fmt::Display for Incident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "At: {}", self.at)?;
        writeln!(f, "Error: {}", self.what)?;
        if !self.source.is_empty() {
            writeln!(f, "Source: {}", self.source)?;
        }
        writeln!(f)
    }
}

/// Accumulating collection of coercion incidents.
///
/// Incidents are never dropped and carry no severity; emission order is
/// preserved. The context stack must only be manipulated through
/// [`CoerceLog::scoped`] so that every exit path restores the entry depth.
#[derive(Debug, Clone, Default)]
pub struct CoerceLog {
    incidents: Vec<Incident>,
    context: Vec<String>,
}

/// RAII frame for the context stack; pops on drop.
#[must_use = "dropping the guard immediately pops the context frame"]
pub struct ContextGuard<'a> {
    log: &'a mut CoerceLog,
}

impl ContextGuard<'_> {
    pub fn log(&mut self) -> &mut CoerceLog {
        self.log
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.log.pop_context();
    }
}

impl CoerceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_context(&mut self, s: impl Into<String>) {
        self.context.push(s.into());
    }

    pub fn pop_context(&mut self) {
        self.context.pop();
    }

    /// Pushes a context frame that is popped when the guard drops.
    pub fn scoped(&mut self, s: impl Into<String>) -> ContextGuard<'_> {
        self.push_context(s);
        ContextGuard { log: self }
    }

    pub fn context_depth(&self) -> usize {
        self.context.len()
    }

    fn format_context(&self) -> String {
        let mut out = String::new();
        for s in &self.context {
            out.push('[');
            out.push_str(s);
            out.push(']');
        }
        out
    }

    /// Records a value that failed to coerce to attribute type `A`, or a
    /// required attribute that was absent.
    pub fn report_attribute_fail<A: Attribute>(&mut self, key: &str, source: &str, diagnostic: &str) {
        self.incidents.push(Incident {
            at: format!("{} Key: {}", self.format_context(), key),
            what: format!("Expected: {}.\n      {}", A::debug_name(), diagnostic),
            source: source.to_owned(),
        });
    }

    /// Records a required child tag that was absent.
    pub fn report_child_missing<T: Tag>(&mut self, key: &str, diagnostic: &str) {
        self.incidents.push(Incident {
            at: self.format_context(),
            what: format!(
                "Expected child of type: {}, with name '{}'.\n      {}",
                T::tag_name(),
                key,
                diagnostic
            ),
            source: String::new(),
        });
    }

    /// Records an input node not consumed by any schema field. Macro
    /// invocations are inert to the schema and are not reported.
    pub fn report_unused(&mut self, node: &Node) {
        match node {
            Node::Pair(pair) => self.report_unused_attribute(&pair.key, &pair.value),
            Node::Body(body) => self.report_unused_child(&body.name),
            Node::Macro(_) => {}
        }
    }

    fn report_unused_attribute(&mut self, key: &str, value: &Str) {
        self.incidents.push(Incident {
            at: format!("{}.{}", self.format_context(), key),
            what: format!("Unused attribute. Value: {}", value.flatten()),
            source: String::new(),
        });
    }

    fn report_unused_child(&mut self, name: &str) {
        self.incidents.push(Incident {
            at: self.format_context(),
            what: format!("Unused child tag. [{}]", name),
            source: String::new(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Incident> {
        self.incidents.iter()
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Dumps every incident in emission order.
    pub fn write(&self, w: &mut impl fmt::Write) -> fmt::Result {
        for incident in &self.incidents {
            write!(w, "{}", incident)?;
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write(&mut out).expect("String write never fails");
        out
    }
}

impl fmt::Display for CoerceLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}
