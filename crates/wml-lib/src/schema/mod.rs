//! Schema-driven coercion of parsed WML into typed records.
//!
//! Three orthogonal capabilities identify how a type participates:
//!
//! - [`Attribute`] — a scalar coercible from a [`Str`] value.
//! - [`Tag`] — a record representing a tag body; its generated
//!   [`Tag::coerce`] walks the record's fields in declaration order.
//! - [`ChildContainer`] — a collection of child tag records, consumed
//!   greedily.
//!
//! Records are declared with [`wml_tag!`](crate::wml_tag) and heterogeneous
//! element types with [`wml_tag_union!`](crate::wml_tag_union). Coercion
//! never aborts; every violation is appended to a
//! [`CoerceLog`](crate::log::CoerceLog).

mod attributes;
mod containers;
mod coercer;
mod macros;

#[cfg(test)]
mod attributes_tests;

use crate::ast::{Body, Node, Str};
use crate::log::CoerceLog;

pub use coercer::Coercer;
pub use containers::{AllChildrenMap, RawBody, StringMap, TagSeq};

/// A scalar type coercible from a WML attribute value.
///
/// `coerce` must not panic: on success it writes `target`, on failure it
/// leaves `target` untouched and returns a diagnostic string.
pub trait Attribute: Sized {
    /// Name of the type as it appears in error messages, e.g. `integer`.
    fn debug_name() -> String;

    fn coerce(target: &mut Self, value: &Str) -> Result<(), String>;
}

/// A record type representing a WML tag body.
///
/// Implementations are normally generated by [`wml_tag!`](crate::wml_tag);
/// the generated `coerce` visits each field in declaration order and then
/// reports every unconsumed input node.
pub trait Tag: Default {
    /// The WML tag name this record matches when held in a container.
    fn tag_name() -> &'static str;

    fn coerce(&mut self, cfg: &[Node], log: &mut CoerceLog);
}

/// A collection type holding child tag records.
pub trait ChildContainer {
    /// Whether this container accepts a body of this name.
    fn allows_tag(body: &Body) -> bool;

    /// Coerces the body and appends it. Errors go to the log; the insert
    /// itself never fails.
    fn insert_tag(&mut self, body: &Body, log: &mut CoerceLog);
}

/// Element type of a heterogeneous tag sequence: a tagged union over several
/// [`Tag`] types, dispatched by body name (first declared match wins).
///
/// Implementations are generated by [`wml_tag_union!`](crate::wml_tag_union).
pub trait TagUnion: Sized {
    fn allows(name: &str) -> bool;

    /// Coerces the body into the first variant whose name matches, or
    /// `None` when no variant accepts it.
    fn from_body(body: &Body, log: &mut CoerceLog) -> Option<Self>;

    /// The dispatch name of this element's variant.
    fn name(&self) -> &'static str;
}

/// Coerces an AST child list into a fresh `T`, accumulating every schema
/// violation in `log`.
pub fn coerce<T: Tag>(cfg: &[Node], log: &mut CoerceLog) -> T {
    let mut result = T::default();
    result.coerce(cfg, log);
    result
}

/// Coerces a tag body into a fresh `T`.
pub fn coerce_body<T: Tag>(body: &Body, log: &mut CoerceLog) -> T {
    coerce(&body.children, log)
}
