//! Built-in child containers and generic tag adapters.
//!
//! - `Vec<T>` stores a sequence of children of one tag type.
//! - [`TagSeq`] stores a heterogeneous sequence dispatched over a
//!   [`TagUnion`].
//! - [`AllChildrenMap`] is a catch-all that accepts every child tag,
//!   grouped by name. Useful only as a fallback.
//! - [`RawBody`] and [`StringMap`] are generic [`Tag`]s for schema-less
//!   subtrees and uniform attribute maps.

use indexmap::IndexMap;

use crate::ast::{Body, Node};
use crate::log::CoerceLog;

use super::{Attribute, ChildContainer, Tag, TagUnion};

impl<T: Tag> ChildContainer for Vec<T> {
    fn allows_tag(body: &Body) -> bool {
        body.name == T::tag_name()
    }

    fn insert_tag(&mut self, body: &Body, log: &mut CoerceLog) {
        let mut value = T::default();
        value.coerce(&body.children, log);
        self.push(value);
    }
}

/// Heterogeneous sequence: holds elements of several tag types, in input
/// order, dispatched by name through the union's declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSeq<U>(pub Vec<U>);

impl<U> Default for TagSeq<U> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<U> std::ops::Deref for TagSeq<U> {
    type Target = [U];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<U: TagUnion> ChildContainer for TagSeq<U> {
    fn allows_tag(body: &Body) -> bool {
        U::allows(&body.name)
    }

    fn insert_tag(&mut self, body: &Body, log: &mut CoerceLog) {
        if let Some(value) = U::from_body(body, log) {
            self.0.push(value);
        }
    }
}

/// Catch-all container: accepts every body and groups the raw subtrees by
/// name, preserving first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllChildrenMap {
    pub children: IndexMap<String, Vec<Body>>,
}

impl ChildContainer for AllChildrenMap {
    fn allows_tag(_body: &Body) -> bool {
        true
    }

    fn insert_tag(&mut self, body: &Body, _log: &mut CoerceLog) {
        self.children
            .entry(body.name.clone())
            .or_default()
            .push(body.clone());
    }
}

/// A tag that keeps its child list verbatim instead of coercing it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawBody {
    pub children: Vec<Node>,
}

impl Tag for RawBody {
    fn tag_name() -> &'static str {
        "config"
    }

    fn coerce(&mut self, cfg: &[Node], _log: &mut CoerceLog) {
        self.children = cfg.to_vec();
    }
}

/// A tag whose body is a uniform map of attributes: every pair becomes a
/// map entry coerced to `A`; child tags are reported unused.
#[derive(Debug, Clone, PartialEq)]
pub struct StringMap<A>(pub IndexMap<String, A>);

impl<A> Default for StringMap<A> {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl<A: Attribute + Default> Tag for StringMap<A> {
    fn tag_name() -> &'static str {
        "string-map"
    }

    fn coerce(&mut self, cfg: &[Node], log: &mut CoerceLog) {
        for node in cfg {
            match node {
                Node::Pair(pair) => {
                    let slot = self.0.entry(pair.key.clone()).or_default();
                    if let Err(diagnostic) = A::coerce(slot, &pair.value) {
                        log.report_attribute_fail::<A>(
                            &pair.key,
                            &pair.value.flatten(),
                            &diagnostic,
                        );
                    }
                }
                other => log.report_unused(other),
            }
        }
    }
}
