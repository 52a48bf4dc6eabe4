//! The field-matching engine behind [`Tag::coerce`].

use crate::ast::{Body, Node, Pair};
use crate::log::CoerceLog;

use super::{Attribute, ChildContainer, Tag};

/// Walks a record's fields against an AST child list.
///
/// Each node is consumed at most once (tracked in `used`); matching is
/// always first-unused-first-match, so input order is preserved for every
/// observable consumer. After all fields have run, [`Coercer::report_unused`]
/// flags whatever the schema did not consume.
pub struct Coercer<'cfg, 'log> {
    cfg: &'cfg [Node],
    used: Vec<bool>,
    log: &'log mut CoerceLog,
}

impl<'cfg, 'log> Coercer<'cfg, 'log> {
    pub fn new(cfg: &'cfg [Node], log: &'log mut CoerceLog) -> Self {
        Self {
            cfg,
            used: vec![false; cfg.len()],
            log,
        }
    }

    /// First unused pair with this key; marks it consumed.
    fn find_pair(&mut self, key: &str) -> Option<&'cfg Pair> {
        for idx in 0..self.cfg.len() {
            if self.used[idx] {
                continue;
            }
            if let Node::Pair(pair) = &self.cfg[idx] {
                if pair.key == key {
                    self.used[idx] = true;
                    return Some(pair);
                }
            }
        }
        None
    }

    /// First unused body with this name; marks it consumed.
    fn find_body(&mut self, name: &str) -> Option<&'cfg Body> {
        for idx in 0..self.cfg.len() {
            if self.used[idx] {
                continue;
            }
            if let Node::Body(body) = &self.cfg[idx] {
                if body.name == name {
                    self.used[idx] = true;
                    return Some(body);
                }
            }
        }
        None
    }

    /// Required attribute. Missing or uncoercible values become incidents;
    /// a matched node is consumed even when its value fails to coerce.
    pub fn attribute<A: Attribute>(&mut self, key: &str, target: &mut A) {
        match self.find_pair(key) {
            Some(pair) => {
                if let Err(diagnostic) = A::coerce(target, &pair.value) {
                    self.log
                        .report_attribute_fail::<A>(key, &pair.value.flatten(), &diagnostic);
                }
            }
            None => {
                self.log
                    .report_attribute_fail::<A>(key, "(none)", "Attribute not found!");
            }
        }
    }

    /// Attribute with an explicit default: absence assigns the default
    /// silently instead of reporting.
    pub fn attribute_with_default<A: Attribute>(
        &mut self,
        key: &str,
        target: &mut A,
        default: impl FnOnce() -> A,
    ) {
        match self.find_pair(key) {
            Some(pair) => {
                if let Err(diagnostic) = A::coerce(target, &pair.value) {
                    self.log
                        .report_attribute_fail::<A>(key, &pair.value.flatten(), &diagnostic);
                }
            }
            None => *target = default(),
        }
    }

    /// Optional attribute: equivalent to a default of `None`.
    pub fn optional_attribute<A: Attribute + Default>(&mut self, key: &str, target: &mut Option<A>) {
        self.attribute_with_default(key, target, || None);
    }

    /// Required child tag, matched by field name against body names.
    pub fn child<T: Tag>(&mut self, key: &str, target: &mut T) {
        match self.find_body(key) {
            Some(body) => {
                let mut scope = self.log.scoped(key);
                target.coerce(&body.children, scope.log());
            }
            None => {
                self.log.report_child_missing::<T>(key, "Child not found!");
            }
        }
    }

    /// Required child tag held behind indirection (recursive record shapes).
    pub fn boxed_child<T: Tag>(&mut self, key: &str, target: &mut Box<T>) {
        self.child(key, &mut **target);
    }

    /// Optional child tag: absence is silent.
    pub fn optional_child<T: Tag>(&mut self, key: &str, target: &mut Option<T>) {
        if let Some(body) = self.find_body(key) {
            let mut value = T::default();
            let mut scope = self.log.scoped(key);
            value.coerce(&body.children, scope.log());
            drop(scope);
            *target = Some(value);
        }
    }

    /// Optional boxed child tag.
    pub fn optional_boxed_child<T: Tag>(&mut self, key: &str, target: &mut Option<Box<T>>) {
        if let Some(body) = self.find_body(key) {
            let mut value = Box::new(T::default());
            let mut scope = self.log.scoped(key);
            value.coerce(&body.children, scope.log());
            drop(scope);
            *target = Some(value);
        }
    }

    /// Child container: greedy. Consumes every unused body the container
    /// accepts, in AST order, before the next field is examined.
    pub fn container<C: ChildContainer>(&mut self, target: &mut C) {
        for idx in 0..self.cfg.len() {
            if self.used[idx] {
                continue;
            }
            if let Node::Body(body) = &self.cfg[idx] {
                if C::allows_tag(body) {
                    self.used[idx] = true;
                    target.insert_tag(body, self.log);
                }
            }
        }
    }

    /// Reports every node the schema did not consume. Macro invocations are
    /// exempt.
    pub fn report_unused(self) {
        for (idx, node) in self.cfg.iter().enumerate() {
            if !self.used[idx] {
                self.log.report_unused(node);
            }
        }
    }
}
