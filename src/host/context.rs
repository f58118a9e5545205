//! The host global context - the engine's only external dependency.
//!
//! A context is a bag of named global bindings plus an evaluator slot. The
//! probing engine reads a handful of well-known bindings, calls the
//! evaluator through the gateway, and writes exactly one binding of its
//! own (the registry install slot) for the duration of its life.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::host::evaluator::Evaluator;
use crate::host::value::{HostValue, NativeFunction};

/// Name of the baseline object-construction primitive the gateway
/// requires before any snippet evaluation.
pub const OBJECT_PRIMITIVE: &str = "Object";

pub type SharedGlobalContext = Rc<RefCell<GlobalContext>>;

pub struct GlobalContext {
    bindings: HashMap<String, HostValue>,
    evaluator: Option<Rc<dyn Evaluator>>,
}

impl GlobalContext {
    /// An empty context: no bindings, no evaluator.
    pub fn new() -> Self {
        GlobalContext {
            bindings: HashMap::new(),
            evaluator: None,
        }
    }

    /// Wrap the context for shared single-threaded access.
    pub fn shared(self) -> SharedGlobalContext {
        Rc::new(RefCell::new(self))
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn get_binding(&self, name: &str) -> Option<HostValue> {
        self.bindings.get(name).cloned()
    }

    pub fn define_binding(&mut self, name: impl Into<String>, value: HostValue) {
        self.bindings.insert(name.into(), value);
    }

    /// Remove a binding entirely, returning the previous occupant.
    pub fn remove_binding(&mut self, name: &str) -> Option<HostValue> {
        self.bindings.remove(name)
    }

    pub fn evaluator(&self) -> Option<Rc<dyn Evaluator>> {
        self.evaluator.clone()
    }

    /// Install or override the dynamic-evaluation primitive. Overriding
    /// after probes have been memoized never invalidates their cached
    /// results.
    pub fn set_evaluator(&mut self, evaluator: Rc<dyn Evaluator>) {
        self.evaluator = Some(evaluator);
    }

    pub fn clear_evaluator(&mut self) {
        self.evaluator = None;
    }

    /// Install or override the baseline object-construction primitive.
    pub fn set_object_constructor(&mut self, ctor: NativeFunction) {
        self.define_binding(OBJECT_PRIMITIVE, HostValue::Function(ctor));
    }

    /// The baseline object primitive, if it is currently a callable.
    pub fn object_constructor(&self) -> Option<NativeFunction> {
        match self.bindings.get(OBJECT_PRIMITIVE) {
            Some(HostValue::Function(nf)) => Some(*nf),
            _ => None,
        }
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
