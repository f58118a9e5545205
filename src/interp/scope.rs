//! Evaluation-local scope.
//!
//! Every `evaluate` call gets a fresh scope so probe snippets can declare
//! variables without ever creating global bindings. The global context is
//! a read-only fallback for identifier resolution.

use std::collections::HashMap;

use crate::host::error::EvalFailure;
use crate::host::value::HostValue;
use crate::parser::ast::DeclarationKind;

pub type ValueResult = Result<HostValue, EvalFailure>;

pub(crate) struct ScopeBinding {
    pub value: HostValue,
    pub kind: DeclarationKind,
}

pub struct EvalScope {
    bindings: HashMap<String, ScopeBinding>,
}

impl EvalScope {
    pub fn new() -> Self {
        EvalScope {
            bindings: HashMap::new(),
        }
    }

    pub fn declare(&mut self, name: impl Into<String>, kind: DeclarationKind, value: HostValue) {
        self.bindings
            .insert(name.into(), ScopeBinding { value, kind });
    }

    pub fn get(&self, name: &str) -> Option<HostValue> {
        self.bindings.get(name).map(|b| b.value.clone())
    }

    pub fn kind_of(&self, name: &str) -> Option<DeclarationKind> {
        self.bindings.get(name).map(|b| b.kind)
    }

    /// Overwrite an existing binding's value, keeping its kind.
    pub fn set(&mut self, name: &str, value: HostValue) {
        if let Some(binding) = self.bindings.get_mut(name) {
            binding.value = value;
        }
    }
}

impl Default for EvalScope {
    fn default() -> Self {
        Self::new()
    }
}
