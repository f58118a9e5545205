//! The probe catalog: declarative, append-only data.
//!
//! Each entry names a capability and says how to test it - by evaluating
//! a source-text snippet through the gateway, or by running a structural
//! closure against the host directly. The engine never validates snippet
//! syntax ahead of time; a snippet that fails to parse is just another
//! unsupported feature.

use crate::engine::error::ConfigError;
use crate::engine::gateway::EvaluationGateway;
use crate::engine::invoke::truthy_call;
use crate::engine::locator::{find_global_function, GLOBAL_FUNCTION_CANDIDATES};
use crate::engine::memo::ProbeResult;
use crate::host::context::SharedGlobalContext;
use crate::host::error::EvalFailure;
use crate::host::value::{HostNumber, HostValue, NativeFunction};

/// What a structural probe gets to work with: the gateway, the shared
/// context behind it, and the global-function locator.
pub struct ProbeScope<'a> {
    gateway: &'a EvaluationGateway,
}

impl<'a> ProbeScope<'a> {
    pub fn new(gateway: &'a EvaluationGateway) -> Self {
        ProbeScope { gateway }
    }

    pub fn gateway(&self) -> &EvaluationGateway {
        self.gateway
    }

    pub fn shared_context(&self) -> SharedGlobalContext {
        self.gateway.context().clone()
    }

    pub fn find_global_function(&self, candidates: &[&str]) -> Result<String, ConfigError> {
        let ctx = self.gateway.context().borrow();
        find_global_function(&ctx, candidates)
    }
}

pub type StructuralProbe = fn(&ProbeScope) -> ProbeResult;

#[derive(Clone, Copy)]
pub enum ProbeSpec {
    /// Supported iff the snippet evaluates without failure.
    Evaluates(&'static str),
    /// The probe's result is the snippet's value, falsy on failure.
    EvaluatesTo(&'static str),
    /// A direct test against the host's object model.
    Structural(StructuralProbe),
}

#[derive(Clone, Copy)]
pub struct ProbeEntry {
    pub name: &'static str,
    pub spec: ProbeSpec,
}

/// The built-in probes. The list only ever grows; names are never reused
/// for a different test.
pub static DEFAULT_CATALOG: &[ProbeEntry] = &[
    ProbeEntry {
        name: "supports_let_declarations",
        spec: ProbeSpec::Evaluates("let x = 0;"),
    },
    ProbeEntry {
        name: "supports_const_declarations",
        spec: ProbeSpec::Evaluates("const x = 0;"),
    },
    ProbeEntry {
        name: "const_bindings_are_mutable",
        spec: ProbeSpec::EvaluatesTo("const x = 0; x = 1; x == 1"),
    },
    ProbeEntry {
        name: "supports_trailing_array_commas",
        spec: ProbeSpec::Evaluates("[1, 2,]"),
    },
    ProbeEntry {
        name: "supports_trailing_object_commas",
        spec: ProbeSpec::Evaluates("{x: 1,}"),
    },
    ProbeEntry {
        name: "supports_arrow_functions",
        spec: ProbeSpec::Evaluates("(x) => x"),
    },
    ProbeEntry {
        name: "arrow_functions_are_callable",
        spec: ProbeSpec::EvaluatesTo("((x) => x + 1)(2) == 3"),
    },
    ProbeEntry {
        name: "supports_string_indexing",
        spec: ProbeSpec::EvaluatesTo("'abc'[1] == 'b'"),
    },
    ProbeEntry {
        name: "division_by_zero_is_infinite",
        spec: ProbeSpec::EvaluatesTo("1 / 0 > 1000000"),
    },
    ProbeEntry {
        name: "eval_sees_global_functions",
        spec: ProbeSpec::Structural(probe_eval_sees_globals),
    },
    ProbeEntry {
        name: "supports_object_construction",
        spec: ProbeSpec::Structural(probe_object_construction),
    },
    ProbeEntry {
        name: "supports_prototype_chains",
        spec: ProbeSpec::Structural(probe_prototype_chains),
    },
    ProbeEntry {
        name: "supports_prototype_mutation",
        spec: ProbeSpec::Structural(probe_prototype_mutation),
    },
];

pub fn default_catalog() -> &'static [ProbeEntry] {
    DEFAULT_CATALOG
}

/// Whether evaluated text can see the host's global callables. Needs a
/// concrete global name; any well-known one will do, and finding none at
/// all is fatal.
fn probe_eval_sees_globals(scope: &ProbeScope) -> ProbeResult {
    let name = scope.find_global_function(GLOBAL_FUNCTION_CANDIDATES)?;
    scope
        .gateway()
        .can_evaluate(&format!("{}(0)", name))
        .map(HostValue::Boolean)
}

fn object_primitive(ctx: &SharedGlobalContext) -> Result<NativeFunction, EvalFailure> {
    ctx.borrow().object_constructor().ok_or_else(|| {
        EvalFailure::TypeError("no object-construction primitive".to_string())
    })
}

/// Whether the baseline object primitive produces objects at all.
fn probe_object_construction(scope: &ProbeScope) -> ProbeResult {
    let ctx = scope.shared_context();
    Ok(truthy_call(|| {
        let ctor = object_primitive(&ctx)?;
        let value = ctor.call(&mut ctx.borrow_mut(), vec![])?;
        Ok(HostValue::Boolean(matches!(value, HostValue::Object(_))))
    }))
}

/// Whether property reads delegate along the prototype chain.
fn probe_prototype_chains(scope: &ProbeScope) -> ProbeResult {
    let ctx = scope.shared_context();
    Ok(truthy_call(|| {
        let ctor = object_primitive(&ctx)?;
        let proto = ctor.call(&mut ctx.borrow_mut(), vec![])?;
        let child = ctor.call(&mut ctx.borrow_mut(), vec![])?;
        match (proto, child) {
            (HostValue::Object(proto), HostValue::Object(child)) => {
                proto
                    .borrow_mut()
                    .set("marker", HostValue::Number(HostNumber::Integer(1)));
                child.borrow_mut().set_prototype(Some(proto));
                let inherited = child.borrow().get("marker");
                Ok(HostValue::Boolean(matches!(
                    inherited,
                    Some(HostValue::Number(HostNumber::Integer(1)))
                )))
            }
            _ => Ok(HostValue::Boolean(false)),
        }
    }))
}

/// Whether an object's prototype can be swapped after construction.
fn probe_prototype_mutation(scope: &ProbeScope) -> ProbeResult {
    let ctx = scope.shared_context();
    Ok(truthy_call(|| {
        let ctor = object_primitive(&ctx)?;
        let first = ctor.call(&mut ctx.borrow_mut(), vec![])?;
        let second = ctor.call(&mut ctx.borrow_mut(), vec![])?;
        let child = ctor.call(&mut ctx.borrow_mut(), vec![])?;
        match (first, second, child) {
            (
                HostValue::Object(first),
                HostValue::Object(second),
                HostValue::Object(child),
            ) => {
                first
                    .borrow_mut()
                    .set("kind", HostValue::Number(HostNumber::Integer(0)));
                second
                    .borrow_mut()
                    .set("kind", HostValue::Number(HostNumber::Integer(1)));
                child.borrow_mut().set_prototype(Some(first));
                child.borrow_mut().set_prototype(Some(second));
                let seen = child.borrow().get("kind");
                Ok(HostValue::Boolean(matches!(
                    seen,
                    Some(HostValue::Number(HostNumber::Integer(1)))
                )))
            }
            _ => Ok(HostValue::Boolean(false)),
        }
    }))
}
