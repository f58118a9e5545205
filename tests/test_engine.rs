//! Tests for the probing core: safe invocation, memoization through the
//! registry, gateway preconditions, and the global-function locator.

extern crate autoprobe;

use std::cell::Cell;
use std::rc::Rc;

use autoprobe::engine::error::ConfigError;
use autoprobe::engine::gateway::EvaluationGateway;
use autoprobe::engine::invoke::{can_call, truthy_call};
use autoprobe::engine::locator::find_global_function;
use autoprobe::engine::registry::CapabilityRegistry;
use autoprobe::host::builtins::register_core_globals;
use autoprobe::host::context::GlobalContext;
use autoprobe::host::error::EvalFailure;
use autoprobe::host::evaluator::Evaluator;
use autoprobe::host::value::{HostNumber, HostValue, NativeFn, NativeFunction};
use autoprobe::interp::script_host::ScriptEvaluator;

fn noop_native(_ctx: &mut GlobalContext, _args: Vec<HostValue>) -> Result<HostValue, EvalFailure> {
    Ok(HostValue::Undefined)
}

fn callable(name: &'static str) -> HostValue {
    HostValue::Function(NativeFunction {
        name,
        func: noop_native as NativeFn,
    })
}

/// Wraps the reference evaluator and counts how often it actually runs.
struct CountingEvaluator {
    calls: Rc<Cell<u32>>,
    inner: ScriptEvaluator,
}

impl Evaluator for CountingEvaluator {
    fn evaluate(
        &self,
        source: &str,
        ctx: &mut GlobalContext,
    ) -> Result<HostValue, EvalFailure> {
        self.calls.set(self.calls.get() + 1);
        self.inner.evaluate(source, ctx)
    }

    fn name(&self) -> &str {
        "counting_evaluator"
    }
}

// ── Safe invocation ──────────────────────────────────────────────────

#[test]
fn test_can_call_true_on_success() {
    assert!(can_call(|| Ok(HostValue::Boolean(true))));
}

#[test]
fn test_can_call_true_even_for_falsy_results() {
    assert!(can_call(|| Ok(HostValue::Undefined)));
    assert!(can_call(|| Ok(HostValue::Boolean(false))));
}

#[test]
fn test_can_call_false_on_failure() {
    assert!(!can_call(|| Err(EvalFailure::TypeError("boom".to_string()))));
}

#[test]
fn test_truthy_call_returns_value_verbatim() {
    let result = truthy_call(|| Ok(HostValue::Number(HostNumber::Integer(7))));
    assert_eq!(result, HostValue::Number(HostNumber::Integer(7)));

    // Falsy success values pass through untouched.
    let result = truthy_call(|| Ok(HostValue::Undefined));
    assert_eq!(result, HostValue::Undefined);
}

#[test]
fn test_truthy_call_collapses_failure_to_false() {
    let result = truthy_call(|| Err(EvalFailure::ReferenceError("x".to_string())));
    assert_eq!(result, HostValue::Boolean(false));
}

// ── Gateway preconditions ────────────────────────────────────────────

#[test]
fn test_gateway_fails_without_evaluator() {
    let mut ctx = GlobalContext::new();
    register_core_globals(&mut ctx);
    let gateway = EvaluationGateway::new(ctx.shared());

    assert_eq!(
        gateway.can_evaluate("1 + 1"),
        Err(ConfigError::MissingEvaluator)
    );
    assert_eq!(
        gateway.truthy_evaluate("1 + 1"),
        Err(ConfigError::MissingEvaluator)
    );
}

#[test]
fn test_gateway_fails_without_object_primitive() {
    let mut ctx = GlobalContext::new();
    ctx.set_evaluator(Rc::new(ScriptEvaluator::full()));
    let gateway = EvaluationGateway::new(ctx.shared());

    assert_eq!(
        gateway.can_evaluate("1 + 1"),
        Err(ConfigError::MissingObjectPrimitive)
    );
}

#[test]
fn test_gateway_requires_object_primitive_to_be_callable() {
    let mut ctx = GlobalContext::new();
    ctx.set_evaluator(Rc::new(ScriptEvaluator::full()));
    ctx.define_binding("Object", HostValue::String("shadowed".to_string()));
    let gateway = EvaluationGateway::new(ctx.shared());

    assert_eq!(
        gateway.can_evaluate("1 + 1"),
        Err(ConfigError::MissingObjectPrimitive)
    );
}

#[test]
fn test_gateway_evaluates_when_preconditions_hold() {
    let mut ctx = GlobalContext::new();
    register_core_globals(&mut ctx);
    ctx.set_evaluator(Rc::new(ScriptEvaluator::full()));
    let gateway = EvaluationGateway::new(ctx.shared());

    assert_eq!(gateway.can_evaluate("1 + 1"), Ok(true));
    assert_eq!(gateway.can_evaluate("1 +"), Ok(false));
    assert_eq!(
        gateway.truthy_evaluate("2 + 3"),
        Ok(HostValue::Number(HostNumber::Integer(5)))
    );
}

// ── Memoization through the registry ─────────────────────────────────

#[test]
fn test_snippet_probe_evaluates_exactly_once() {
    let calls = Rc::new(Cell::new(0));
    let mut ctx = GlobalContext::new();
    register_core_globals(&mut ctx);
    ctx.set_evaluator(Rc::new(CountingEvaluator {
        calls: calls.clone(),
        inner: ScriptEvaluator::full(),
    }));

    let caps = CapabilityRegistry::build(ctx.shared());
    for _ in 0..4 {
        assert_eq!(caps.supports("supports_let_declarations"), Ok(true));
    }
    assert_eq!(calls.get(), 1);
}

// ── Global-function locator ──────────────────────────────────────────

#[test]
fn test_locator_returns_first_callable_candidate() {
    let mut ctx = GlobalContext::new();
    // A exists but is not callable; B and C are both callable.
    ctx.define_binding("A", HostValue::String("not callable".to_string()));
    ctx.define_binding("B", callable("B"));
    ctx.define_binding("C", callable("C"));

    let found = find_global_function(&ctx, &["A", "B", "C"]).unwrap();
    assert_eq!(found, "B");
}

#[test]
fn test_locator_exhaustion_is_fatal() {
    let ctx = GlobalContext::new();
    assert_eq!(
        find_global_function(&ctx, &["A", "B", "C"]),
        Err(ConfigError::NoGlobalFunction)
    );
}
