//! Tests for the reference script host: interpreter semantics and
//! profile gating.

extern crate autoprobe;

use autoprobe::host::builtins::register_core_globals;
use autoprobe::host::context::GlobalContext;
use autoprobe::host::error::EvalFailure;
use autoprobe::host::evaluator::Evaluator;
use autoprobe::host::profile::HostProfile;
use autoprobe::host::value::{HostNumber, HostValue};
use autoprobe::interp::script_host::ScriptEvaluator;

/// Helper to evaluate code against a fresh context with core globals.
fn eval_with(profile: HostProfile, source: &str) -> Result<HostValue, EvalFailure> {
    let mut ctx = GlobalContext::new();
    register_core_globals(&mut ctx);
    ScriptEvaluator::new(profile).evaluate(source, &mut ctx)
}

fn eval(source: &str) -> Result<HostValue, EvalFailure> {
    eval_with(HostProfile::full(), source)
}

fn int(i: i64) -> HostValue {
    HostValue::Number(HostNumber::Integer(i))
}

// ── Expressions ──────────────────────────────────────────────────────

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(eval("1 + 2 * 3").unwrap(), int(7));
    assert_eq!(eval("(1 + 2) * 3").unwrap(), int(9));
}

#[test]
fn test_division_always_yields_float() {
    assert_eq!(
        eval("10 / 4").unwrap(),
        HostValue::Number(HostNumber::Float(2.5))
    );
    assert_eq!(
        eval("4 / 2").unwrap(),
        HostValue::Number(HostNumber::Float(2.0))
    );
}

#[test]
fn test_division_by_zero() {
    assert_eq!(
        eval("1 / 0").unwrap(),
        HostValue::Number(HostNumber::PositiveInfinity)
    );
    assert_eq!(
        eval("-1 / 0").unwrap(),
        HostValue::Number(HostNumber::NegativeInfinity)
    );
    assert_eq!(eval("0 / 0").unwrap(), HostValue::Number(HostNumber::NaN));
}

#[test]
fn test_nan_never_equals_itself() {
    assert_eq!(eval("0 / 0 == 0 / 0").unwrap(), HostValue::Boolean(false));
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        eval("'foo' + 'bar'").unwrap(),
        HostValue::String("foobar".to_string())
    );
}

#[test]
fn test_mixed_addition_is_a_type_error() {
    assert!(matches!(
        eval("'a' + 1"),
        Err(EvalFailure::TypeError(_))
    ));
}

#[test]
fn test_comparisons() {
    assert_eq!(eval("2 < 3").unwrap(), HostValue::Boolean(true));
    assert_eq!(eval("2 >= 3").unwrap(), HostValue::Boolean(false));
    assert_eq!(eval("'a' < 'b'").unwrap(), HostValue::Boolean(true));
    assert_eq!(eval("1 == 1.0").unwrap(), HostValue::Boolean(true));
    assert_eq!(eval("null == null").unwrap(), HostValue::Boolean(true));
}

#[test]
fn test_logical_operators_return_operand_values() {
    assert_eq!(eval("0 || 5").unwrap(), int(5));
    assert_eq!(eval("0 && 5").unwrap(), int(0));
    assert_eq!(eval("1 && 5").unwrap(), int(5));
}

#[test]
fn test_unary_operators() {
    assert_eq!(eval("-5").unwrap(), int(-5));
    assert_eq!(eval("!0").unwrap(), HostValue::Boolean(true));
    assert_eq!(eval("!'text'").unwrap(), HostValue::Boolean(false));
}

#[test]
fn test_array_literals_and_indexing() {
    assert_eq!(eval("[1, 2, 3][1]").unwrap(), int(2));
    assert_eq!(eval("[1, 2, 3].length").unwrap(), int(3));
    assert_eq!(eval("[1][9]").unwrap(), HostValue::Undefined);
}

#[test]
fn test_object_literals_and_member_access() {
    assert_eq!(eval("{a: 1, b: 2}.b").unwrap(), int(2));
    assert_eq!(eval("{a: 1}.missing").unwrap(), HostValue::Undefined);
    assert_eq!(eval("{'quoted key': 7}['quoted key']").unwrap(), int(7));
}

#[test]
fn test_member_access_on_primitive_is_a_type_error() {
    assert!(matches!(eval("1 .a"), Err(EvalFailure::TypeError(_))));
}

#[test]
fn test_string_length() {
    assert_eq!(eval("'abc'.length").unwrap(), int(3));
}

// ── Statements ───────────────────────────────────────────────────────

#[test]
fn test_var_declaration_and_use() {
    assert_eq!(eval("var x = 2; x + 3").unwrap(), int(5));
    assert_eq!(eval("var x; x").unwrap(), HostValue::Undefined);
}

#[test]
fn test_assignment_updates_local_binding() {
    assert_eq!(eval("var x = 1; x = 4; x").unwrap(), int(4));
}

#[test]
fn test_program_value_is_last_expression() {
    assert_eq!(eval("1; 2; 3").unwrap(), int(3));
    assert_eq!(eval("").unwrap(), HostValue::Undefined);
    assert_eq!(eval(";;").unwrap(), HostValue::Undefined);
}

#[test]
fn test_undeclared_assignment_is_a_reference_error() {
    assert!(matches!(
        eval("x = 1;"),
        Err(EvalFailure::ReferenceError(_))
    ));
}

#[test]
fn test_unknown_identifier_is_a_reference_error() {
    assert!(matches!(eval("nope"), Err(EvalFailure::ReferenceError(_))));
}

#[test]
fn test_syntax_error_reported() {
    assert!(matches!(eval("1 +"), Err(EvalFailure::SyntaxError(_))));
}

// ── Globals and probe hygiene ────────────────────────────────────────

#[test]
fn test_core_globals_are_callable() {
    assert_eq!(eval("abs(-5)").unwrap(), int(5));
    assert_eq!(eval("floor(2.9)").unwrap(), int(2));
    assert_eq!(eval("isFinite(1)").unwrap(), HostValue::Boolean(true));
    assert_eq!(eval("isFinite(1 / 0)").unwrap(), HostValue::Boolean(false));
    assert_eq!(eval("isNaN(0 / 0)").unwrap(), HostValue::Boolean(true));
}

#[test]
fn test_snippets_never_create_global_bindings() {
    let mut ctx = GlobalContext::new();
    register_core_globals(&mut ctx);
    let host = ScriptEvaluator::full();

    host.evaluate("var leaked = 1;", &mut ctx).unwrap();
    assert!(!ctx.has_binding("leaked"));
}

#[test]
fn test_snippets_cannot_mutate_host_globals() {
    assert!(matches!(
        eval("Array = 1;"),
        Err(EvalFailure::TypeError(_))
    ));
}

// ── Profile gating ───────────────────────────────────────────────────

#[test]
fn test_let_gated_by_profile() {
    assert_eq!(eval("let x = 1; x").unwrap(), int(1));
    assert!(matches!(
        eval_with(HostProfile::minimal(), "let x = 1; x"),
        Err(EvalFailure::UnsupportedConstruct(_))
    ));
}

#[test]
fn test_const_gated_by_profile() {
    assert_eq!(eval("const x = 1; x").unwrap(), int(1));
    assert!(matches!(
        eval_with(HostProfile::minimal(), "const x = 1; x"),
        Err(EvalFailure::UnsupportedConstruct(_))
    ));
}

#[test]
fn test_const_assignment_enforced_unless_quirky() {
    assert!(matches!(
        eval("const x = 0; x = 1;"),
        Err(EvalFailure::TypeError(_))
    ));

    let mut quirky = HostProfile::full();
    quirky.const_assignment = true;
    assert_eq!(
        eval_with(quirky, "const x = 0; x = 1; x").unwrap(),
        int(1)
    );
}

#[test]
fn test_trailing_commas_gated_by_profile() {
    assert_eq!(eval("[1, 2,].length").unwrap(), int(2));
    assert!(matches!(
        eval_with(HostProfile::minimal(), "[1, 2,]"),
        Err(EvalFailure::UnsupportedConstruct(_))
    ));
    assert!(matches!(
        eval_with(HostProfile::minimal(), "{x: 1,}"),
        Err(EvalFailure::UnsupportedConstruct(_))
    ));
}

#[test]
fn test_arrow_functions_gated_by_profile() {
    assert_eq!(eval("((x) => x + 1)(2)").unwrap(), int(3));
    assert_eq!(eval("((x) => x)()").unwrap(), HostValue::Undefined);
    assert!(matches!(
        eval_with(HostProfile::minimal(), "(x) => x"),
        Err(EvalFailure::UnsupportedConstruct(_))
    ));
}

#[test]
fn test_string_indexing_gated_by_profile() {
    assert_eq!(
        eval("'abc'[1]").unwrap(),
        HostValue::String("b".to_string())
    );
    assert_eq!(eval("'abc'[9]").unwrap(), HostValue::Undefined);
    assert!(matches!(
        eval_with(HostProfile::minimal(), "'abc'[1]"),
        Err(EvalFailure::UnsupportedConstruct(_))
    ));
}
