//! Statement execution for the reference probe language.

use crate::host::context::GlobalContext;
use crate::host::error::EvalFailure;
use crate::host::profile::HostProfile;
use crate::host::value::HostValue;
use crate::parser::ast::{DeclarationKind, ProgramData, StatementType};

use super::expression::evaluate_expression;
use super::scope::{EvalScope, ValueResult};

/// Execute one statement. Expression statements yield a value; everything
/// else yields `None`.
pub fn execute_statement(
    stmt: &StatementType,
    scope: &mut EvalScope,
    ctx: &mut GlobalContext,
    profile: &HostProfile,
) -> Result<Option<HostValue>, EvalFailure> {
    match stmt {
        StatementType::EmptyStatement { .. } => Ok(None),

        StatementType::ExpressionStatement { expression, .. } => {
            Ok(Some(evaluate_expression(expression, scope, ctx, profile)?))
        }

        StatementType::DeclarationStatement {
            kind, name, init, ..
        } => {
            let value = match init {
                Some(expr) => evaluate_expression(expr, scope, ctx, profile)?,
                None => HostValue::Undefined,
            };
            scope.declare(name.name.clone(), *kind, value);
            Ok(None)
        }

        StatementType::AssignmentStatement { target, value, .. } => {
            let value = evaluate_expression(value, scope, ctx, profile)?;
            match scope.kind_of(&target.name) {
                Some(DeclarationKind::Const) if !profile.const_assignment => {
                    Err(EvalFailure::TypeError(format!(
                        "assignment to constant variable {}",
                        target.name
                    )))
                }
                Some(_) => {
                    scope.set(&target.name, value);
                    Ok(None)
                }
                None if ctx.has_binding(&target.name) => {
                    // Probes must never mutate the host's globals.
                    Err(EvalFailure::TypeError(format!(
                        "cannot assign to host global {}",
                        target.name
                    )))
                }
                None => Err(EvalFailure::ReferenceError(format!(
                    "{} is not defined",
                    target.name
                ))),
            }
        }
    }
}

/// Run a whole program in a fresh scope. The program's value is the value
/// of its last expression statement, or `undefined`.
pub fn execute_program(
    program: &ProgramData,
    ctx: &mut GlobalContext,
    profile: &HostProfile,
) -> ValueResult {
    let mut scope = EvalScope::new();
    let mut last = HostValue::Undefined;
    for stmt in &program.body {
        if let Some(value) = execute_statement(stmt, &mut scope, ctx, profile)? {
            last = value;
        }
    }
    Ok(last)
}
