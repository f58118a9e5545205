//! Pre-execution checks: reject constructs the active host profile does
//! not enable. Rejection uses the same failure class as any other probe
//! failure, so a disabled construct is indistinguishable from an
//! unparseable one.

use crate::host::error::EvalFailure;
use crate::host::profile::HostProfile;

use super::ast::{
    DeclarationKind, ExpressionType, ProgramData, StatementType,
};

pub(crate) fn check_program(
    program: &ProgramData,
    profile: &HostProfile,
) -> Result<(), EvalFailure> {
    for statement in &program.body {
        check_statement(statement, profile)?;
    }
    Ok(())
}

fn check_statement(
    statement: &StatementType,
    profile: &HostProfile,
) -> Result<(), EvalFailure> {
    match statement {
        StatementType::EmptyStatement { .. } => Ok(()),
        StatementType::ExpressionStatement { expression, .. } => {
            check_expression(expression, profile)
        }
        StatementType::DeclarationStatement { kind, init, .. } => {
            match kind {
                DeclarationKind::Let if !profile.let_declarations => {
                    return Err(unsupported("let declaration"));
                }
                DeclarationKind::Const if !profile.const_declarations => {
                    return Err(unsupported("const declaration"));
                }
                _ => {}
            }
            if let Some(init) = init {
                check_expression(init, profile)?;
            }
            Ok(())
        }
        StatementType::AssignmentStatement { value, .. } => {
            check_expression(value, profile)
        }
    }
}

fn check_expression(
    expression: &ExpressionType,
    profile: &HostProfile,
) -> Result<(), EvalFailure> {
    match expression {
        ExpressionType::Literal(_) | ExpressionType::Identifier(_) => Ok(()),
        ExpressionType::ArrayExpression {
            elements,
            has_trailing_comma,
        } => {
            if *has_trailing_comma && !profile.trailing_commas {
                return Err(unsupported("trailing comma in array literal"));
            }
            for element in elements {
                check_expression(element, profile)?;
            }
            Ok(())
        }
        ExpressionType::ObjectExpression {
            properties,
            has_trailing_comma,
        } => {
            if *has_trailing_comma && !profile.trailing_commas {
                return Err(unsupported("trailing comma in object literal"));
            }
            for property in properties {
                check_expression(&property.value, profile)?;
            }
            Ok(())
        }
        ExpressionType::UnaryExpression { argument, .. } => {
            check_expression(argument, profile)
        }
        ExpressionType::BinaryExpression { left, right, .. }
        | ExpressionType::LogicalExpression { left, right, .. } => {
            check_expression(left, profile)?;
            check_expression(right, profile)
        }
        ExpressionType::MemberExpression { object, .. } => {
            check_expression(object, profile)
        }
        ExpressionType::IndexExpression { object, index } => {
            check_expression(object, profile)?;
            check_expression(index, profile)
        }
        ExpressionType::CallExpression {
            callee,
            arguments,
            has_trailing_comma,
        } => {
            if *has_trailing_comma && !profile.trailing_commas {
                return Err(unsupported("trailing comma in call arguments"));
            }
            check_expression(callee, profile)?;
            for argument in arguments {
                check_expression(argument, profile)?;
            }
            Ok(())
        }
        ExpressionType::ArrowFunctionExpression(lambda) => {
            if !profile.arrow_functions {
                return Err(unsupported("arrow function"));
            }
            check_expression(&lambda.body, profile)
        }
    }
}

fn unsupported(construct: &str) -> EvalFailure {
    EvalFailure::UnsupportedConstruct(construct.to_string())
}
