//! Expression evaluation for the reference probe language.

use crate::host::builtins::make_array;
use crate::host::context::GlobalContext;
use crate::host::error::EvalFailure;
use crate::host::object::new_object_ref;
use crate::host::profile::HostProfile;
use crate::host::value::{HostNumber, HostValue};
use crate::parser::ast::{
    BinaryOperator, DeclarationKind, ExpressionType, LambdaData, LiteralData, LiteralType,
    LogicalOperator, NumberLiteralType, UnaryOperator,
};

use super::scope::{EvalScope, ValueResult};

/// Evaluate an expression and return its value.
pub fn evaluate_expression(
    expr: &ExpressionType,
    scope: &mut EvalScope,
    ctx: &mut GlobalContext,
    profile: &HostProfile,
) -> ValueResult {
    match expr {
        ExpressionType::Literal(lit) => Ok(evaluate_literal(lit)),

        ExpressionType::Identifier(ident) => {
            if let Some(value) = scope.get(&ident.name) {
                return Ok(value);
            }
            match ctx.get_binding(&ident.name) {
                Some(value) => Ok(value),
                None => Err(EvalFailure::ReferenceError(format!(
                    "{} is not defined",
                    ident.name
                ))),
            }
        }

        ExpressionType::ArrayExpression { elements, .. } => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(evaluate_expression(element, scope, ctx, profile)?);
            }
            Ok(make_array(values))
        }

        ExpressionType::ObjectExpression { properties, .. } => {
            let object = new_object_ref(None);
            for property in properties {
                let value = evaluate_expression(&property.value, scope, ctx, profile)?;
                object.borrow_mut().set(property.key.clone(), value);
            }
            Ok(HostValue::Object(object))
        }

        ExpressionType::UnaryExpression { operator, argument } => {
            let value = evaluate_expression(argument, scope, ctx, profile)?;
            evaluate_unary(*operator, value)
        }

        ExpressionType::BinaryExpression {
            operator,
            left,
            right,
        } => {
            let lhs = evaluate_expression(left, scope, ctx, profile)?;
            let rhs = evaluate_expression(right, scope, ctx, profile)?;
            evaluate_binary(*operator, lhs, rhs)
        }

        ExpressionType::LogicalExpression {
            operator,
            left,
            right,
        } => {
            let lhs = evaluate_expression(left, scope, ctx, profile)?;
            match operator {
                LogicalOperator::And => {
                    if lhs.is_truthy() {
                        evaluate_expression(right, scope, ctx, profile)
                    } else {
                        Ok(lhs)
                    }
                }
                LogicalOperator::Or => {
                    if lhs.is_truthy() {
                        Ok(lhs)
                    } else {
                        evaluate_expression(right, scope, ctx, profile)
                    }
                }
            }
        }

        ExpressionType::MemberExpression { object, property } => {
            let target = evaluate_expression(object, scope, ctx, profile)?;
            evaluate_member(target, &property.name)
        }

        ExpressionType::IndexExpression { object, index } => {
            let target = evaluate_expression(object, scope, ctx, profile)?;
            let key = evaluate_expression(index, scope, ctx, profile)?;
            evaluate_index(target, key, profile)
        }

        ExpressionType::CallExpression {
            callee, arguments, ..
        } => {
            let target = evaluate_expression(callee, scope, ctx, profile)?;
            let mut args = Vec::with_capacity(arguments.len());
            for argument in arguments {
                args.push(evaluate_expression(argument, scope, ctx, profile)?);
            }
            match target {
                HostValue::Function(nf) => nf.call(ctx, args),
                HostValue::Lambda(lambda) => call_lambda(&lambda, args, ctx, profile),
                other => Err(EvalFailure::TypeError(format!(
                    "{:?} is not a function",
                    other
                ))),
            }
        }

        ExpressionType::ArrowFunctionExpression(lambda) => {
            Ok(HostValue::Lambda(lambda.clone()))
        }
    }
}

fn evaluate_literal(lit: &LiteralData) -> HostValue {
    match &lit.value {
        LiteralType::NullLiteral => HostValue::Null,
        LiteralType::BooleanLiteral(b) => HostValue::Boolean(*b),
        LiteralType::StringLiteral(s) => HostValue::String(s.clone()),
        LiteralType::NumberLiteral(n) => match n {
            NumberLiteralType::IntegerLiteral(i) => {
                HostValue::Number(HostNumber::Integer(*i))
            }
            NumberLiteralType::FloatLiteral(f) => {
                HostValue::Number(HostNumber::from_f64(*f))
            }
        },
    }
}

/// Call an arrow function. The body runs in a fresh scope holding only
/// the parameters; free identifiers resolve against the global context.
pub fn call_lambda(
    lambda: &LambdaData,
    args: Vec<HostValue>,
    ctx: &mut GlobalContext,
    profile: &HostProfile,
) -> ValueResult {
    let mut scope = EvalScope::new();
    for (i, param) in lambda.params.iter().enumerate() {
        let value = args.get(i).cloned().unwrap_or(HostValue::Undefined);
        scope.declare(param.clone(), DeclarationKind::Var, value);
    }
    evaluate_expression(&lambda.body, &mut scope, ctx, profile)
}

fn evaluate_unary(operator: UnaryOperator, value: HostValue) -> ValueResult {
    match operator {
        UnaryOperator::Not => Ok(HostValue::Boolean(!value.is_truthy())),
        UnaryOperator::Minus => match value {
            HostValue::Number(HostNumber::Integer(i)) => {
                Ok(HostValue::Number(HostNumber::Integer(i.wrapping_neg())))
            }
            HostValue::Number(n) => {
                Ok(HostValue::Number(HostNumber::from_f64(-n.as_f64())))
            }
            other => Err(EvalFailure::TypeError(format!(
                "cannot negate {:?}",
                other
            ))),
        },
    }
}

fn evaluate_binary(operator: BinaryOperator, lhs: HostValue, rhs: HostValue) -> ValueResult {
    match operator {
        BinaryOperator::Add => match (&lhs, &rhs) {
            (HostValue::String(a), HostValue::String(b)) => {
                Ok(HostValue::String(format!("{}{}", a, b)))
            }
            (HostValue::Number(a), HostValue::Number(b)) => Ok(HostValue::Number(add(a, b))),
            _ => Err(type_mismatch("+", &lhs, &rhs)),
        },
        BinaryOperator::Subtract => numeric_op(&lhs, &rhs, "-", |a, b| match (a, b) {
            (HostNumber::Integer(x), HostNumber::Integer(y)) => match x.checked_sub(*y) {
                Some(r) => HostNumber::Integer(r),
                None => HostNumber::from_f64(*x as f64 - *y as f64),
            },
            _ => HostNumber::from_f64(a.as_f64() - b.as_f64()),
        }),
        BinaryOperator::Multiply => numeric_op(&lhs, &rhs, "*", |a, b| match (a, b) {
            (HostNumber::Integer(x), HostNumber::Integer(y)) => match x.checked_mul(*y) {
                Some(r) => HostNumber::Integer(r),
                None => HostNumber::from_f64(*x as f64 * *y as f64),
            },
            _ => HostNumber::from_f64(a.as_f64() * b.as_f64()),
        }),
        BinaryOperator::Divide => {
            numeric_op(&lhs, &rhs, "/", |a, b| HostNumber::from_f64(a.as_f64() / b.as_f64()))
        }
        BinaryOperator::Modulo => {
            numeric_op(&lhs, &rhs, "%", |a, b| HostNumber::from_f64(a.as_f64() % b.as_f64()))
        }
        BinaryOperator::Equals => Ok(HostValue::Boolean(loose_equals(&lhs, &rhs))),
        BinaryOperator::NotEquals => Ok(HostValue::Boolean(!loose_equals(&lhs, &rhs))),
        BinaryOperator::LessThan => compare(&lhs, &rhs, "<", |o| o == std::cmp::Ordering::Less),
        BinaryOperator::GreaterThan => {
            compare(&lhs, &rhs, ">", |o| o == std::cmp::Ordering::Greater)
        }
        BinaryOperator::LessThanOrEqual => {
            compare(&lhs, &rhs, "<=", |o| o != std::cmp::Ordering::Greater)
        }
        BinaryOperator::GreaterThanOrEqual => {
            compare(&lhs, &rhs, ">=", |o| o != std::cmp::Ordering::Less)
        }
    }
}

fn add(a: &HostNumber, b: &HostNumber) -> HostNumber {
    match (a, b) {
        (HostNumber::Integer(x), HostNumber::Integer(y)) => match x.checked_add(*y) {
            Some(r) => HostNumber::Integer(r),
            None => HostNumber::from_f64(*x as f64 + *y as f64),
        },
        _ => HostNumber::from_f64(a.as_f64() + b.as_f64()),
    }
}

fn numeric_op(
    lhs: &HostValue,
    rhs: &HostValue,
    symbol: &str,
    op: impl Fn(&HostNumber, &HostNumber) -> HostNumber,
) -> ValueResult {
    match (lhs, rhs) {
        (HostValue::Number(a), HostValue::Number(b)) => Ok(HostValue::Number(op(a, b))),
        _ => Err(type_mismatch(symbol, lhs, rhs)),
    }
}

fn compare(
    lhs: &HostValue,
    rhs: &HostValue,
    symbol: &str,
    accept: impl Fn(std::cmp::Ordering) -> bool,
) -> ValueResult {
    match (lhs, rhs) {
        (HostValue::Number(a), HostValue::Number(b)) => {
            // NaN compares false against everything.
            Ok(HostValue::Boolean(
                a.as_f64()
                    .partial_cmp(&b.as_f64())
                    .map(&accept)
                    .unwrap_or(false),
            ))
        }
        (HostValue::String(a), HostValue::String(b)) => {
            Ok(HostValue::Boolean(accept(a.cmp(b))))
        }
        _ => Err(type_mismatch(symbol, lhs, rhs)),
    }
}

/// Equality under the host's loose rules: numeric across integer/float,
/// `null == undefined`, reference identity for objects and lambdas.
pub fn loose_equals(lhs: &HostValue, rhs: &HostValue) -> bool {
    match (lhs, rhs) {
        (HostValue::Number(a), HostValue::Number(b)) => a.as_f64() == b.as_f64(),
        (HostValue::Null, HostValue::Undefined) | (HostValue::Undefined, HostValue::Null) => true,
        _ => lhs == rhs,
    }
}

fn evaluate_member(target: HostValue, property: &str) -> ValueResult {
    match target {
        HostValue::Object(object) => {
            Ok(object.borrow().get(property).unwrap_or(HostValue::Undefined))
        }
        HostValue::String(s) => {
            if property == "length" {
                Ok(HostValue::Number(HostNumber::Integer(s.chars().count() as i64)))
            } else {
                Ok(HostValue::Undefined)
            }
        }
        other => Err(EvalFailure::TypeError(format!(
            "cannot read property {} of {:?}",
            property, other
        ))),
    }
}

fn evaluate_index(target: HostValue, key: HostValue, profile: &HostProfile) -> ValueResult {
    match target {
        HostValue::Object(object) => {
            let key = index_key(&key)?;
            Ok(object.borrow().get(&key).unwrap_or(HostValue::Undefined))
        }
        HostValue::String(s) => {
            if !profile.string_indexing {
                return Err(EvalFailure::UnsupportedConstruct(
                    "string indexing".to_string(),
                ));
            }
            match key {
                HostValue::Number(HostNumber::Integer(i)) if i >= 0 => Ok(s
                    .chars()
                    .nth(i as usize)
                    .map(|c| HostValue::String(c.to_string()))
                    .unwrap_or(HostValue::Undefined)),
                HostValue::Number(_) => Ok(HostValue::Undefined),
                other => Err(EvalFailure::TypeError(format!(
                    "invalid string index {:?}",
                    other
                ))),
            }
        }
        other => Err(EvalFailure::TypeError(format!(
            "cannot index {:?}",
            other
        ))),
    }
}

fn index_key(key: &HostValue) -> Result<String, EvalFailure> {
    match key {
        HostValue::Number(HostNumber::Integer(i)) => Ok(i.to_string()),
        HostValue::Number(n) => Ok(n.to_string()),
        HostValue::String(s) => Ok(s.to_string()),
        other => Err(EvalFailure::TypeError(format!(
            "invalid index {:?}",
            other
        ))),
    }
}

fn type_mismatch(symbol: &str, lhs: &HostValue, rhs: &HostValue) -> EvalFailure {
    EvalFailure::TypeError(format!(
        "operator {} not defined for {:?} and {:?}",
        symbol, lhs, rhs
    ))
}
