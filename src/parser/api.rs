use std::rc::Rc;

use pest::error::{Error, ErrorVariant};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

use super::ast::*;

#[derive(Parser)]
#[grammar = "parser/probe_grammar.pest"] // relative to src
pub struct ProbeParser;

impl ProbeParser {
    pub fn parse_to_ast_from_str(script: &str) -> Result<ProgramData, Error<Rule>> {
        parse_to_ast(script)
    }
}

pub fn parse_to_pairs(script: &str) -> Result<Pairs<Rule>, Error<Rule>> {
    ProbeParser::parse(Rule::program, script)
}

pub fn parse_to_ast(script: &str) -> Result<ProgramData, Error<Rule>> {
    let mut pairs = ProbeParser::parse(Rule::program, script)?;
    match pairs.next() {
        Some(program) => build_program(program),
        None => Ok(ProgramData { body: vec![] }),
    }
}

fn get_unexpected_error(tag: u32, pair: &Pair<Rule>) -> Error<Rule> {
    Error::new_from_span(
        ErrorVariant::CustomError {
            message: format!("unexpected rule {:?} ({})", pair.as_rule(), tag),
        },
        pair.as_span(),
    )
}

fn meta(pair: &Pair<Rule>) -> Meta {
    let span = pair.as_span();
    Meta {
        start_index: span.start(),
        end_index: span.end(),
    }
}

fn build_program(pair: Pair<Rule>) -> Result<ProgramData, Error<Rule>> {
    let mut body = vec![];
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::EOI => {}
            _ => body.push(build_statement(p)?),
        }
    }
    Ok(ProgramData { body })
}

fn build_statement(pair: Pair<Rule>) -> Result<StatementType, Error<Rule>> {
    let m = meta(&pair);
    let err_pair = pair.clone();
    match pair.as_rule() {
        Rule::empty_statement => Ok(StatementType::EmptyStatement { meta: m }),
        Rule::expression_statement => {
            let expr = pair
                .into_inner()
                .next()
                .ok_or_else(|| get_unexpected_error(1, &err_pair))?;
            Ok(StatementType::ExpressionStatement {
                meta: m,
                expression: build_expression(expr)?,
            })
        }
        Rule::declaration => {
            let mut inner = pair.into_inner();
            let kind_pair = inner
                .next()
                .ok_or_else(|| get_unexpected_error(2, &err_pair))?;
            let kind = match kind_pair.as_str() {
                "var" => DeclarationKind::Var,
                "let" => DeclarationKind::Let,
                "const" => DeclarationKind::Const,
                _ => return Err(get_unexpected_error(3, &kind_pair)),
            };
            let name_pair = inner
                .next()
                .ok_or_else(|| get_unexpected_error(4, &err_pair))?;
            let name = build_identifier(name_pair);
            let init = match inner.next() {
                Some(init_pair) => Some(build_expression(init_pair)?),
                None => None,
            };
            Ok(StatementType::DeclarationStatement {
                meta: m,
                kind,
                name,
                init,
            })
        }
        Rule::assignment => {
            let mut inner = pair.into_inner();
            let target_pair = inner
                .next()
                .ok_or_else(|| get_unexpected_error(5, &err_pair))?;
            let value_pair = inner
                .next()
                .ok_or_else(|| get_unexpected_error(6, &err_pair))?;
            Ok(StatementType::AssignmentStatement {
                meta: m,
                target: build_identifier(target_pair),
                value: build_expression(value_pair)?,
            })
        }
        _ => Err(get_unexpected_error(7, &err_pair)),
    }
}

fn build_expression(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    match pair.as_rule() {
        Rule::arrow_function => build_arrow_function(pair),
        Rule::logical_or => build_logical_or(pair),
        _ => Err(get_unexpected_error(8, &pair)),
    }
}

enum FoldOperator {
    Logical(LogicalOperator),
    Binary(BinaryOperator),
}

fn fold_operator(pair: &Pair<Rule>) -> Result<FoldOperator, Error<Rule>> {
    Ok(match pair.as_str() {
        "||" => FoldOperator::Logical(LogicalOperator::Or),
        "&&" => FoldOperator::Logical(LogicalOperator::And),
        "==" => FoldOperator::Binary(BinaryOperator::Equals),
        "!=" => FoldOperator::Binary(BinaryOperator::NotEquals),
        "<=" => FoldOperator::Binary(BinaryOperator::LessThanOrEqual),
        ">=" => FoldOperator::Binary(BinaryOperator::GreaterThanOrEqual),
        "<" => FoldOperator::Binary(BinaryOperator::LessThan),
        ">" => FoldOperator::Binary(BinaryOperator::GreaterThan),
        "+" => FoldOperator::Binary(BinaryOperator::Add),
        "-" => FoldOperator::Binary(BinaryOperator::Subtract),
        "*" => FoldOperator::Binary(BinaryOperator::Multiply),
        "/" => FoldOperator::Binary(BinaryOperator::Divide),
        "%" => FoldOperator::Binary(BinaryOperator::Modulo),
        _ => return Err(get_unexpected_error(9, pair)),
    })
}

/// Left-associative fold over one precedence layer.
fn fold_binary(
    pair: Pair<Rule>,
    build_operand: fn(Pair<Rule>) -> Result<ExpressionType, Error<Rule>>,
) -> Result<ExpressionType, Error<Rule>> {
    let err_pair = pair.clone();
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| get_unexpected_error(10, &err_pair))?;
    let mut expr = build_operand(first)?;
    while let Some(op_pair) = inner.next() {
        let operator = fold_operator(&op_pair)?;
        let rhs_pair = inner
            .next()
            .ok_or_else(|| get_unexpected_error(11, &op_pair))?;
        let right = Box::new(build_operand(rhs_pair)?);
        expr = match operator {
            FoldOperator::Logical(op) => ExpressionType::LogicalExpression {
                operator: op,
                left: Box::new(expr),
                right,
            },
            FoldOperator::Binary(op) => ExpressionType::BinaryExpression {
                operator: op,
                left: Box::new(expr),
                right,
            },
        };
    }
    Ok(expr)
}

fn build_logical_or(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    fold_binary(pair, build_logical_and)
}

fn build_logical_and(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    fold_binary(pair, build_equality)
}

fn build_equality(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    fold_binary(pair, build_comparison)
}

fn build_comparison(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    fold_binary(pair, build_additive)
}

fn build_additive(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    fold_binary(pair, build_multiplicative)
}

fn build_multiplicative(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    fold_binary(pair, build_unary)
}

fn build_unary(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let err_pair = pair.clone();
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| get_unexpected_error(12, &err_pair))?;
    match first.as_rule() {
        Rule::unary_op => {
            let operator = match first.as_str() {
                "-" => UnaryOperator::Minus,
                "!" => UnaryOperator::Not,
                _ => return Err(get_unexpected_error(13, &first)),
            };
            let argument_pair = inner
                .next()
                .ok_or_else(|| get_unexpected_error(14, &err_pair))?;
            Ok(ExpressionType::UnaryExpression {
                operator,
                argument: Box::new(build_unary(argument_pair)?),
            })
        }
        Rule::postfix => build_postfix(first),
        _ => Err(get_unexpected_error(15, &first)),
    }
}

fn build_postfix(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let err_pair = pair.clone();
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| get_unexpected_error(16, &err_pair))?;
    let mut expr = build_primary(first)?;
    for op in inner {
        expr = match op.as_rule() {
            Rule::member_access => {
                let err_op = op.clone();
                let property_pair = op
                    .into_inner()
                    .next()
                    .ok_or_else(|| get_unexpected_error(17, &err_op))?;
                ExpressionType::MemberExpression {
                    object: Box::new(expr),
                    property: build_identifier(property_pair),
                }
            }
            Rule::index_access => {
                let err_op = op.clone();
                let index_pair = op
                    .into_inner()
                    .next()
                    .ok_or_else(|| get_unexpected_error(18, &err_op))?;
                ExpressionType::IndexExpression {
                    object: Box::new(expr),
                    index: Box::new(build_expression(index_pair)?),
                }
            }
            Rule::call_args => {
                let (arguments, has_trailing_comma) = build_expression_list(op)?;
                ExpressionType::CallExpression {
                    callee: Box::new(expr),
                    arguments,
                    has_trailing_comma,
                }
            }
            _ => return Err(get_unexpected_error(19, &op)),
        };
    }
    Ok(expr)
}

/// Collect comma-separated expressions plus an explicit trailing-comma
/// marker (call arguments and array literals share the shape).
fn build_expression_list(pair: Pair<Rule>) -> Result<(Vec<ExpressionType>, bool), Error<Rule>> {
    let mut items = vec![];
    let mut has_trailing_comma = false;
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::trailing_comma => has_trailing_comma = true,
            _ => items.push(build_expression(p)?),
        }
    }
    Ok((items, has_trailing_comma))
}

fn build_primary(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let m = meta(&pair);
    match pair.as_rule() {
        Rule::null_literal => Ok(ExpressionType::Literal(LiteralData {
            meta: m,
            value: LiteralType::NullLiteral,
        })),
        Rule::boolean_literal => Ok(ExpressionType::Literal(LiteralData {
            meta: m,
            value: LiteralType::BooleanLiteral(pair.as_str() == "true"),
        })),
        Rule::integer_literal => {
            let text = pair.as_str();
            let value = match text.parse::<i64>() {
                Ok(i) => NumberLiteralType::IntegerLiteral(i),
                Err(_) => NumberLiteralType::FloatLiteral(
                    text.parse::<f64>()
                        .map_err(|_| get_unexpected_error(20, &pair))?,
                ),
            };
            Ok(ExpressionType::Literal(LiteralData {
                meta: m,
                value: LiteralType::NumberLiteral(value),
            }))
        }
        Rule::float_literal => {
            let value = pair
                .as_str()
                .parse::<f64>()
                .map_err(|_| get_unexpected_error(21, &pair))?;
            Ok(ExpressionType::Literal(LiteralData {
                meta: m,
                value: LiteralType::NumberLiteral(NumberLiteralType::FloatLiteral(value)),
            }))
        }
        Rule::string_literal => {
            let text = pair.as_str();
            let body = &text[1..text.len() - 1];
            Ok(ExpressionType::Literal(LiteralData {
                meta: m,
                value: LiteralType::StringLiteral(body.to_string()),
            }))
        }
        Rule::identifier => Ok(ExpressionType::Identifier(build_identifier(pair))),
        Rule::array_literal => {
            let (elements, has_trailing_comma) = build_expression_list(pair)?;
            Ok(ExpressionType::ArrayExpression {
                elements,
                has_trailing_comma,
            })
        }
        Rule::object_literal => build_object_literal(pair),
        Rule::paren_expr => {
            let err_pair = pair.clone();
            let inner = pair
                .into_inner()
                .next()
                .ok_or_else(|| get_unexpected_error(22, &err_pair))?;
            build_expression(inner)
        }
        _ => Err(get_unexpected_error(23, &pair)),
    }
}

fn build_object_literal(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let mut properties = vec![];
    let mut has_trailing_comma = false;
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::trailing_comma => has_trailing_comma = true,
            Rule::property => {
                let err_p = p.clone();
                let mut inner = p.into_inner();
                let key_pair = inner
                    .next()
                    .ok_or_else(|| get_unexpected_error(24, &err_p))?;
                let key = match key_pair.as_rule() {
                    Rule::identifier => key_pair.as_str().to_string(),
                    Rule::string_literal => {
                        let text = key_pair.as_str();
                        text[1..text.len() - 1].to_string()
                    }
                    _ => return Err(get_unexpected_error(25, &key_pair)),
                };
                let value_pair = inner
                    .next()
                    .ok_or_else(|| get_unexpected_error(26, &err_p))?;
                properties.push(PropertyData {
                    key,
                    value: build_expression(value_pair)?,
                });
            }
            _ => return Err(get_unexpected_error(27, &p)),
        }
    }
    Ok(ExpressionType::ObjectExpression {
        properties,
        has_trailing_comma,
    })
}

fn build_arrow_function(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let err_pair = pair.clone();
    let mut params = vec![];
    let mut body = None;
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::param_list => {
                for id in p.into_inner() {
                    params.push(id.as_str().to_string());
                }
            }
            _ => body = Some(build_expression(p)?),
        }
    }
    let body = body.ok_or_else(|| get_unexpected_error(28, &err_pair))?;
    Ok(ExpressionType::ArrowFunctionExpression(Rc::new(
        LambdaData { params, body },
    )))
}

fn build_identifier(pair: Pair<Rule>) -> IdentifierData {
    IdentifierData {
        meta: meta(&pair),
        name: pair.as_str().to_string(),
    }
}
