use std::fmt;
use std::fmt::{Display, Formatter};

/// Failure raised while evaluating probe code against a host.
///
/// Every variant belongs to the *expected* failure class: a probe that
/// trips one of these is reporting an unsupported behavior, not breaking
/// the engine. The safe-invocation layer collapses all of them to `false`.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalFailure {
    SyntaxError(String),
    ReferenceError(String),
    TypeError(String),
    RangeError(String),
    /// The active host profile does not enable this construct.
    UnsupportedConstruct(String),
    /// The host has an evaluator slot but it cannot evaluate anything.
    EvaluationUnavailable(String),
}

impl Display for EvalFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EvalFailure::SyntaxError(m) => write!(f, "syntax error: {}", m),
            EvalFailure::ReferenceError(m) => write!(f, "reference error: {}", m),
            EvalFailure::TypeError(m) => write!(f, "type error: {}", m),
            EvalFailure::RangeError(m) => write!(f, "range error: {}", m),
            EvalFailure::UnsupportedConstruct(m) => {
                write!(f, "unsupported construct: {}", m)
            }
            EvalFailure::EvaluationUnavailable(m) => {
                write!(f, "evaluation unavailable: {}", m)
            }
        }
    }
}

impl std::error::Error for EvalFailure {}
