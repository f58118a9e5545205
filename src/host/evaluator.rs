//! The dynamic-evaluation seam.
//!
//! Dynamic source-text evaluation is a *capability interface*: hosts that
//! can compile and run text implement [`Evaluator`]; hosts that cannot
//! supply [`NullEvaluator`], which is present and callable but fails every
//! call. That keeps the gateway precondition satisfied while snippet
//! probes degrade to `false` - closure probes are unaffected.

use crate::host::context::GlobalContext;
use crate::host::error::EvalFailure;
use crate::host::value::HostValue;

pub trait Evaluator {
    /// Compile and run `source`, returning the program's value.
    fn evaluate(
        &self,
        source: &str,
        ctx: &mut GlobalContext,
    ) -> Result<HostValue, EvalFailure>;

    fn name(&self) -> &str;
}

/// Evaluator for hosts without runtime evaluation. Always fails.
pub struct NullEvaluator;

impl Evaluator for NullEvaluator {
    fn evaluate(
        &self,
        _source: &str,
        _ctx: &mut GlobalContext,
    ) -> Result<HostValue, EvalFailure> {
        Err(EvalFailure::EvaluationUnavailable(
            "this host cannot evaluate source text".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "null_evaluator"
    }
}
