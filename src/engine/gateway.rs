//! The controlled gateway to dynamic source-text evaluation.
//!
//! Probes must reach the evaluation primitive as late as possible and
//! only through this gateway: preconditions are re-checked immediately
//! before every use, so a host that lacks the primitive fails with one
//! clear diagnostic instead of scattered lookup failures inside
//! individual probes. This is the one place in the engine allowed to
//! raise - a failed precondition signals an unusable host, not a missing
//! optional feature.

use std::rc::Rc;

use crate::engine::error::ConfigError;
use crate::engine::invoke::{can_call, truthy_call};
use crate::host::context::{SharedGlobalContext, OBJECT_PRIMITIVE};
use crate::host::error::EvalFailure;
use crate::host::evaluator::Evaluator;
use crate::host::value::HostValue;

pub struct EvaluationGateway {
    ctx: SharedGlobalContext,
}

impl EvaluationGateway {
    pub fn new(ctx: SharedGlobalContext) -> Self {
        EvaluationGateway { ctx }
    }

    pub fn context(&self) -> &SharedGlobalContext {
        &self.ctx
    }

    /// Verify the host can support snippet evaluation at all: a callable
    /// evaluation primitive and a callable baseline object primitive.
    pub fn check_preconditions(&self) -> Result<(), ConfigError> {
        let ctx = self.ctx.borrow();
        if ctx.evaluator().is_none() {
            return Err(ConfigError::MissingEvaluator);
        }
        match ctx.get_binding(OBJECT_PRIMITIVE) {
            Some(ref v) if v.is_callable() => Ok(()),
            _ => Err(ConfigError::MissingObjectPrimitive),
        }
    }

    /// `true` if the snippet evaluates without failure.
    pub fn can_evaluate(&self, source: &str) -> Result<bool, ConfigError> {
        self.check_preconditions()?;
        Ok(can_call(|| self.evaluate(source)))
    }

    /// The snippet's value, or `Boolean(false)` if evaluation fails.
    pub fn truthy_evaluate(&self, source: &str) -> Result<HostValue, ConfigError> {
        self.check_preconditions()?;
        Ok(truthy_call(|| self.evaluate(source)))
    }

    fn evaluate(&self, source: &str) -> Result<HostValue, EvalFailure> {
        let evaluator: Rc<dyn Evaluator> = match self.ctx.borrow().evaluator() {
            Some(e) => e,
            None => {
                return Err(EvalFailure::EvaluationUnavailable(
                    "evaluator disappeared between precondition check and use".to_string(),
                ));
            }
        };
        let mut ctx = self.ctx.borrow_mut();
        evaluator.evaluate(source, &mut ctx)
    }
}
