//! The reference script host: parse, check against the profile, execute.

use std::rc::Rc;

use crate::host::builtins::register_core_globals;
use crate::host::context::{GlobalContext, SharedGlobalContext};
use crate::host::error::EvalFailure;
use crate::host::evaluator::Evaluator;
use crate::host::profile::HostProfile;
use crate::host::value::HostValue;
use crate::parser::static_semantics::check_program;
use crate::parser::parse_to_ast;

use super::statement::execute_program;

/// An [`Evaluator`] backed by the probe-language interpreter.
pub struct ScriptEvaluator {
    profile: HostProfile,
}

impl ScriptEvaluator {
    pub fn new(profile: HostProfile) -> Self {
        ScriptEvaluator { profile }
    }

    pub fn full() -> Self {
        Self::new(HostProfile::full())
    }

    pub fn minimal() -> Self {
        Self::new(HostProfile::minimal())
    }

    pub fn profile(&self) -> &HostProfile {
        &self.profile
    }
}

impl Evaluator for ScriptEvaluator {
    fn evaluate(
        &self,
        source: &str,
        ctx: &mut GlobalContext,
    ) -> Result<HostValue, EvalFailure> {
        let ast =
            parse_to_ast(source).map_err(|e| EvalFailure::SyntaxError(e.to_string()))?;
        check_program(&ast, &self.profile)?;
        execute_program(&ast, ctx, &self.profile)
    }

    fn name(&self) -> &str {
        "script_host"
    }
}

/// A ready-to-probe context: core globals plus a script evaluator with
/// the given profile.
pub fn new_standard_context(profile: HostProfile) -> SharedGlobalContext {
    let mut ctx = GlobalContext::new();
    register_core_globals(&mut ctx);
    ctx.set_evaluator(Rc::new(ScriptEvaluator::new(profile)));
    ctx.shared()
}
