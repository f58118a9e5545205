//! Tree-walking interpreter for the reference probe language.
//!
//! This is the concrete host the engine's snippet probes run against in
//! tests and the CLI. It is deliberately small: expression statements,
//! `var`/`let`/`const`, and a literal vocabulary rich enough to express
//! the default probe catalog.

pub mod expression;
pub mod scope;
pub mod script_host;
pub mod statement;

pub use scope::{EvalScope, ValueResult};
pub use script_host::{new_standard_context, ScriptEvaluator};
