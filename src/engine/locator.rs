//! Locating *some* known global callable.
//!
//! A few probes need a concrete global name to test scoping semantics
//! indirectly - any well-known callable will do. The candidate list is
//! fixed, ordered, read-only data; exhausting it means the host is too
//! minimal for such probes to be expressible at all, which is a fatal
//! configuration error, not a `false` probe outcome.

use crate::engine::error::ConfigError;
use crate::host::context::GlobalContext;

/// Well-known global identifiers, scanned in order.
pub const GLOBAL_FUNCTION_CANDIDATES: &[&str] = &[
    "Array", "String", "Object", "Boolean", "isFinite", "isNaN", "abs", "floor",
];

/// Return the first candidate currently bound to a callable value.
pub fn find_global_function(
    ctx: &GlobalContext,
    candidates: &[&str],
) -> Result<String, ConfigError> {
    for name in candidates {
        if let Some(value) = ctx.get_binding(name) {
            if value.is_callable() {
                return Ok((*name).to_string());
            }
        }
    }
    Err(ConfigError::NoGlobalFunction)
}
