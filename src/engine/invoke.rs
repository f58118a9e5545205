//! Safe invocation: the single choke point that converts probe failures
//! into plain `false` results. Nothing here logs or rethrows - an
//! operation that fails is reporting an unsupported behavior.

use crate::host::error::EvalFailure;
use crate::host::value::HostValue;

/// Run `op`; `true` if it completes, `false` if it fails.
pub fn can_call<F>(op: F) -> bool
where
    F: FnOnce() -> Result<HostValue, EvalFailure>,
{
    op().is_ok()
}

/// Run `op`; its value on success, `Boolean(false)` on failure.
pub fn truthy_call<F>(op: F) -> HostValue
where
    F: FnOnce() -> Result<HostValue, EvalFailure>,
{
    match op() {
        Ok(value) => value,
        Err(_) => HostValue::Boolean(false),
    }
}
