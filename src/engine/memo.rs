//! Probe memoization.
//!
//! Feature support is invariant for the lifetime of the process, so a
//! probe body runs at most once. After the first call the thunk is
//! dropped - releasing anything it closed over - and the stored result is
//! returned forever after, even if the host context changes later.

use std::cell::RefCell;

use crate::engine::error::ConfigError;
use crate::host::value::HostValue;

/// What a capability check yields: a host value (usually a boolean), or a
/// fatal configuration error.
pub type ProbeResult = Result<HostValue, ConfigError>;

type ProbeThunk = Box<dyn FnOnce() -> ProbeResult>;

enum MemoSlot {
    Pending(ProbeThunk),
    Evaluating,
    Done(ProbeResult),
}

/// A memoizing wrapper around a zero-argument probe.
pub struct MemoProbe {
    slot: RefCell<MemoSlot>,
}

impl MemoProbe {
    pub fn new<F>(thunk: F) -> Self
    where
        F: FnOnce() -> ProbeResult + 'static,
    {
        MemoProbe {
            slot: RefCell::new(MemoSlot::Pending(Box::new(thunk))),
        }
    }

    /// First call runs the probe and caches its result; later calls
    /// return the cache. A probe that re-enters itself reads as `false`.
    pub fn call(&self) -> ProbeResult {
        let slot = self.slot.replace(MemoSlot::Evaluating);
        match slot {
            MemoSlot::Pending(thunk) => {
                let result = thunk();
                self.slot.replace(MemoSlot::Done(result.clone()));
                result
            }
            MemoSlot::Done(result) => {
                self.slot.replace(MemoSlot::Done(result.clone()));
                result
            }
            MemoSlot::Evaluating => Ok(HostValue::Boolean(false)),
        }
    }

    /// Whether the underlying probe has already run.
    pub fn is_evaluated(&self) -> bool {
        matches!(*self.slot.borrow(), MemoSlot::Done(_))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_probe_runs_exactly_once() {
        let counter = Rc::new(Cell::new(0));
        let seen = counter.clone();
        let probe = MemoProbe::new(move || {
            seen.set(seen.get() + 1);
            Ok(HostValue::Boolean(true))
        });

        assert!(!probe.is_evaluated());
        for _ in 0..5 {
            assert_eq!(probe.call(), Ok(HostValue::Boolean(true)));
        }
        assert!(probe.is_evaluated());
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_fatal_results_are_cached_too() {
        let counter = Rc::new(Cell::new(0));
        let seen = counter.clone();
        let probe = MemoProbe::new(move || {
            seen.set(seen.get() + 1);
            Err(ConfigError::MissingEvaluator)
        });

        assert_eq!(probe.call(), Err(ConfigError::MissingEvaluator));
        assert_eq!(probe.call(), Err(ConfigError::MissingEvaluator));
        assert_eq!(counter.get(), 1);
    }
}
