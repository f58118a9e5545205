//! # autoprobe - Runtime Capability Probing in Rust
//!
//! An engine that discovers, at process start, which optional language and
//! runtime behaviors a hosting environment actually supports - without
//! relying on version strings or environment fingerprinting. Featuring:
//! - Memoized, lazy, side-effect-free capability probes
//! - Safe-invocation wrappers that collapse probe failures to `false`
//! - A guarded dynamic-evaluation gateway with fail-fast preconditions
//! - A non-destructive global install slot with snapshot/restore
//! - A reference script host (PEG parser + tree-walking interpreter) so
//!   snippet probes can be exercised end to end
//!
//! ## Quick Start
//!
//! ### Probing the reference host
//!
//! ```
//! use autoprobe::engine::registry::CapabilityRegistry;
//! use autoprobe::host::profile::HostProfile;
//! use autoprobe::interp::script_host::new_standard_context;
//!
//! // A context backed by the full reference host
//! let ctx = new_standard_context(HostProfile::full());
//! let caps = CapabilityRegistry::build(ctx);
//!
//! assert!(caps.supports("supports_let_declarations").unwrap());
//! assert!(caps.supports("supports_trailing_array_commas").unwrap());
//!
//! // Undo the global install when done
//! caps.restore();
//! ```
//!
//! ### Degrading gracefully without dynamic evaluation
//!
//! Hosts that cannot evaluate source text supply an evaluator that fails
//! every call. Snippet probes collapse to `false`; structural probes that
//! test the object model directly keep working.
//!
//! ```
//! use std::rc::Rc;
//! use autoprobe::engine::registry::CapabilityRegistry;
//! use autoprobe::host::builtins::register_core_globals;
//! use autoprobe::host::context::GlobalContext;
//! use autoprobe::host::evaluator::NullEvaluator;
//!
//! let mut ctx = GlobalContext::new();
//! register_core_globals(&mut ctx);
//! ctx.set_evaluator(Rc::new(NullEvaluator));
//!
//! let caps = CapabilityRegistry::build(ctx.shared());
//! assert!(!caps.supports("supports_let_declarations").unwrap());
//! assert!(caps.supports("supports_object_construction").unwrap());
//! ```
//!
//! ## Failure Model
//!
//! Two disjoint error classes, never mixed:
//!
//! 1. **Expected probe failure** - anything that goes wrong while probing
//!    (syntax error, reference error, unsupported construct) is caught at
//!    the safe-invocation boundary and reads as `false`. Nothing is logged.
//! 2. **Fatal configuration error** - a missing evaluation primitive, a
//!    missing baseline object primitive, or no usable global function.
//!    These propagate as [`engine::error::ConfigError`] because they mean
//!    the host cannot support the engine at all, not that one feature is
//!    absent.
//!
//! ## Architecture
//!
//! - **[`parser`]** - PEG grammar and AST for the reference probe language
//! - **[`host`]** - Values, objects, the global context and evaluator seam
//! - **[`interp`]** - Tree-walking interpreter backing the reference host
//! - **[`engine`]** - The probing core: memoizer, safe invoker, evaluation
//!   gateway, global-function locator, probe catalog and the capability
//!   registry lifecycle

#[macro_use]
extern crate lazy_static;

pub mod engine;
pub mod host;
pub mod interp;
pub mod parser;
