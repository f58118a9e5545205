//! The probing core.
//!
//! Small, host-agnostic infrastructure for safe, lazy, side-effect-free
//! capability probing:
//!
//! - [`invoke`] - safe invocation; failures collapse to `false`
//! - [`memo`] - each probe body runs at most once per registry
//! - [`gateway`] - guarded access to dynamic source-text evaluation
//! - [`locator`] - find some well-known global callable
//! - [`catalog`] - the declarative probe table
//! - [`registry`] - the public surface and install/restore lifecycle

pub mod catalog;
pub mod error;
pub mod gateway;
pub mod invoke;
pub mod locator;
pub mod memo;
pub mod registry;

pub use catalog::{default_catalog, ProbeEntry, ProbeScope, ProbeSpec};
pub use error::ConfigError;
pub use gateway::EvaluationGateway;
pub use locator::{find_global_function, GLOBAL_FUNCTION_CANDIDATES};
pub use memo::{MemoProbe, ProbeResult};
pub use registry::{CapabilityRegistry, INSTALL_SLOT};
