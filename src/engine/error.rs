use std::fmt;
use std::fmt::{Display, Formatter};

/// Fatal configuration error: the host lacks a primitive the engine
/// itself needs, as opposed to lacking an optional feature under test.
///
/// These propagate out of the gateway and locator uncaught. Callers must
/// treat them as startup failures, never as per-feature results.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No callable dynamic-evaluation primitive on the global context.
    MissingEvaluator,
    /// No callable baseline object-construction primitive.
    MissingObjectPrimitive,
    /// None of the candidate global identifiers is currently callable.
    NoGlobalFunction,
    /// The registry exposes no capability with this name.
    UnknownCapability(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingEvaluator => {
                write!(f, "no evaluation primitive found on the global context")
            }
            ConfigError::MissingObjectPrimitive => {
                write!(f, "no object-construction primitive found on the global context")
            }
            ConfigError::NoGlobalFunction => {
                write!(f, "could not find a usable global function")
            }
            ConfigError::UnknownCapability(name) => {
                write!(f, "unknown capability: {}", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
