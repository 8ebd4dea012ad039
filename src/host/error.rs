use std::fmt;
use std::fmt::{Display, Formatter};

/// Error type for host environment operations.
#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    /// A name the environment was required to provide is missing.
    ReferenceError(String),
    /// A value did not have the shape an operation required.
    TypeError(String),
    /// A markup fragment failed to parse.
    SyntaxError(String),
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HostError::ReferenceError(m) => write!(f, "Uncaught reference error: {}.", m),
            HostError::TypeError(m) => write!(f, "Uncaught type error: {}.", m),
            HostError::SyntaxError(m) => write!(f, "Uncaught syntax error: {}.", m),
        }
    }
}

impl std::error::Error for HostError {}
