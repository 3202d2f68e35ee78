//! Error types for builtin execution, ports and external collaborators
//!
//! None of these escape a builtin call directly: every [`BuiltinError`] is
//! turned into a [`Signal::Failure`](crate::signal::Signal) carrying its
//! display text, which is the plain message users see.

use std::io;
use thiserror::Error;

/// Failures a builtin can report through its result signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuiltinError {
    /// Wrong argument count, or an argument that failed coercion.
    #[error("arguments error")]
    Arguments,
    /// An input value of the wrong shape.
    #[error("input error")]
    Input,
    /// A message from the OS, a decoder, the store or the editor.
    #[error("{0}")]
    External(String),
    #[error("store not connected")]
    StoreNotConnected,
    #[error("no line editor")]
    NoEditor,
    #[error("no evaluator")]
    NoEvaluator,
    #[error("no matching directory")]
    NoMatchingDir,
}

/// Errors raised by the channel or byte view of a port.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("port closed")]
    Closed,
    #[error("port reader gone")]
    Disconnected,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Errors reported by a directory history store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Backend(String),
}

/// Errors raised while assembling a builtin registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("builtin `{0}` registered twice")]
    Duplicate(String),
    #[error("builtin name must not be empty")]
    EmptyName,
}

impl From<PortError> for BuiltinError {
    fn from(err: PortError) -> Self {
        BuiltinError::External(err.to_string())
    }
}

impl From<io::Error> for BuiltinError {
    fn from(err: io::Error) -> Self {
        BuiltinError::External(err.to_string())
    }
}

impl From<StoreError> for BuiltinError {
    fn from(err: StoreError) -> Self {
        BuiltinError::External(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_error_messages() {
        assert_eq!(BuiltinError::Arguments.to_string(), "arguments error");
        assert_eq!(BuiltinError::Input.to_string(), "input error");
        assert_eq!(
            BuiltinError::StoreNotConnected.to_string(),
            "store not connected"
        );
        assert_eq!(BuiltinError::NoEditor.to_string(), "no line editor");
        assert_eq!(
            BuiltinError::NoMatchingDir.to_string(),
            "no matching directory"
        );
    }

    #[test]
    fn test_store_error_is_prefixed() {
        let err: BuiltinError = StoreError::Backend("disk full".to_string()).into();
        assert_eq!(err, BuiltinError::External("store error: disk full".to_string()));
    }

    #[test]
    fn test_port_error_becomes_external() {
        let err: BuiltinError = PortError::Closed.into();
        assert_eq!(err.to_string(), "port closed");
    }
}
