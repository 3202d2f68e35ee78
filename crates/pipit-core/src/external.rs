//! Interfaces to collaborators that live outside the builtin layer
//!
//! Implementations are shared by every fork of a context and may be called
//! from concurrently running pipeline stages, hence `Send + Sync` with
//! `&self` receivers: each implementation serializes its own state.

use crate::context::Context;
use crate::error::StoreError;
use crate::signal::Signal;
use crate::value::Value;

/// A visited directory and its frecency score.
#[derive(Debug, Clone, PartialEq)]
pub struct Dir {
    pub path: String,
    pub score: f64,
}

/// Persistent directory history consulted by `cd`, `visited-dirs` and
/// `jump-dir`.
pub trait DirStore: Send + Sync {
    fn add_dir(&self, path: &str) -> Result<(), StoreError>;

    fn list_dirs(&self) -> Result<Vec<Dir>, StoreError>;

    /// Directories matching `fragment`, best match first.
    fn find_dirs(&self, fragment: &str) -> Result<Vec<Dir>, StoreError>;
}

/// The interactive line editor, reached through `bind` and `le`.
pub trait LineEditor: Send + Sync {
    fn bind(&self, key: &str, command: &str) -> Signal;

    fn call(&self, command: &str, args: &[Value]) -> Signal;
}

/// The evaluator's entry point for running a script file, used by `source`.
pub trait ScriptSourcer: Send + Sync {
    fn source(&self, ctx: &mut Context, path: &str) -> Signal;
}
