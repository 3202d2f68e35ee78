//! The uniform outcome of every builtin and closure call
//!
//! `return`, `break` and `continue` travel through the same channel as
//! ordinary success and failure. Constructs that run sub-blocks decide what
//! to do next with [`Signal::in_loop`] so that the propagation rule lives in
//! one place:
//!
//! | signal               | loop action                        |
//! |----------------------|------------------------------------|
//! | `Ok`, `Continue`     | next element                       |
//! | `Break`              | stop, report `Ok`                  |
//! | `Return`, `Failure`  | stop, re-propagate unchanged       |

use crate::error::BuiltinError;
use std::fmt;
use std::ops::ControlFlow;

/// Non-local control transfer requested by `return`, `break` or `continue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Return,
    Break,
    Continue,
}

impl Flow {
    pub fn name(self) -> &'static str {
        match self {
            Flow::Return => "return",
            Flow::Break => "break",
            Flow::Continue => "continue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Ok,
    Failure(String),
    Flow(Flow),
}

impl Signal {
    pub fn failure(message: impl Into<String>) -> Self {
        Signal::Failure(message.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Signal::Ok)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Signal::Failure(_))
    }

    /// The failure message, if this is a failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            Signal::Failure(msg) => Some(msg),
            _ => None,
        }
    }

    /// Decide how an iteration construct proceeds after one step.
    ///
    /// `Continue(())` means run the next step; `Break(signal)` means stop and
    /// hand `signal` to the construct's caller.
    pub fn in_loop(self) -> ControlFlow<Signal> {
        match self {
            Signal::Ok | Signal::Flow(Flow::Continue) => ControlFlow::Continue(()),
            Signal::Flow(Flow::Break) => ControlFlow::Break(Signal::Ok),
            other => ControlFlow::Break(other),
        }
    }
}

/// Run `step` over `items` with the loop propagation rule applied after each
/// element. Returns `Ok` when the items run out.
pub fn run_loop<I, F>(items: I, mut step: F) -> Signal
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Signal,
{
    for item in items {
        if let ControlFlow::Break(signal) = step(item).in_loop() {
            return signal;
        }
    }
    Signal::Ok
}

impl From<BuiltinError> for Signal {
    fn from(err: BuiltinError) -> Self {
        Signal::Failure(err.to_string())
    }
}

impl From<Result<(), BuiltinError>> for Signal {
    fn from(result: Result<(), BuiltinError>) -> Self {
        match result {
            Ok(()) => Signal::Ok,
            Err(err) => err.into(),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Ok => write!(f, "ok"),
            Signal::Failure(msg) => write!(f, "{msg}"),
            Signal::Flow(flow) => write!(f, "{}", flow.name()),
        }
    }
}
