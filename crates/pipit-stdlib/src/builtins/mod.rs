//! Builtin implementations for the pipit runtime.
//!
//! Every builtin is a plain Rust function taking the calling [`Context`]
//! followed by its typed parameters, and returning a [`Signal`]. They are
//! grouped by concern:
//!
//! - `core`: values in and out of the channel view (put, unpack, typeof, ...)
//! - `io`: the byte view and conversions between views (print, from-lines, ...)
//! - `flow`: failure, return, break, continue and each
//! - `arith`: float arithmetic
//! - `dirs`: working directory and directory history
//! - `host`: line editor bindings and script sourcing
//! - `helpers`: shared utilities for builtin implementations
//!
//! [`Context`]: pipit_core::Context
//! [`Signal`]: pipit_core::Signal

pub mod arith;
pub mod core;
pub mod dirs;
pub mod flow;
pub mod helpers;
pub mod host;
pub mod io;

#[cfg(test)]
mod flow_tests;

// Re-export all builtins for convenience
pub use arith::{builtin_divide, builtin_minus, builtin_plus, builtin_times};
pub use self::core::{
    builtin_eq, builtin_nop, builtin_put, builtin_put_all, builtin_rat, builtin_typeof,
    builtin_unpack,
};
pub use dirs::{builtin_cd, builtin_jump_dir, builtin_visited_dirs};
pub use flow::{
    builtin_break, builtin_continue, builtin_each, builtin_failure, builtin_return,
};
pub use host::{builtin_bind, builtin_le, builtin_source};
pub use io::{
    builtin_from_json, builtin_from_lines, builtin_into_lines, builtin_print, builtin_println,
    builtin_stack,
};
