//! Control-flow builtins: failure, return, break, continue, each

use pipit_core::port::ValueSource;
use pipit_core::signal::run_loop;
use pipit_core::{Closure, Context, Flow, Signal};

/// Builtin: failure MESSAGE -> a failure carrying MESSAGE
pub fn builtin_failure(_ctx: &mut Context, message: String) -> Signal {
    Signal::failure(message)
}

/// Builtin: return
pub fn builtin_return(_ctx: &mut Context) -> Signal {
    Signal::Flow(Flow::Return)
}

/// Builtin: break
pub fn builtin_break(_ctx: &mut Context) -> Signal {
    Signal::Flow(Flow::Break)
}

/// Builtin: continue
pub fn builtin_continue(_ctx: &mut Context) -> Signal {
    Signal::Flow(Flow::Continue)
}

/// Builtin: each F
///
/// Calls F once per input value, each time in a freshly forked context
/// whose ports are closed when the call returns. `continue` moves on to the
/// next value, `break` ends the loop successfully, and any other non-Ok
/// signal ends the loop and is returned as is.
pub fn builtin_each(ctx: &mut Context, f: Closure) -> Signal {
    let mut calls = 0usize;
    let signal = run_loop(ctx.input().values(), |value| {
        calls += 1;
        let mut child = ctx.fork("closure of each");
        let signal = f.call(&mut child, vec![value]);
        child.close_ports();
        signal
    });
    tracing::trace!(calls, %signal, "each finished");
    signal
}
