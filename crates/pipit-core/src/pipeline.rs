//! Running builtins as concurrently executing pipeline stages
//!
//! This is the part of an evaluator that wires stages together: stage `i`'s
//! output port becomes stage `i + 1`'s input port through a [`pipe`], and
//! every stage runs on its own thread. Values written to one channel arrive
//! in order; a slow stage stalls the one feeding it.
//!
//! ## Usage
//!
//! ```
//! # use pipit_core::adapter::Builtin;
//! # use pipit_core::config::RuntimeConfig;
//! # use pipit_core::pipeline::{self, Stage};
//! # use pipit_core::{Context, Signal};
//! let noop = Builtin::raw("noop", |_, _| Signal::Ok);
//! let template = Context::new("top", Vec::new());
//! let stages = vec![Stage::new(&noop, vec![]), Stage::new(&noop, vec![])];
//! let signals = pipeline::run(stages, &template, &RuntimeConfig::default());
//! assert_eq!(signals, vec![Signal::Ok, Signal::Ok]);
//! ```

use crate::adapter::Builtin;
use crate::config::RuntimeConfig;
use crate::context::{Context, INPUT, OUTPUT};
use crate::port::pipe;
use crate::signal::Signal;
use crate::value::Value;
use std::thread;

/// One builtin invocation within a pipeline.
pub struct Stage<'a> {
    pub builtin: &'a Builtin,
    pub args: Vec<Value>,
}

impl<'a> Stage<'a> {
    pub fn new(builtin: &'a Builtin, args: Vec<Value>) -> Self {
        Stage { builtin, args }
    }
}

/// Run `stages` concurrently and return their signals in stage order.
///
/// Each stage gets a fork of `template`. The first stage keeps the
/// template's input and the last keeps its output; the ports in between are
/// fresh pipes. A stage's ports are closed as soon as it returns, which is
/// what lets the next stage see end-of-input.
pub fn run(stages: Vec<Stage<'_>>, template: &Context, config: &RuntimeConfig) -> Vec<Signal> {
    let count = stages.len();
    let mut contexts: Vec<Context> = (0..count)
        .map(|i| template.fork(format!("{} stage {i}", template.name())))
        .collect();
    for i in 1..count {
        let (writer, reader) = pipe(config.channel_capacity, config.pipe_capacity);
        contexts[i - 1].set_port(OUTPUT, writer);
        contexts[i].set_port(INPUT, reader);
    }
    tracing::debug!(stages = count, "running pipeline");

    thread::scope(|scope| {
        let handles: Vec<_> = stages
            .into_iter()
            .zip(contexts)
            .map(|(stage, mut ctx)| {
                scope.spawn(move || {
                    let signal = stage.builtin.call(&mut ctx, stage.args);
                    ctx.close_ports();
                    signal
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Signal::failure("pipeline stage panicked"))
            })
            .collect()
    })
}
