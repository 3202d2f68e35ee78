//! `call` subcommand handler

use pipit_core::config::RuntimeConfig;
use pipit_core::context::{AUX, INPUT, OUTPUT};
use pipit_core::port::{Chan, Port, Stream, ValueSource};
use pipit_core::{Builtin, Context, Flow, Signal, Value};
use pipit_stdlib::{MemoryDirStore, registry};
use std::io::{self, Read, Write};
use std::process;
use std::sync::Arc;
use std::thread;

/// Call a builtin with the process's standard streams as its ports
pub fn handle_call(name: &str, args: Vec<String>, config: &RuntimeConfig) {
    let Some(builtin) = registry().get(name) else {
        eprintln!("error: unknown builtin '{name}'");
        process::exit(1);
    };

    let signal = call_builtin(builtin, args, config, io::stdin(), io::stdout(), io::stderr());
    if let Some(message) = exit_message(&signal) {
        eprintln!("error: {message}");
        process::exit(1);
    }
}

/// What to report for a top-level signal, or `None` for a clean exit.
///
/// `return` at the top level just ends the call; `break` and `continue`
/// have no loop to act on.
pub fn exit_message(signal: &Signal) -> Option<String> {
    match signal {
        Signal::Ok | Signal::Flow(Flow::Return) => None,
        Signal::Failure(message) => Some(message.clone()),
        Signal::Flow(flow) => Some(format!("{} outside of a loop", flow.name())),
    }
}

/// Run `builtin` with `input` as the input byte stream and `output`/`aux`
/// as the output and auxiliary byte streams. Values the builtin writes to
/// its output channel are printed to `output` one per line, in order.
pub fn call_builtin(
    builtin: &Builtin,
    args: Vec<String>,
    config: &RuntimeConfig,
    input: impl Read + Send + 'static,
    output: impl Write + Send + 'static,
    aux: impl Write + Send + 'static,
) -> Signal {
    let (values_tx, values_rx) = Chan::bounded(config.channel_capacity);
    let out = Stream::from_writer(output);

    let printer_out = out.clone();
    let printer = thread::spawn(move || {
        for value in values_rx.values() {
            if let Err(err) = printer_out.write_str(&format!("{}\n", value.to_text())) {
                tracing::warn!(%err, "stopped printing output values");
                break;
            }
        }
    });

    let mut ctx = Context::new("top", Vec::new()).with_store(Arc::new(MemoryDirStore::new()));
    ctx.set_port(INPUT, Port::new(Chan::closed(), Stream::from_reader(input)));
    ctx.set_port(OUTPUT, Port::new(values_tx, out));
    ctx.set_port(AUX, Port::new(Chan::closed(), Stream::from_writer(aux)));

    let args: Vec<Value> = args.into_iter().map(Value::from).collect();
    tracing::debug!(builtin = builtin.name(), args = args.len(), "calling builtin");
    let signal = builtin.call(&mut ctx, args);
    ctx.close_ports();

    if printer.join().is_err() {
        tracing::warn!("output printer panicked");
    }
    signal
}
