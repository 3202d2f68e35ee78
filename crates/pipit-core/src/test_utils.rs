//! Shared helpers for exercising builtins in tests
//!
//! A [`Harness`] owns a context whose output channel never blocks and whose
//! output and auxiliary byte streams are captured in memory, so builtins can
//! be called synchronously and their effects inspected afterwards.

use crate::adapter::Builtin;
use crate::context::{AUX, Context, INPUT, OUTPUT};
use crate::port::{Chan, Port, Stream, ValueSource};
use crate::signal::Signal;
use crate::value::Value;
use parking_lot::Mutex;
use std::io::{self, Cursor, Write};
use std::sync::Arc;

/// A `Write` target that can be read back after the writer is gone.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// What a builtin produced.
#[derive(Debug, Default)]
pub struct Output {
    pub values: Vec<Value>,
    pub text: String,
    pub aux: String,
}

pub struct Harness {
    pub ctx: Context,
    values: Chan,
    text: SharedBuf,
    aux: SharedBuf,
}

impl Harness {
    /// A context with empty input.
    pub fn new() -> Self {
        Harness::with_input(Port::closed())
    }

    /// A context whose input channel yields `values` and then ends.
    pub fn with_values(values: Vec<Value>) -> Self {
        Harness::with_input(Port::new(Chan::from_values(values), Stream::closed()))
    }

    /// A context whose input byte stream holds `bytes`.
    pub fn with_bytes(bytes: &[u8]) -> Self {
        let stream = Stream::from_reader(Cursor::new(bytes.to_vec()));
        Harness::with_input(Port::new(Chan::closed(), stream))
    }

    fn with_input(input: Port) -> Self {
        let (tx, rx) = Chan::unbounded();
        let text = SharedBuf::default();
        let aux = SharedBuf::default();
        let mut ctx = Context::new("test", Vec::new());
        ctx.set_port(INPUT, input);
        ctx.set_port(OUTPUT, Port::new(tx, Stream::from_writer(text.clone())));
        ctx.set_port(AUX, Port::new(Chan::closed(), Stream::from_writer(aux.clone())));
        Harness {
            ctx,
            values: rx,
            text,
            aux,
        }
    }

    pub fn call(&mut self, builtin: &Builtin, args: Vec<Value>) -> Signal {
        builtin.call(&mut self.ctx, args)
    }

    /// Close the context's ports and collect everything written.
    pub fn finish(mut self) -> Output {
        self.ctx.close_ports();
        Output {
            values: self.values.values().collect(),
            text: self.text.contents(),
            aux: self.aux.contents(),
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Harness::new()
    }
}

/// Shorthand for a list of string values.
pub fn strings(items: &[&str]) -> Vec<Value> {
    items.iter().map(|s| Value::from(*s)).collect()
}
