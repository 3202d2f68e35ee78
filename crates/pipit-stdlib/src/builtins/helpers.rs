//! Helper functions for builtin implementations.

use pipit_core::external::{DirStore, LineEditor};
use pipit_core::number::format_float;
use pipit_core::port::ValueSink;
use pipit_core::{BuiltinError, Context, Value};
use std::sync::Arc;

/// Write one value to the output channel
pub fn emit(ctx: &Context, value: Value) -> Result<(), BuiltinError> {
    ctx.output().put(value)?;
    Ok(())
}

/// Write a number to the output channel in general float format
pub fn emit_number(ctx: &Context, number: f64) -> Result<(), BuiltinError> {
    emit(ctx, Value::String(format_float(number)))
}

/// Write text to the output byte stream
pub fn write_text(ctx: &Context, text: &str) -> Result<(), BuiltinError> {
    ctx.output().stream.write_str(text)?;
    Ok(())
}

pub fn require_store(ctx: &Context) -> Result<Arc<dyn DirStore>, BuiltinError> {
    ctx.store.clone().ok_or(BuiltinError::StoreNotConnected)
}

pub fn require_editor(ctx: &Context) -> Result<Arc<dyn LineEditor>, BuiltinError> {
    ctx.editor.clone().ok_or(BuiltinError::NoEditor)
}

/// Build the `[&path=... &score=...]` map describing a stored directory
pub fn dir_entry(path: &str, score: f64) -> Value {
    Value::Map(
        [
            (Value::from("path"), Value::from(path)),
            (Value::from("score"), Value::String(format_float(score))),
        ]
        .into_iter()
        .collect(),
    )
}
