//! Builtins that hand work to the host: bind, le, source

use super::helpers::require_editor;
use pipit_core::{BuiltinError, Context, Rest, Signal, Value};

/// Builtin: bind KEY COMMAND
pub fn builtin_bind(ctx: &mut Context, key: String, command: String) -> Signal {
    match require_editor(ctx) {
        Ok(editor) => editor.bind(&key, &command),
        Err(err) => err.into(),
    }
}

/// Builtin: le COMMAND ARGS... -> whatever the editor command answers
pub fn builtin_le(ctx: &mut Context, command: String, args: Rest<Value>) -> Signal {
    match require_editor(ctx) {
        Ok(editor) => editor.call(&command, &args),
        Err(err) => err.into(),
    }
}

/// Builtin: source PATH
///
/// Runs a script file through the evaluator attached to the context.
pub fn builtin_source(ctx: &mut Context, path: String) -> Signal {
    let Some(sourcer) = ctx.sourcer.clone() else {
        return BuiltinError::NoEvaluator.into();
    };
    tracing::debug!(%path, "sourcing script");
    sourcer.source(ctx, &path)
}
