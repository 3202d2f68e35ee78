//! Builtins that move data between the two views of a port:
//! print, println, into-lines, from-lines, from-json, -stack

use super::helpers::*;
use pipit_core::port::ValueSource;
use pipit_core::{BuiltinError, Context, Rest, Signal, Value};
use std::backtrace::Backtrace;

/// Builtin: print ARGS... -> text joined by single spaces, no newline
pub fn builtin_print(ctx: &mut Context, args: Rest<String>) -> Signal {
    write_text(ctx, &args.join(" ")).into()
}

/// Builtin: println ARGS... -> like print, followed by a newline
pub fn builtin_println(ctx: &mut Context, args: Rest<String>) -> Signal {
    write_text(ctx, &format!("{}\n", args.join(" "))).into()
}

/// Builtin: into-lines
///
/// Writes the text of every input value to the output stream, one per line.
pub fn builtin_into_lines(ctx: &mut Context) -> Signal {
    ctx.input()
        .values()
        .try_for_each(|value| write_text(ctx, &format!("{}\n", value.to_text())))
        .into()
}

/// Builtin: from-lines
///
/// Reads the input stream line by line and writes each line, without its
/// terminator, as a string value. A final line lacking a newline is still
/// emitted. Bytes that are not valid UTF-8 become U+FFFD; they never end
/// the stream.
pub fn builtin_from_lines(ctx: &mut Context) -> Signal {
    read_lines(ctx).into()
}

fn read_lines(ctx: &Context) -> Result<(), BuiltinError> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if ctx.input().stream.read_line_bytes(&mut line)? == 0 {
            return Ok(());
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        emit(ctx, Value::String(String::from_utf8_lossy(&line).into_owned()))?;
    }
}

/// Builtin: from-json
///
/// Decodes a sequence of JSON documents from the input stream. Values decoded
/// before a syntax error are kept; the error ends the builtin with a failure.
pub fn builtin_from_json(ctx: &mut Context) -> Signal {
    let reader = ctx.input().stream.reader();
    let documents = serde_json::Deserializer::from_reader(reader).into_iter::<serde_json::Value>();
    for document in documents {
        let json = match document {
            Ok(json) => json,
            Err(err) => {
                tracing::debug!(%err, "from-json stopped on malformed input");
                return Signal::failure(err.to_string());
            }
        };
        if let Err(err) = emit(ctx, Value::from_json(json)) {
            return err.into();
        }
    }
    Signal::Ok
}

/// Builtin: -stack
///
/// Writes a backtrace of the current thread to the auxiliary stream.
pub fn builtin_stack(ctx: &mut Context) -> Signal {
    let trace = Backtrace::force_capture();
    ctx.aux()
        .stream
        .write_str(&format!("{trace}\n"))
        .map_err(BuiltinError::from)
        .into()
}
