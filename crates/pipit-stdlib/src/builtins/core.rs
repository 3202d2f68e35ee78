//! Core value builtins: `:`, `true`, put, put-all, unpack, typeof, rat, `=`

use super::helpers::*;
use pipit_core::port::ValueSource;
use pipit_core::{BuiltinError, Context, List, Rest, Signal, Value};

/// Builtin: `:` / `true` ARGS... -> nothing
///
/// Accepts and ignores any arguments.
pub fn builtin_nop(_ctx: &mut Context, _args: Vec<Value>) -> Signal {
    Signal::Ok
}

/// Builtin: put VALUES...
pub fn builtin_put(ctx: &mut Context, args: Vec<Value>) -> Signal {
    args.into_iter()
        .try_for_each(|value| emit(ctx, value))
        .into()
}

/// Builtin: put-all LISTS... -> every element of every list, in order
pub fn builtin_put_all(ctx: &mut Context, lists: Rest<List>) -> Signal {
    lists
        .iter()
        .flat_map(|list| list.iter().cloned())
        .try_for_each(|value| emit(ctx, value))
        .into()
}

/// Builtin: unpack
///
/// Reads lists from the input channel and writes out their elements. A
/// non-list input stops the builtin with an input error; elements already
/// written stay written.
pub fn builtin_unpack(ctx: &mut Context) -> Signal {
    unpack_input(ctx).into()
}

fn unpack_input(ctx: &Context) -> Result<(), BuiltinError> {
    for value in ctx.input().values() {
        let Value::List(list) = value else {
            return Err(BuiltinError::Input);
        };
        for item in list.iter() {
            emit(ctx, item.clone())?;
        }
    }
    Ok(())
}

/// Builtin: typeof VALUES... -> one type tag per argument
pub fn builtin_typeof(ctx: &mut Context, args: Vec<Value>) -> Signal {
    args.iter()
        .try_for_each(|value| emit(ctx, Value::from(value.type_tag().name())))
        .into()
}

/// Builtin: rat VALUE -> exact rational
pub fn builtin_rat(ctx: &mut Context, value: Value) -> Signal {
    match value.to_rat() {
        Ok(rat) => emit(ctx, Value::Rat(rat)).into(),
        Err(message) => Signal::failure(message),
    }
}

/// Builtin: `=` VALUES... -> $true when every adjacent pair is equal
pub fn builtin_eq(ctx: &mut Context, args: Vec<Value>) -> Signal {
    if args.is_empty() {
        return BuiltinError::Arguments.into();
    }
    let equal = args.windows(2).all(|pair| pair[0] == pair[1]);
    emit(ctx, Value::Bool(equal)).into()
}
