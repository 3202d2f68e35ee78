//! Float arithmetic builtins: `+`, `-`, `*`, `/`
//!
//! Operands are parsed as 64-bit floats and the result is written as a
//! string in general float format.

use super::helpers::emit_number;
use pipit_core::{Context, Rest, Signal};

/// Builtin: `+` NUMBERS... -> sum, 0 when empty
pub fn builtin_plus(ctx: &mut Context, nums: Rest<f64>) -> Signal {
    let sum = nums.iter().fold(0.0, |acc, n| acc + n);
    emit_number(ctx, sum).into()
}

/// Builtin: `-` FIRST NUMBERS... -> FIRST minus each of the rest
pub fn builtin_minus(ctx: &mut Context, first: f64, rest: Rest<f64>) -> Signal {
    let difference = rest.iter().fold(first, |acc, n| acc - n);
    emit_number(ctx, difference).into()
}

/// Builtin: `*` NUMBERS... -> product, 1 when empty
pub fn builtin_times(ctx: &mut Context, nums: Rest<f64>) -> Signal {
    let product = nums.iter().fold(1.0, |acc, n| acc * n);
    emit_number(ctx, product).into()
}

/// Builtin: `/` FIRST NUMBERS... -> FIRST divided by each of the rest
pub fn builtin_divide(ctx: &mut Context, first: f64, rest: Rest<f64>) -> Signal {
    let quotient = rest.iter().fold(first, |acc, n| acc / n);
    emit_number(ctx, quotient).into()
}
