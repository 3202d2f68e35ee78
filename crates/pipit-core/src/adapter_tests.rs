//! Tests for the builtin adapter

use super::*;
use crate::port::ValueSink;
use crate::test_utils::{Harness, strings};
use crate::value::Value;

fn emit_sum(ctx: &mut Context, a: f64, b: f64) -> Signal {
    ctx.output()
        .put(Value::from(crate::number::format_float(a + b)))
        .map_err(BuiltinError::from)
        .into()
}

fn emit_all(ctx: &mut Context, first: String, rest: Rest<f64>) -> Signal {
    for n in rest {
        if ctx.output().put(Value::from(format!("{first}{n}"))).is_err() {
            return Signal::failure("closed");
        }
    }
    Signal::Ok
}

fn takes_list(_ctx: &mut Context, list: List) -> Signal {
    if list.is_empty() {
        Signal::failure("empty")
    } else {
        Signal::Ok
    }
}

fn nothing(_ctx: &mut Context) -> Signal {
    Signal::Ok
}

fn explode(_ctx: &mut Context) -> Signal {
    panic!("kaboom")
}

fn arguments_error() -> Signal {
    BuiltinError::Arguments.into()
}

#[test]
fn test_fixed_signature() {
    let builtin = Builtin::fixed("sum", emit_sum);
    assert_eq!(builtin.name(), "sum");
    assert_eq!(builtin.signature().required_args(), 2);
    assert!(!builtin.signature().is_variadic());
    assert_eq!(builtin.signature().to_string(), "(number number)");
}

#[test]
fn test_variadic_signature() {
    let builtin = Builtin::variadic("all", emit_all);
    assert_eq!(builtin.signature().required_args(), 1);
    assert_eq!(builtin.signature().to_string(), "(text number...)");
}

#[test]
fn test_value_capability_signature() {
    let builtin = Builtin::fixed("list", takes_list);
    assert_eq!(builtin.signature().to_string(), "(list)");
    assert_eq!(Builtin::raw("raw", |_, _| Signal::Ok).signature().to_string(), "(value...)");
}

#[test]
fn test_fixed_arity_must_match_exactly() {
    let builtin = Builtin::fixed("sum", emit_sum);
    for count in [0, 1, 3, 4] {
        let mut harness = Harness::new();
        let args = vec![Value::from("1"); count];
        assert_eq!(harness.call(&builtin, args), arguments_error());
        assert!(harness.finish().values.is_empty());
    }
}

#[test]
fn test_fixed_call_coerces_numbers() {
    let builtin = Builtin::fixed("sum", emit_sum);
    let mut harness = Harness::new();
    assert_eq!(harness.call(&builtin, strings(&["1.5", "2"])), Signal::Ok);
    assert_eq!(harness.finish().values, strings(&["3.5"]));
}

#[test]
fn test_variadic_accepts_any_count_at_or_above_required() {
    let builtin = Builtin::variadic("all", emit_all);

    let mut harness = Harness::new();
    assert_eq!(harness.call(&builtin, vec![]), arguments_error());

    for extra in 0..4 {
        let mut harness = Harness::new();
        let mut args = strings(&["n="]);
        args.extend(vec![Value::from("7"); extra]);
        assert_eq!(harness.call(&builtin, args), Signal::Ok);
        assert_eq!(harness.finish().values.len(), extra);
    }
}

#[test]
fn test_failed_number_coercion_writes_nothing() {
    let builtin = Builtin::variadic("all", emit_all);
    let mut harness = Harness::new();
    let signal = harness.call(&builtin, strings(&["n=", "1", "2", "three"]));
    assert_eq!(signal, arguments_error());
    assert!(harness.finish().values.is_empty());
}

#[test]
fn test_number_param_rejects_non_strings() {
    let builtin = Builtin::fixed("sum", emit_sum);
    let mut harness = Harness::new();
    let args = vec![Value::from("1"), Value::List(List::default())];
    assert_eq!(harness.call(&builtin, args), arguments_error());
}

#[test]
fn test_text_param_accepts_any_value() {
    let builtin = Builtin::variadic("all", emit_all);
    let mut harness = Harness::new();
    let args = vec![Value::Bool(true), Value::from("1")];
    assert_eq!(harness.call(&builtin, args), Signal::Ok);
    assert_eq!(harness.finish().values, strings(&["$true1"]));
}

#[test]
fn test_value_capability_checks_type() {
    let builtin = Builtin::fixed("list", takes_list);

    let mut harness = Harness::new();
    assert_eq!(harness.call(&builtin, strings(&["x"])), arguments_error());

    let mut harness = Harness::new();
    let list = Value::List(strings(&["x"]).into());
    assert_eq!(harness.call(&builtin, vec![list]), Signal::Ok);
}

#[test]
fn test_zero_arity() {
    let builtin = Builtin::fixed("nothing", nothing);
    let mut harness = Harness::new();
    assert_eq!(harness.call(&builtin, vec![]), Signal::Ok);
    assert_eq!(harness.call(&builtin, strings(&["x"])), arguments_error());
}

#[test]
fn test_raw_builtin_sees_all_arguments() {
    let builtin = Builtin::raw("count", |ctx, args| {
        ctx.output()
            .put(Value::from(args.len().to_string()))
            .map_err(BuiltinError::from)
            .into()
    });
    let mut harness = Harness::new();
    assert_eq!(harness.call(&builtin, strings(&["a", "b", "c"])), Signal::Ok);
    assert_eq!(harness.finish().values, strings(&["3"]));
}

#[test]
fn test_panic_becomes_failure() {
    let builtin = Builtin::fixed("explode", explode);
    let mut harness = Harness::new();
    let signal = harness.call(&builtin, vec![]);
    assert_eq!(signal, Signal::failure("explode panicked: kaboom"));
}
