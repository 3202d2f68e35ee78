//! Tests for control-flow builtins

use super::flow::*;
use pipit_core::port::ValueSink;
use pipit_core::test_utils::{Harness, strings};
use pipit_core::{Builtin, BuiltinError, Closure, Flow, Signal, Value};

/// A one-parameter closure that echoes its argument and then answers with
/// whatever `outcome` decides for it.
fn echo_then(outcome: fn(&str) -> Signal) -> Value {
    Value::Closure(Closure::from_fn(&["x"], move |ctx, args| {
        let text = args[0].to_text();
        if let Err(err) = ctx.output().put(Value::from(format!("saw {text}"))) {
            return BuiltinError::from(err).into();
        }
        outcome(&text)
    }))
}

fn each() -> Builtin {
    Builtin::fixed("each", builtin_each)
}

#[test]
fn test_failure_carries_message() {
    let builtin = Builtin::fixed("failure", builtin_failure);
    let mut harness = Harness::new();
    assert_eq!(
        harness.call(&builtin, strings(&["bad thing"])),
        Signal::failure("bad thing")
    );
}

#[test]
fn test_flow_builtins() {
    let cases = [
        (Builtin::fixed("return", builtin_return), Flow::Return),
        (Builtin::fixed("break", builtin_break), Flow::Break),
        (Builtin::fixed("continue", builtin_continue), Flow::Continue),
    ];
    for (builtin, flow) in cases {
        let mut harness = Harness::new();
        assert_eq!(harness.call(&builtin, vec![]), Signal::Flow(flow));
        assert_eq!(harness.call(&builtin, strings(&["x"])), Signal::failure("arguments error"));
    }
}

#[test]
fn test_each_visits_every_input() {
    let mut harness = Harness::with_values(strings(&["a", "b", "c"]));
    let f = echo_then(|_| Signal::Ok);
    assert_eq!(harness.call(&each(), vec![f]), Signal::Ok);
    assert_eq!(harness.finish().values, strings(&["saw a", "saw b", "saw c"]));
}

#[test]
fn test_each_empty_input_never_calls() {
    let mut harness = Harness::new();
    let f = echo_then(|_| Signal::failure("called"));
    assert_eq!(harness.call(&each(), vec![f]), Signal::Ok);
    assert!(harness.finish().values.is_empty());
}

#[test]
fn test_each_break_stops_successfully() {
    let mut harness = Harness::with_values(strings(&["a", "b", "c"]));
    let f = echo_then(|text| {
        if text == "b" {
            Signal::Flow(Flow::Break)
        } else {
            Signal::Ok
        }
    });
    assert_eq!(harness.call(&each(), vec![f]), Signal::Ok);
    assert_eq!(harness.finish().values, strings(&["saw a", "saw b"]));
}

#[test]
fn test_each_continue_moves_on() {
    let mut harness = Harness::with_values(strings(&["a", "b", "c"]));
    let f = echo_then(|_| Signal::Flow(Flow::Continue));
    assert_eq!(harness.call(&each(), vec![f]), Signal::Ok);
    assert_eq!(harness.finish().values.len(), 3);
}

#[test]
fn test_each_return_propagates() {
    let mut harness = Harness::with_values(strings(&["a", "b"]));
    let f = echo_then(|_| Signal::Flow(Flow::Return));
    assert_eq!(harness.call(&each(), vec![f]), Signal::Flow(Flow::Return));
    assert_eq!(harness.finish().values, strings(&["saw a"]));
}

#[test]
fn test_each_failure_propagates() {
    let mut harness = Harness::with_values(strings(&["a", "b", "c"]));
    let f = echo_then(|text| {
        if text == "b" {
            Signal::failure("stop at b")
        } else {
            Signal::Ok
        }
    });
    assert_eq!(harness.call(&each(), vec![f]), Signal::failure("stop at b"));
    assert_eq!(harness.finish().values, strings(&["saw a", "saw b"]));
}

#[test]
fn test_each_binds_parameter_in_child_scope() {
    let mut harness = Harness::with_values(strings(&["v1"]));
    let f = Closure::from_fn(&["item"], |ctx, _args| {
        let bound = ctx.env.get("item").unwrap_or_else(|| Value::from("unbound"));
        assert_eq!(ctx.name(), "closure of each");
        ctx.output().put(bound).map_err(BuiltinError::from).into()
    });
    assert_eq!(harness.call(&each(), vec![Value::Closure(f)]), Signal::Ok);
    assert_eq!(harness.ctx.env.get("item"), None);
    assert_eq!(harness.finish().values, strings(&["v1"]));
}

#[test]
fn test_each_arity_mismatch_fails() {
    let mut harness = Harness::with_values(strings(&["a"]));
    let f = Closure::from_fn(&["a", "b"], |_, _| Signal::Ok);
    let signal = harness.call(&each(), vec![Value::Closure(f)]);
    assert!(signal.is_failure());
}

#[test]
fn test_each_requires_closure() {
    let mut harness = Harness::with_values(strings(&["a"]));
    assert_eq!(
        harness.call(&each(), strings(&["not a closure"])),
        Signal::failure("arguments error")
    );
}
