//! Builtins running as concurrent pipeline stages

use pipit_core::config::RuntimeConfig;
use pipit_core::pipeline::{self, Stage};
use pipit_core::test_utils::{Harness, Output, strings};
use pipit_core::{Closure, Flow, Signal, Value};
use pipit_stdlib::registry;

/// Run `stages` between the harness's input and captured output.
fn run(
    harness: Harness,
    stages: &[(&str, Vec<Value>)],
    config: &RuntimeConfig,
) -> (Vec<Signal>, Output) {
    let stages: Vec<Stage<'_>> = stages
        .iter()
        .map(|(name, args)| Stage::new(registry().get(name).unwrap(), args.clone()))
        .collect();
    let signals = pipeline::run(stages, &harness.ctx, config);
    (signals, harness.finish())
}

fn call(name: &str, ctx: &mut pipit_core::Context, args: Vec<Value>) -> Signal {
    registry().get(name).unwrap().call(ctx, args)
}

#[test]
fn test_lines_round_trip() {
    let (signals, output) = run(
        Harness::new(),
        &[
            ("put", strings(&["alpha", "beta gamma", ""])),
            ("into-lines", vec![]),
            ("from-lines", vec![]),
        ],
        &RuntimeConfig::default(),
    );
    assert_eq!(signals, vec![Signal::Ok; 3]);
    assert_eq!(output.values, strings(&["alpha", "beta gamma", ""]));
}

#[test]
fn test_order_survives_tiny_buffers() {
    let config = RuntimeConfig {
        channel_capacity: 1,
        pipe_capacity: 1,
        ..RuntimeConfig::default()
    };
    let values: Vec<Value> = (0..200).map(|i| Value::from(i.to_string())).collect();
    let (signals, output) = run(
        Harness::new(),
        &[("put", values.clone()), ("into-lines", vec![]), ("from-lines", vec![])],
        &config,
    );
    assert!(signals.iter().all(Signal::is_ok));
    assert_eq!(output.values, values);
}

#[test]
fn test_json_stream_then_unpack() {
    let harness = Harness::with_bytes(br#"["a", "b"] ["c"]"#);
    let (signals, output) = run(
        harness,
        &[("from-json", vec![]), ("unpack", vec![])],
        &RuntimeConfig::default(),
    );
    assert_eq!(signals, vec![Signal::Ok, Signal::Ok]);
    assert_eq!(output.values, strings(&["a", "b", "c"]));
}

#[test]
fn test_each_applies_builtins_per_value() {
    let double = Closure::from_fn(&["x"], |ctx, args| {
        call("*", ctx, vec![args[0].clone(), Value::from("2")])
    });
    let (signals, output) = run(
        Harness::new(),
        &[
            ("put", strings(&["1", "2.5", "-3"])),
            ("each", vec![Value::Closure(double)]),
        ],
        &RuntimeConfig::default(),
    );
    assert_eq!(signals, vec![Signal::Ok, Signal::Ok]);
    assert_eq!(output.values, strings(&["2", "5", "-6"]));
}

#[test]
fn test_each_break_ends_stage_cleanly() {
    let until_stop = Closure::from_fn(&["x"], |ctx, args| {
        if args[0] == Value::from("stop") {
            return Signal::Flow(Flow::Break);
        }
        call("put", ctx, args.to_vec())
    });
    let (signals, output) = run(
        Harness::new(),
        &[
            ("put", strings(&["a", "b", "stop", "c"])),
            ("each", vec![Value::Closure(until_stop)]),
        ],
        &RuntimeConfig::default(),
    );
    assert_eq!(signals[1], Signal::Ok);
    assert_eq!(output.values, strings(&["a", "b"]));
}

#[test]
fn test_failure_in_one_stage_is_reported_in_place() {
    let (signals, output) = run(
        Harness::new(),
        &[
            ("put", strings(&["x"])),
            ("failure", strings(&["boom"])),
            ("into-lines", vec![]),
        ],
        &RuntimeConfig::default(),
    );
    assert_eq!(signals[1], Signal::failure("boom"));
    assert_eq!(signals[2], Signal::Ok);
    assert_eq!(output.text, "");
}

#[test]
fn test_arithmetic_identities() {
    let cases: &[(&str, &[&str], &str)] = &[
        ("+", &[], "0"),
        ("*", &[], "1"),
        ("-", &["5"], "5"),
        ("+", &["4", "6"], "10"),
        ("-", &["10", "3", "2"], "5"),
        ("/", &["100", "2", "5"], "10"),
    ];
    for (name, args, expected) in cases {
        let mut harness = Harness::new();
        let builtin = registry().get(name).unwrap();
        assert_eq!(harness.call(builtin, strings(args)), Signal::Ok);
        assert_eq!(harness.finish().values, strings(&[*expected]), "{name} {args:?}");
    }
}
