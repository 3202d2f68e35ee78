//! The value model flowing through ports
//!
//! Values are immutable once built. Containers are `Arc`-shared so that a
//! value can be handed to another pipeline stage without copying, and so
//! that every value is `Send + Sync`.

use crate::context::{Context, Env};
use crate::number::{format_float, format_rat, parse_rat};
use crate::signal::Signal;
use num_rational::BigRational;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// The runtime type of a value, as reported by `typeof`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Bool,
    Rat,
    List,
    Map,
    Fn,
}

impl TypeTag {
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Bool => "bool",
            TypeTag::Rat => "rat",
            TypeTag::List => "list",
            TypeTag::Map => "map",
            TypeTag::Fn => "fn",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Bool(bool),
    Rat(BigRational),
    List(List),
    Map(Map),
    Closure(Closure),
}

impl Value {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::String(_) => TypeTag::String,
            Value::Bool(_) => TypeTag::Bool,
            Value::Rat(_) => TypeTag::Rat,
            Value::List(_) => TypeTag::List,
            Value::Map(_) => TypeTag::Map,
            Value::Closure(_) => TypeTag::Fn,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical text: strings are themselves, everything else is its repr.
    pub fn to_text(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.repr(),
        }
    }

    /// Source-like representation, quoting strings where needed.
    pub fn repr(&self) -> String {
        match self {
            Value::String(s) => quote(s),
            Value::Bool(true) => "$true".to_string(),
            Value::Bool(false) => "$false".to_string(),
            Value::Rat(r) => format_rat(r),
            Value::List(list) => {
                let items: Vec<String> = list.iter().map(Value::repr).collect();
                format!("[{}]", items.join(" "))
            }
            Value::Map(map) => {
                if map.is_empty() {
                    return "[&]".to_string();
                }
                let mut entries: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("&{}={}", k.repr(), v.repr()))
                    .collect();
                entries.sort();
                format!("[{}]", entries.join(" "))
            }
            Value::Closure(_) => "<closure>".to_string(),
        }
    }

    /// Convert to an exact rational; strings are parsed, rats pass through.
    pub fn to_rat(&self) -> Result<BigRational, String> {
        match self {
            Value::Rat(r) => Ok(r.clone()),
            Value::String(s) => {
                parse_rat(s).ok_or_else(|| format!("cannot parse {} as rat", quote(s)))
            }
            other => Err(format!("cannot parse {} as rat", other.repr())),
        }
    }

    /// Build a value from a decoded JSON document. Numbers become strings in
    /// general float format.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::String(String::new()),
            serde_json::Value::Bool(b) => Value::Bool(b),
            // Numbers are read as 64-bit floats, like arithmetic operands.
            serde_json::Value::Number(n) => Value::String(
                n.as_f64()
                    .map(format_float)
                    .unwrap_or_else(|| n.to_string()),
            ),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

fn is_bare(c: char) -> bool {
    c.is_alphanumeric() || "-_./:%+,@!".contains(c)
}

fn quote(s: &str) -> String {
    if !s.is_empty() && s.chars().all(is_bare) {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "''"))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Rat(a), Value::Rat(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => a.same(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_tag().hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Rat(r) => r.hash(state),
            Value::List(list) => list.0.hash(state),
            // Entry order is unspecified; equal maps always have equal length.
            Value::Map(map) => map.len().hash(state),
            Value::Closure(c) => (Arc::as_ptr(&c.inner) as *const () as usize).hash(state),
        }
    }
}

/// An immutable, shared list of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List(Arc<Vec<Value>>);

impl List {
    pub fn new(items: Vec<Value>) -> Self {
        List(Arc::new(items))
    }
}

impl Deref for List {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        List::new(iter.into_iter().collect())
    }
}

impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        List::new(items)
    }
}

/// An immutable, shared mapping; insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Map(Arc<HashMap<Value, Value>>);

impl Map {
    pub fn new(entries: HashMap<Value, Value>) -> Self {
        Map(Arc::new(entries))
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(Value, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Map::new(iter.into_iter().collect())
    }
}

/// The executable part of a closure. The evaluator implements this for its
/// compiled blocks; plain Rust closures implement it too.
pub trait ClosureBody: Send + Sync {
    /// Run the body. Parameters are already bound in `ctx.env`; `args` holds
    /// the same values positionally.
    fn eval(&self, ctx: &mut Context, args: &[Value]) -> Signal;
}

impl<F> ClosureBody for F
where
    F: Fn(&mut Context, &[Value]) -> Signal + Send + Sync,
{
    fn eval(&self, ctx: &mut Context, args: &[Value]) -> Signal {
        self(ctx, args)
    }
}

struct ClosureInner {
    params: Vec<String>,
    body: Box<dyn ClosureBody>,
    captured: Env,
}

/// A user-defined function value: parameter names, a body and the
/// environment it was created in.
#[derive(Clone)]
pub struct Closure {
    inner: Arc<ClosureInner>,
}

impl Closure {
    pub fn new(params: Vec<String>, body: impl ClosureBody + 'static, captured: Env) -> Self {
        Closure {
            inner: Arc::new(ClosureInner {
                params,
                body: Box::new(body),
                captured,
            }),
        }
    }

    /// A closure over a fresh environment, mostly useful for hosts and tests.
    pub fn from_fn<F>(params: &[&str], body: F) -> Self
    where
        F: Fn(&mut Context, &[Value]) -> Signal + Send + Sync + 'static,
    {
        let params = params.iter().map(|p| p.to_string()).collect();
        Closure::new(params, body, Env::new())
    }

    pub fn params(&self) -> &[String] {
        &self.inner.params
    }

    /// Invoke the closure in `ctx`, which the caller has normally forked for
    /// this call. The context's environment is replaced by a child of the
    /// captured environment holding the parameter bindings.
    pub fn call(&self, ctx: &mut Context, args: Vec<Value>) -> Signal {
        let params = &self.inner.params;
        if params.len() != args.len() {
            return Signal::failure(format!(
                "arity mismatch: closure takes {} arguments, got {}",
                params.len(),
                args.len()
            ));
        }
        let scope = self.inner.captured.child();
        for (name, value) in params.iter().zip(&args) {
            scope.set(name, value.clone());
        }
        ctx.env = scope;
        self.inner.body.eval(ctx, &args)
    }

    /// Identity comparison; closures are never structurally equal.
    pub fn same(&self, other: &Closure) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.inner.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod value_tests;
