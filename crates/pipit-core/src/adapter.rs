//! Adapting typed Rust functions into uniform builtins
//!
//! A builtin body is an ordinary function whose first parameter is
//! `&mut Context` and whose result is a [`Signal`]:
//!
//! ```
//! use pipit_core::adapter::{Builtin, Rest};
//! use pipit_core::{Context, Signal};
//!
//! fn count(_ctx: &mut Context, label: String, nums: Rest<f64>) -> Signal {
//!     let _ = (label, nums.len());
//!     Signal::Ok
//! }
//!
//! let builtin = Builtin::variadic("count", count);
//! assert_eq!(builtin.signature().to_string(), "(text number...)");
//! ```
//!
//! Each remaining parameter implements [`Param`], which states its
//! [`ParamKind`] and how to coerce a [`Value`] into it. A trailing
//! [`Rest<T>`] collects a variadic tail. Functions of any other shape do not
//! implement [`FixedFn`] or [`VariadicFn`] and are rejected at compile time.
//!
//! At call time the argument count is checked against the [`Signature`],
//! then every argument is coerced, and only then is the body run. A failure
//! at either step is `arguments error` and the body never sees the call.

use crate::context::Context;
use crate::error::BuiltinError;
use crate::number::parse_float;
use crate::signal::Signal;
use crate::value::{Closure, List, Map, TypeTag, Value};
use num_rational::BigRational;
use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// What a declared parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Any value, converted to its canonical text.
    Text,
    /// A string holding a base-10 floating-point literal.
    Number,
    /// A value of the given type, or any value when `None`.
    Value(Option<TypeTag>),
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Text => f.write_str("text"),
            ParamKind::Number => f.write_str("number"),
            ParamKind::Value(None) => f.write_str("value"),
            ParamKind::Value(Some(tag)) => f.write_str(tag.name()),
        }
    }
}

/// A builtin parameter type.
pub trait Param: Sized + 'static {
    const KIND: ParamKind;

    fn coerce(value: Value) -> Option<Self>;
}

impl Param for String {
    const KIND: ParamKind = ParamKind::Text;

    fn coerce(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            other => Some(other.to_text()),
        }
    }
}

impl Param for f64 {
    const KIND: ParamKind = ParamKind::Number;

    fn coerce(value: Value) -> Option<Self> {
        parse_float(value.as_str()?)
    }
}

impl Param for Value {
    const KIND: ParamKind = ParamKind::Value(None);

    fn coerce(value: Value) -> Option<Self> {
        Some(value)
    }
}

macro_rules! impl_value_param {
    ($ty:ty, $tag:ident) => {
        impl Param for $ty {
            const KIND: ParamKind = ParamKind::Value(Some(TypeTag::$tag));

            fn coerce(value: Value) -> Option<Self> {
                match value {
                    Value::$tag(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_value_param!(bool, Bool);
impl_value_param!(BigRational, Rat);
impl_value_param!(List, List);
impl_value_param!(Map, Map);

impl Param for Closure {
    const KIND: ParamKind = ParamKind::Value(Some(TypeTag::Fn));

    fn coerce(value: Value) -> Option<Self> {
        match value {
            Value::Closure(closure) => Some(closure),
            _ => None,
        }
    }
}

/// The variadic tail of a builtin's parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Rest<T>(pub Vec<T>);

impl<T> Deref for Rest<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> IntoIterator for Rest<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Declared parameter kinds of a builtin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub required: Vec<ParamKind>,
    pub variadic: Option<ParamKind>,
}

impl Signature {
    /// The signature of a builtin that inspects its arguments itself.
    pub fn raw() -> Self {
        Signature {
            required: Vec::new(),
            variadic: Some(ParamKind::Value(None)),
        }
    }

    pub fn required_args(&self) -> usize {
        self.required.len()
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    pub fn accepts(&self, count: usize) -> bool {
        if self.is_variadic() {
            count >= self.required_args()
        } else {
            count == self.required_args()
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.required.iter().map(ToString::to_string).collect();
        if let Some(kind) = self.variadic {
            parts.push(format!("{kind}..."));
        }
        write!(f, "({})", parts.join(" "))
    }
}

/// Functions of shape `Fn(&mut Context, P1, .., Pn) -> Signal`.
///
/// `invoke` returns `None` when an argument fails coercion; the count has
/// already been checked by the caller.
pub trait FixedFn<Marker>: Send + Sync + 'static {
    fn signature() -> Signature;

    fn invoke(&self, ctx: &mut Context, args: Vec<Value>) -> Option<Signal>;
}

/// Functions of shape `Fn(&mut Context, P1, .., Pn, Rest<V>) -> Signal`.
pub trait VariadicFn<Marker>: Send + Sync + 'static {
    fn signature() -> Signature;

    fn invoke(&self, ctx: &mut Context, args: Vec<Value>) -> Option<Signal>;
}

macro_rules! impl_fixed_fn {
    ($($ty:ident $arg:ident),*) => {
        impl<Func, $($ty,)*> FixedFn<fn($($ty,)*)> for Func
        where
            Func: Fn(&mut Context, $($ty),*) -> Signal + Send + Sync + 'static,
            $($ty: Param,)*
        {
            fn signature() -> Signature {
                Signature {
                    required: vec![$($ty::KIND),*],
                    variadic: None,
                }
            }

            #[allow(unused_mut, unused_variables)]
            fn invoke(&self, ctx: &mut Context, args: Vec<Value>) -> Option<Signal> {
                let mut args = args.into_iter();
                $(let $arg = $ty::coerce(args.next()?)?;)*
                Some((self)(ctx, $($arg),*))
            }
        }
    };
}

macro_rules! impl_variadic_fn {
    ($($ty:ident $arg:ident),*) => {
        impl<Func, $($ty,)* V> VariadicFn<fn($($ty,)* Rest<V>)> for Func
        where
            Func: Fn(&mut Context, $($ty,)* Rest<V>) -> Signal + Send + Sync + 'static,
            $($ty: Param,)*
            V: Param,
        {
            fn signature() -> Signature {
                Signature {
                    required: vec![$($ty::KIND),*],
                    variadic: Some(V::KIND),
                }
            }

            #[allow(unused_mut)]
            fn invoke(&self, ctx: &mut Context, args: Vec<Value>) -> Option<Signal> {
                let mut args = args.into_iter();
                $(let $arg = $ty::coerce(args.next()?)?;)*
                let rest = args.map(V::coerce).collect::<Option<Vec<V>>>()?;
                Some((self)(ctx, $($arg,)* Rest(rest)))
            }
        }
    };
}

impl_fixed_fn!();
impl_fixed_fn!(A a);
impl_fixed_fn!(A a, B b);
impl_fixed_fn!(A a, B b, C c);
impl_fixed_fn!(A a, B b, C c, D d);

impl_variadic_fn!();
impl_variadic_fn!(A a);
impl_variadic_fn!(A a, B b);

type Invoker = Arc<dyn Fn(&mut Context, Vec<Value>) -> Option<Signal> + Send + Sync>;

/// A named builtin with the uniform `(Context, arguments) -> Signal` shape.
#[derive(Clone)]
pub struct Builtin {
    name: String,
    signature: Signature,
    invoker: Invoker,
}

impl Builtin {
    /// Adapt a function with a fixed parameter list.
    pub fn fixed<M, F: FixedFn<M>>(name: &str, func: F) -> Self {
        Builtin {
            name: name.to_string(),
            signature: F::signature(),
            invoker: Arc::new(move |ctx: &mut Context, args: Vec<Value>| func.invoke(ctx, args)),
        }
    }

    /// Adapt a function whose last parameter is a [`Rest`] tail.
    pub fn variadic<M, F: VariadicFn<M>>(name: &str, func: F) -> Self {
        Builtin {
            name: name.to_string(),
            signature: F::signature(),
            invoker: Arc::new(move |ctx: &mut Context, args: Vec<Value>| func.invoke(ctx, args)),
        }
    }

    /// Wrap a function that takes its arguments uncoerced.
    pub fn raw<F>(name: &str, func: F) -> Self
    where
        F: Fn(&mut Context, Vec<Value>) -> Signal + Send + Sync + 'static,
    {
        Builtin {
            name: name.to_string(),
            signature: Signature::raw(),
            invoker: Arc::new(move |ctx: &mut Context, args: Vec<Value>| Some(func(ctx, args))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Check the argument count, coerce, then run the body. A panic in the
    /// body is reported as a failure.
    pub fn call(&self, ctx: &mut Context, args: Vec<Value>) -> Signal {
        if !self.signature.accepts(args.len()) {
            tracing::debug!(
                builtin = %self.name,
                expected = %self.signature,
                got = args.len(),
                "argument count mismatch"
            );
            return BuiltinError::Arguments.into();
        }
        tracing::debug!(builtin = %self.name, context = %ctx.name(), "calling builtin");

        let invoker = &self.invoker;
        match panic::catch_unwind(AssertUnwindSafe(|| invoker(ctx, args))) {
            Ok(Some(signal)) => signal,
            Ok(None) => {
                tracing::debug!(builtin = %self.name, "argument coercion failed");
                BuiltinError::Arguments.into()
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(builtin = %self.name, %message, "builtin panicked");
                Signal::failure(format!("{} panicked: {message}", self.name))
            }
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod adapter_tests;
