//! Func — a native callable value with an explicit receiver.

use std::fmt;
use std::sync::Arc;

use crate::Result;
use super::Value;

/// Signature of a native function: receiver first, then positional arguments.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value> + Send + Sync;

/// A callable value.
///
/// The receiver is supplied explicitly at every invocation. Navigation
/// records the parent value a function was pulled off of and passes it back
/// in at call time; an unbound call receives `Value::Null`.
#[derive(Clone)]
pub struct Func {
    name: Option<String>,
    f: Arc<NativeFn>,
}

impl Func {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self { name: None, f: Arc::new(f) }
    }

    pub fn named<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self { name: Some(name.into()), f: Arc::new(f) }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invoke with an explicit receiver.
    pub fn invoke(&self, recv: &Value, args: &[Value]) -> Result<Value> {
        (self.f)(recv, args)
    }
}

/// Equality is identity of the underlying closure, not structure.
impl PartialEq for Func {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Func({name})"),
            None => write!(f, "Func(<anonymous>)"),
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<fn {name}>"),
            None => write!(f, "<fn>"),
        }
    }
}
