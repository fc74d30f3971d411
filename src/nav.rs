//! Navigation handles — null-safe chained property access over [`Value`].
//!
//! A [`Nav`] either holds a borrow of a real value or is absent. Every
//! navigation step produces a fresh handle, so chains of arbitrary length
//! are always well-formed; absence propagates forward instead of failing.
//! Unwrapping is the only observing operation.

use tracing::trace;

use crate::model::Value;
use crate::path::{self, Segment};
use crate::{Error, Result};

/// Wrap a value in a navigation handle. Never fails.
pub fn wrap(value: &Value) -> Nav<'_> {
    Nav { target: Some(value), recv: None }
}

/// A safe-navigation handle.
///
/// `target` is the current raw value (`None` = absent). `recv` is the
/// pending receiver, populated only when the target is a callable that was
/// pulled off a parent value. It makes a later [`Nav::call`] execute as if
/// invoked on the parent, no matter where the handle traveled in between.
#[derive(Debug, Clone, Copy)]
pub struct Nav<'a> {
    target: Option<&'a Value>,
    recv: Option<&'a Value>,
}

impl<'a> Nav<'a> {
    /// The absent handle. Every navigation off it stays absent.
    pub fn absent() -> Nav<'static> {
        Nav { target: None, recv: None }
    }

    /// Navigate one property level deeper.
    ///
    /// `Null` targets navigate like absent ones: no lookup is attempted.
    /// When the child is callable, the current target is recorded as its
    /// receiver.
    pub fn get(self, key: &str) -> Nav<'a> {
        let parent = self.target.filter(|v| !v.is_null());
        let child = parent.and_then(|v| v.get(key));
        Nav {
            target: child,
            recv: child.filter(|c| c.is_callable()).and(parent),
        }
    }

    /// Navigate into a list element. Equivalent to `get` with the decimal
    /// rendering of `index`.
    pub fn at(self, index: usize) -> Nav<'a> {
        let parent = self.target.filter(|v| !v.is_null());
        let child = parent.and_then(|v| v.get_index(index));
        Nav {
            target: child,
            recv: child.filter(|c| c.is_callable()).and(parent),
        }
    }

    /// Apply one parsed path segment.
    pub fn step(self, segment: &Segment) -> Nav<'a> {
        match segment {
            Segment::Key(k) => self.get(k),
            Segment::Index(i) => self.at(*i),
        }
    }

    /// Navigate a textual path such as `a.b[2].c`.
    ///
    /// Fails only on malformed path syntax; absence still flows silently.
    pub fn at_path(self, path: &str) -> Result<Nav<'a>> {
        let segments = path::parse_path(path)?;
        Ok(segments.iter().fold(self, |nav, seg| nav.step(seg)))
    }

    /// Unwrap: the raw value this handle was navigated to, or `None` when
    /// the chain ran through something absent. Identity-preserving: the
    /// returned reference is the wrapped value itself.
    pub fn resolve(self) -> Option<&'a Value> {
        self.target
    }

    /// Unwrap into a concrete Rust type.
    pub fn resolve_as<T: FromValue>(self) -> Result<T> {
        match self.target {
            Some(val) => T::from_value(val),
            None => Err(Error::NotFound("absent value at end of navigation chain".into())),
        }
    }

    /// Invoke a callable target with the receiver it was pulled off of
    /// (`Null` for a callable that was wrapped directly).
    pub fn call(self, args: &[Value]) -> Result<Value> {
        match self.target {
            Some(Value::Func(f)) => {
                let recv = self.recv.unwrap_or(&Value::Null);
                trace!(func = %f, recv = recv.type_name(), "invoking callable target");
                f.invoke(recv, args)
            }
            other => Err(Error::NotCallable {
                got: other.map_or("NULL", |v| v.type_name()).into(),
            }),
        }
    }
}

impl Value {
    /// Shorthand for [`wrap`].
    pub fn nav(&self) -> Nav<'_> {
        wrap(self)
    }
}

// ============================================================================
// Typed extraction
// ============================================================================

/// Convert from a borrowed `Value` to concrete types.
pub trait FromValue: Sized {
    fn from_value(val: &Value) -> Result<Self>;
}

impl FromValue for i64 {
    fn from_value(val: &Value) -> Result<Self> {
        val.as_int().ok_or_else(|| Error::TypeError {
            expected: "INTEGER".into(),
            got: val.type_name().into(),
        })
    }
}

impl FromValue for f64 {
    fn from_value(val: &Value) -> Result<Self> {
        val.as_float().ok_or_else(|| Error::TypeError {
            expected: "FLOAT".into(),
            got: val.type_name().into(),
        })
    }
}

impl FromValue for bool {
    fn from_value(val: &Value) -> Result<Self> {
        val.as_bool().ok_or_else(|| Error::TypeError {
            expected: "BOOLEAN".into(),
            got: val.type_name().into(),
        })
    }
}

impl FromValue for String {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::String(s) => Ok(s.clone()),
            _ => Err(Error::TypeError {
                expected: "STRING".into(),
                got: val.type_name().into(),
            }),
        }
    }
}

impl FromValue for Value {
    fn from_value(val: &Value) -> Result<Self> {
        Ok(val.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Func;

    fn sample() -> Value {
        Value::from(vec![(
            "a",
            Value::from(vec![("b", Value::from(vec![("c", 42i64)]))]),
        )])
    }

    #[test]
    fn test_resolve_is_identity() {
        let v = Value::from(42);
        let resolved = wrap(&v).resolve().unwrap();
        assert!(std::ptr::eq(resolved, &v));
    }

    #[test]
    fn test_deep_presence() {
        let v = sample();
        assert_eq!(
            v.nav().get("a").get("b").get("c").resolve(),
            Some(&Value::Int(42))
        );
    }

    #[test]
    fn test_missing_intermediate_does_not_panic() {
        let v = sample();
        assert_eq!(v.nav().get("a").get("x").get("y").resolve(), None);
    }

    #[test]
    fn test_null_navigates_like_absent() {
        let v = Value::from(vec![("a", Value::Null)]);
        assert_eq!(v.nav().get("a").resolve(), Some(&Value::Null));
        assert_eq!(v.nav().get("a").get("b").resolve(), None);
        assert_eq!(Value::Null.nav().get("p").resolve(), None);
    }

    #[test]
    fn test_absent_handle_stays_absent() {
        assert_eq!(Nav::absent().get("p1").get("p2").get("p3").resolve(), None);
    }

    #[test]
    fn test_falsy_values_are_present() {
        let v = Value::from(vec![
            ("zero", Value::Int(0)),
            ("no", Value::Bool(false)),
            ("empty", Value::from("")),
        ]);
        assert_eq!(v.nav().get("zero").resolve(), Some(&Value::Int(0)));
        assert_eq!(v.nav().get("no").resolve(), Some(&Value::Bool(false)));
        assert_eq!(v.nav().get("empty").resolve(), Some(&Value::from("")));
    }

    #[test]
    fn test_fresh_wrap_sees_mutation() {
        let mut v = Value::from(vec![("a", 1i64)]);
        assert_eq!(v.nav().get("a").resolve_as::<i64>().unwrap(), 1);

        if let Value::Map(m) = &mut v {
            m.insert("a".into(), Value::Int(99));
        }
        assert_eq!(v.nav().get("a").resolve_as::<i64>().unwrap(), 99);
    }

    #[test]
    fn test_method_keeps_receiver() {
        let v = Value::from(vec![
            ("name", Value::from("x")),
            (
                "greet",
                Value::Func(Func::named("greet", |recv, _| {
                    Ok(recv.get("name").cloned().unwrap_or(Value::Null))
                })),
            ),
        ]);

        // Pull the method off and invoke later; the receiver survives.
        let method = v.nav().get("greet");
        assert_eq!(method.call(&[]).unwrap(), Value::from("x"));
    }

    #[test]
    fn test_unbound_func_gets_null_receiver() {
        let f = Value::Func(Func::new(|recv, _| Ok(Value::Bool(recv.is_null()))));
        assert_eq!(wrap(&f).call(&[]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_call_on_non_callable() {
        let v = Value::from(vec![("a", 1i64)]);
        let err = v.nav().get("a").call(&[]).unwrap_err();
        assert!(matches!(err, Error::NotCallable { got } if got == "INTEGER"));

        let err = v.nav().get("missing").call(&[]).unwrap_err();
        assert!(matches!(err, Error::NotCallable { got } if got == "NULL"));
    }

    #[test]
    fn test_resolve_as_errors() {
        let v = Value::from(vec![("a", "text")]);
        assert!(matches!(
            v.nav().get("a").resolve_as::<i64>(),
            Err(Error::TypeError { .. })
        ));
        assert!(matches!(
            v.nav().get("missing").resolve_as::<i64>(),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_list_index_as_property_name() {
        let v = Value::from(vec![("list", Value::from(vec![10i64, 20, 30]))]);
        assert_eq!(v.nav().get("list").get("1").resolve(), Some(&Value::Int(20)));
        assert_eq!(v.nav().get("list").at(1).resolve(), Some(&Value::Int(20)));
        assert_eq!(v.nav().get("list").get("9").resolve(), None);
        assert_eq!(v.nav().get("list").at(9).resolve(), None);
    }
}
