//! JSON interop — conversions between [`Value`] and `serde_json::Value`.
//!
//! JSON → `Value` is lossless. The reverse is lossy where JSON has no
//! counterpart: callables and non-finite floats map to null, bytes to
//! number arrays, temporal values to ISO-8601 strings. The serde impls
//! delegate to these conversions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

use crate::model::Value;

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    // arbitrary-precision numbers with no f64 rendering
                    Value::Null
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(a) => {
                Value::List(a.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(o) => {
                Value::Map(o.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl Value {
    /// Render as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => (*b).into(),
            Value::Int(i) => (*i).into(),
            Value::Float(f) => {
                Number::from_f64(*f).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            Value::String(s) => s.clone().into(),
            Value::Bytes(b) => b.iter().map(|&x| serde_json::Value::from(x)).collect(),
            Value::List(l) => l.iter().map(Value::to_json).collect(),
            Value::Map(m) => serde_json::Value::Object(
                m.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Func(_) => serde_json::Value::Null,
            Value::Date(d) => d.format("%Y-%m-%d").to_string().into(),
            Value::DateTime(dt) => dt.to_rfc3339().into(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Func;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let v: Value = json!({"a": [1, 2.5, null, true, "s"]}).into();
        assert_eq!(v.get("a").unwrap().get("0"), Some(&Value::Int(1)));
        assert_eq!(v.get("a").unwrap().get("1"), Some(&Value::Float(2.5)));
        assert_eq!(v.get("a").unwrap().get("2"), Some(&Value::Null));
        assert_eq!(v.get("a").unwrap().get("3"), Some(&Value::Bool(true)));
        assert_eq!(v.get("a").unwrap().get("4"), Some(&Value::from("s")));
    }

    #[test]
    fn test_json_roundtrip() {
        let doc = json!({"user": {"name": "Ada", "tags": ["a", "b"], "age": 3}});
        let v: Value = doc.clone().into();
        assert_eq!(v.to_json(), doc);
    }

    #[test]
    fn test_func_serializes_as_null() {
        let v = Value::from(vec![("f", Value::Func(Func::new(|_, _| Ok(Value::Null))))]);
        assert_eq!(v.to_json(), json!({"f": null}));
    }

    #[test]
    fn test_bytes_and_nonfinite_floats() {
        assert_eq!(Value::Bytes(vec![1, 2]).to_json(), json!([1, 2]));
        assert_eq!(Value::Float(f64::NAN).to_json(), json!(null));
        assert_eq!(Value::Float(f64::INFINITY).to_json(), json!(null));
    }

    #[test]
    fn test_serde_impls_delegate() {
        let v: Value = serde_json::from_str(r#"{"a": 1}"#).unwrap();
        assert_eq!(v.get("a"), Some(&Value::Int(1)));
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"{"a":1}"#);
    }
}
