//! Map — the string-keyed container behind `Value::Map`.

use std::collections::HashMap;
use super::Value;

/// A map of property names to values.
pub type Map = HashMap<String, Value>;

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

/// Convert a list of (key, value) pairs into a map value.
impl<K, V> From<Vec<(K, V)>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        Value::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
