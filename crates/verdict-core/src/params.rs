//! Parameter sets supplied to a single evaluation

use crate::error::{CoreError, Result};
use crate::types::{Value, ValueType};
use std::collections::{BTreeMap, HashMap};

/// Named, typed inputs for one evaluation.
///
/// Keys are kept ordered so enumeration is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Untyped lookup
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Lookup that checks the stored type tag against the expected one
    pub fn get_typed(&self, name: &str, expected: ValueType) -> Result<&Value> {
        self.lookup(name, expected, Some)
    }

    pub fn get_string(&self, name: &str) -> Result<&str> {
        self.lookup(name, ValueType::String, Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        self.lookup(name, ValueType::Bool, Value::as_bool)
    }

    pub fn get_int64(&self, name: &str) -> Result<i64> {
        self.lookup(name, ValueType::Int64, Value::as_int64)
    }

    pub fn get_float64(&self, name: &str) -> Result<f64> {
        self.lookup(name, ValueType::Float64, Value::as_float64)
    }

    fn lookup<'a, T>(
        &'a self,
        name: &str,
        expected: ValueType,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| CoreError::ParamNotFound(name.to_string()))?;
        let actual = value.value_type();
        if actual != expected {
            return Err(CoreError::ParamTypeMismatch {
                name: name.to_string(),
                expected,
                actual,
            });
        }
        extract(value).ok_or(CoreError::ParamTypeMismatch {
            name: name.to_string(),
            expected,
            actual,
        })
    }

    /// Parameter names in lexicographic order
    pub fn keys(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    /// Canonical string of the named value, for logging and fingerprints
    pub fn encode_value(&self, name: &str) -> Result<String> {
        self.values
            .get(name)
            .map(Value::to_canonical_string)
            .ok_or_else(|| CoreError::ParamNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<HashMap<String, Value>> for Params {
    fn from(map: HashMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, Value>> for Params {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }
}

/// Build a [`Params`] from `name => value` pairs.
///
/// ```
/// use verdict_core::params;
/// let p = params! { "product-id" => "fr-paris", "age" => 42i64 };
/// assert_eq!(p.get_int64("age").unwrap(), 42);
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::Params::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $( params.insert($name, $value); )+
        params
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_typed_getters() {
        let p = params! {
            "name" => "bob",
            "admin" => true,
            "age" => 42i64,
            "score" => 0.5,
        };
        assert_eq!(p.get_string("name").unwrap(), "bob");
        assert!(p.get_bool("admin").unwrap());
        assert_eq!(p.get_int64("age").unwrap(), 42);
        assert_eq!(p.get_float64("score").unwrap(), 0.5);
    }

    #[test]
    fn test_missing_param() {
        let p = Params::new();
        let err = p.get_string("name").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParamNotFound);
    }

    #[test]
    fn test_wrong_type() {
        let p = params! { "age" => "forty" };
        let err = p.get_int64("age").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParamTypeMismatch);
        assert_eq!(
            err,
            CoreError::ParamTypeMismatch {
                name: "age".into(),
                expected: ValueType::Int64,
                actual: ValueType::String,
            }
        );
    }

    #[test]
    fn test_keys_are_sorted() {
        let p = params! { "zeta" => 1i64, "alpha" => 2i64, "mid" => 3i64 };
        assert_eq!(p.keys(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_encode_value() {
        let p = params! { "ratio" => 0.25, "flag" => false, "name" => "x y" };
        assert_eq!(p.encode_value("ratio").unwrap(), "0.25");
        assert_eq!(p.encode_value("flag").unwrap(), "false");
        assert_eq!(p.encode_value("name").unwrap(), "x y");
        assert!(p.encode_value("nope").is_err());
    }

    #[test]
    fn test_from_hash_map() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), Value::Int64(1));
        let p = Params::from(map);
        assert_eq!(p.len(), 1);
        assert_eq!(p.get("a"), Some(&Value::Int64(1)));
    }
}
