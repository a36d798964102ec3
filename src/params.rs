//! Per-call request parameters and the query value model.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A query parameter value before serialization
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Omitted from the query string
    Null,
    Scalar(String),
    /// Serialized as the key repeated once per element
    Array(Vec<QueryValue>),
    /// Serialized as `key[sub]=value` for each entry
    Map(Vec<(String, QueryValue)>),
}

impl QueryValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Flatten into `(key, value)` pairs, dropping nulls and keeping order
    pub fn flatten_into(&self, key: &str, out: &mut Vec<(String, String)>) {
        match self {
            Self::Null => {}
            Self::Scalar(value) => out.push((key.to_string(), value.clone())),
            Self::Array(items) => {
                for item in items {
                    item.flatten_into(key, out);
                }
            }
            Self::Map(entries) => {
                for (sub, value) in entries {
                    value.flatten_into(&format!("{}[{}]", key, sub), out);
                }
            }
        }
    }
}

/// Conversion of a typed value into a [`QueryValue`]
pub trait QueryParam {
    fn to_query_value(&self) -> QueryValue;
}

macro_rules! scalar_query_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryParam for $ty {
                fn to_query_value(&self) -> QueryValue {
                    QueryValue::Scalar(self.to_string())
                }
            }
        )*
    };
}

scalar_query_param!(String, str, bool, u8, u16, u32, u64, i32, i64, f64);

impl QueryParam for DateTime<Utc> {
    fn to_query_value(&self) -> QueryValue {
        QueryValue::Scalar(self.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl<T: QueryParam + ?Sized> QueryParam for &T {
    fn to_query_value(&self) -> QueryValue {
        (**self).to_query_value()
    }
}

impl<T: QueryParam> QueryParam for Option<T> {
    fn to_query_value(&self) -> QueryValue {
        match self {
            Some(value) => value.to_query_value(),
            None => QueryValue::Null,
        }
    }
}

impl<T: QueryParam> QueryParam for Vec<T> {
    fn to_query_value(&self) -> QueryValue {
        self.as_slice().to_query_value()
    }
}

impl<T: QueryParam> QueryParam for [T] {
    fn to_query_value(&self) -> QueryValue {
        QueryValue::Array(self.iter().map(QueryParam::to_query_value).collect())
    }
}

impl<T: QueryParam> QueryParam for BTreeMap<String, T> {
    fn to_query_value(&self) -> QueryValue {
        QueryValue::Map(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_query_value()))
                .collect(),
        )
    }
}

impl<T: QueryParam> QueryParam for HashMap<String, T> {
    fn to_query_value(&self) -> QueryValue {
        let mut entries: Vec<_> = self
            .iter()
            .map(|(key, value)| (key.clone(), value.to_query_value()))
            .collect();
        // HashMap order is unstable; sort so identical calls build identical URLs.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        QueryValue::Map(entries)
    }
}

impl QueryParam for QueryValue {
    fn to_query_value(&self) -> QueryValue {
        self.clone()
    }
}

/// Implements [`QueryParam`] for enums that have an `as_str` wire name
#[macro_export]
macro_rules! wire_name_query_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::params::QueryParam for $ty {
                fn to_query_value(&self) -> $crate::params::QueryValue {
                    $crate::params::QueryValue::Scalar(self.as_str().to_string())
                }
            }
        )*
    };
}

/// Parameters supplied for one call.
///
/// Path values are kept as given and percent-encoded when the URL is built.
/// Query values keep insertion order. An empty path value counts as missing.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    pub(crate) path: Vec<(&'static str, String)>,
    pub(crate) query: Vec<(&'static str, QueryValue)>,
    pub(crate) body: Option<serde_json::Value>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a path placeholder value
    pub fn path(mut self, name: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.path.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.path.push((name, value)),
        }
        self
    }

    /// Add a query parameter; `None`/null values are kept but never serialized
    pub fn query(mut self, name: &'static str, value: impl QueryParam) -> Self {
        let value = value.to_query_value();
        match self.query.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.query.push((name, value)),
        }
        self
    }

    /// Attach a JSON body
    pub fn body<T: Serialize + ?Sized>(mut self, body: &T) -> crate::error::PolarResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub(crate) fn path_value(&self, name: &str) -> Option<&str> {
        self.path
            .iter()
            .find(|(existing, value)| *existing == name && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn has_query(&self, name: &str) -> bool {
        self.query
            .iter()
            .any(|(existing, value)| *existing == name && !value.is_null())
    }

    /// Query pairs in serialization order, nulls dropped
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, value) in &self.query {
            value.flatten_into(name, &mut pairs);
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn null_values_are_dropped() {
        let params = RequestParams::new()
            .query("query", None::<String>)
            .query("page", 2u32)
            .query("sorting", None::<Vec<String>>);

        assert_eq!(params.query_pairs(), vec![("page".to_string(), "2".to_string())]);
        assert!(!params.has_query("query"));
    }

    #[test]
    fn arrays_repeat_the_key_in_order() {
        let params = RequestParams::new().query("sorting", vec!["-created_at", "name", "amount"]);

        let pairs = params.query_pairs();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|(key, _)| key == "sorting"));
        assert_eq!(
            pairs.iter().map(|(_, v)| v.as_str()).collect::<Vec<_>>(),
            vec!["-created_at", "name", "amount"]
        );
    }

    #[test]
    fn maps_use_bracketed_keys() {
        let mut metadata = BTreeMap::new();
        metadata.insert("plan".to_string(), vec!["pro".to_string(), "team".to_string()]);
        metadata.insert("region".to_string(), vec!["eu".to_string()]);

        let pairs = RequestParams::new().query("metadata", metadata).query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("metadata[plan]".to_string(), "pro".to_string()),
                ("metadata[plan]".to_string(), "team".to_string()),
                ("metadata[region]".to_string(), "eu".to_string()),
            ]
        );
    }

    #[test]
    fn timestamps_are_rfc3339_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();
        assert_eq!(
            ts.to_query_value(),
            QueryValue::Scalar("2024-01-31T12:00:00.000Z".to_string())
        );
    }

    #[test]
    fn setting_a_parameter_twice_keeps_the_last_value() {
        let params = RequestParams::new().path("id", "a").path("id", "b").query("page", 1u32).query("page", 3u32);

        assert_eq!(params.path_value("id"), Some("b"));
        assert_eq!(params.query_pairs(), vec![("page".to_string(), "3".to_string())]);
    }

    #[test]
    fn empty_path_value_counts_as_missing() {
        let params = RequestParams::new().path("id", "");
        assert_eq!(params.path_value("id"), None);
    }
}
