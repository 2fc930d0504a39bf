//! Ordered open attribute bag.
//!
//! Instances and step executions carry arbitrary key/value data next to
//! their typed fields. The bag is an explicitly ordered sequence of pairs,
//! and mapping-valued attributes keep document order as well (`serde_json`
//! is built with `preserve_order`), so "first occurrence wins" rules and
//! per-entry side-effect ordering are deterministic.

use provlite_shared::errors::{ProvliteError, ProvliteResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open key/value attribute data with stable iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataBag(Vec<(String, Value)>);

impl DataBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: Vec<(String, Value)>) -> Self {
        Self(pairs)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Raw value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Set a value, replacing an existing entry in place.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Boolean attribute, or `None` when absent or not a boolean.
    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// String-list attribute. Absent resolves to `None`; present entries
    /// must all be strings.
    pub fn string_list(&self, key: &str) -> ProvliteResult<Option<Vec<String>>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let items = as_array(key, value)?;
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let s = item.as_str().ok_or_else(|| {
                ProvliteError::Config(format!("field '{}': entry {} is not a string", key, item))
            })?;
            out.push(s.to_string());
        }
        Ok(Some(out))
    }

    /// Id-list attribute. Null entries are preserved as `None` slots;
    /// non-null entries must be integral numbers.
    pub fn id_list(&self, key: &str) -> ProvliteResult<Option<Vec<Option<i64>>>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let items = as_array(key, value)?;
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            if item.is_null() {
                out.push(None);
                continue;
            }
            let id = item.as_i64().ok_or_else(|| {
                ProvliteError::Config(format!("field '{}': entry {} is not a numeric id", key, item))
            })?;
            out.push(Some(id));
        }
        Ok(Some(out))
    }

    /// String-map attribute as ordered pairs. Values must be strings.
    pub fn string_pairs(&self, key: &str) -> ProvliteResult<Option<Vec<(String, String)>>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let entries = as_object(key, value)?;
        let mut out = Vec::with_capacity(entries.len());
        for (k, v) in entries {
            let s = v.as_str().ok_or_else(|| {
                ProvliteError::Config(format!(
                    "field '{}': value for '{}' is not a string",
                    key, k
                ))
            })?;
            out.push((k.clone(), s.to_string()));
        }
        Ok(Some(out))
    }

    /// Mount-map attribute as ordered (path, volume id) pairs. A value that
    /// is not an integral number is a fatal input error.
    pub fn mount_pairs(&self, key: &str) -> ProvliteResult<Option<Vec<(String, i64)>>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let entries = as_object(key, value)?;
        let mut out = Vec::with_capacity(entries.len());
        for (path, v) in entries {
            let id = v.as_i64().ok_or_else(|| {
                ProvliteError::Config(format!(
                    "field '{}': volume id {} for '{}' is not numeric",
                    key, v, path
                ))
            })?;
            out.push((path.clone(), id));
        }
        Ok(Some(out))
    }
}

fn as_array<'a>(key: &str, value: &'a Value) -> ProvliteResult<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| ProvliteError::Config(format!("field '{}' is not a list", key)))
}

fn as_object<'a>(key: &str, value: &'a Value) -> ProvliteResult<&'a serde_json::Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ProvliteError::Config(format!("field '{}' is not a map", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_replaces_in_place() {
        let mut bag = DataBag::new();
        bag.set("a", json!(1));
        bag.set("b", json!(2));
        bag.set("a", json!(3));

        let keys: Vec<&str> = bag.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(bag.get("a"), Some(&json!(3)));
    }

    #[test]
    fn test_bool_field_absent_and_wrong_type() {
        let mut bag = DataBag::new();
        assert_eq!(bag.bool_field("startOnCreate"), None);

        bag.set("startOnCreate", json!("yes"));
        assert_eq!(bag.bool_field("startOnCreate"), None);

        bag.set("startOnCreate", json!(false));
        assert_eq!(bag.bool_field("startOnCreate"), Some(false));
    }

    #[test]
    fn test_id_list_preserves_null_slots() {
        let mut bag = DataBag::new();
        bag.set("networkIds", json!([1, null, 2]));

        let ids = bag.id_list("networkIds").unwrap().unwrap();
        assert_eq!(ids, vec![Some(1), None, Some(2)]);
    }

    #[test]
    fn test_id_list_rejects_non_numeric() {
        let mut bag = DataBag::new();
        bag.set("networkIds", json!([1, "two"]));

        let err = bag.id_list("networkIds").unwrap_err();
        assert!(err.to_string().contains("not a numeric id"));
    }

    #[test]
    fn test_mount_pairs_keeps_document_order() {
        let mut bag = DataBag::new();
        bag.set("dataVolumeMounts", json!({"/z": 9, "/a": 3}));

        let mounts = bag.mount_pairs("dataVolumeMounts").unwrap().unwrap();
        assert_eq!(mounts, vec![("/z".to_string(), 9), ("/a".to_string(), 3)]);
    }

    #[test]
    fn test_mount_pairs_rejects_non_numeric_id() {
        let mut bag = DataBag::new();
        bag.set("dataVolumeMounts", json!({"/data": "vol-7"}));

        let err = bag.mount_pairs("dataVolumeMounts").unwrap_err();
        assert!(err.to_string().contains("is not numeric"));
    }

    #[test]
    fn test_string_pairs_keeps_document_order() {
        let mut bag = DataBag::new();
        bag.set("labels", json!({"env": "prod", "tier": "web"}));

        let labels = bag.string_pairs("labels").unwrap().unwrap();
        assert_eq!(
            labels,
            vec![
                ("env".to_string(), "prod".to_string()),
                ("tier".to_string(), "web".to_string()),
            ]
        );
    }
}
