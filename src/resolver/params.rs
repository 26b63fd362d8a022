use std::collections::HashMap;

use serde_json::Value;

use crate::error::SsoError;

/// Request parameters already parsed by the HTTP layer.
///
/// Empty values count as absent.
#[derive(Debug, Clone, Default)]
pub struct RequestParams(HashMap<String, String>);

impl RequestParams {
    pub fn from_query(query: HashMap<String, String>) -> Self {
        Self(query)
    }

    /// Flatten a JSON object body. Strings are taken as-is, numbers and
    /// booleans are stringified, anything else is dropped.
    pub fn from_json(body: &Value) -> Self {
        let map = body
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| {
                        let v = match v {
                            Value::String(s) => s.clone(),
                            Value::Number(n) => n.to_string(),
                            Value::Bool(b) => b.to_string(),
                            _ => return None,
                        };
                        Some((k.clone(), v))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self(map)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// All of `names`, or one error listing every missing name.
    pub fn require_all<const N: usize>(&self, names: [&str; N]) -> Result<[&str; N], SsoError> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| self.get(n).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(SsoError::MissingParameter(missing.join(", ")));
        }
        Ok(names.map(|n| self.get(n).unwrap_or_default()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
