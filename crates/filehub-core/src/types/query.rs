//! Query parameter maps for request URLs.

use serde_json::{Map, Value};

/// Query parameters attached to a request URL.
///
/// Keys map to scalar JSON values. Entries whose value is `null` are kept in
/// the map but are dropped when the URL is built, so optional filters can be
/// inserted unconditionally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Map<String, Value>);

impl QueryParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any previous value for `key`.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert an optional parameter; `None` is stored as `null`.
    pub fn insert_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        let value = value.map(Into::into).unwrap_or(Value::Null);
        self.insert(key, value)
    }

    /// Whether the map has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the entries that should appear in a query string, rendered as
    /// text. Strings are used verbatim; other scalars use their JSON text.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, String)> {
        self.0.iter().filter_map(|(key, value)| {
            let rendered = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.as_str(), rendered))
        })
    }
}

impl From<Map<String, Value>> for QueryParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_entries_are_skipped() {
        let params = QueryParams::new()
            .insert("a", 1)
            .insert("b", Value::Null)
            .insert_opt::<String>("c", None);

        let pairs: Vec<_> = params.pairs().collect();
        assert_eq!(pairs, vec![("a", "1".to_string())]);
        assert!(!params.is_empty());
    }

    #[test]
    fn test_scalars_render_as_text() {
        let params = QueryParams::new()
            .insert("keyword", "report q1")
            .insert("readOnly", true)
            .insert("size", 2.5);

        let mut pairs: Vec<_> = params.pairs().collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("keyword", "report q1".to_string()),
                ("readOnly", "true".to_string()),
                ("size", "2.5".to_string()),
            ]
        );
    }
}
