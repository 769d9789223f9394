use super::normalize_id;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A page object: its identifier and its property map
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Page {
    /// Reads a page object, tolerating a missing id or property map
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            properties: value
                .get("properties")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub fn normalized_id(&self) -> String {
        normalize_id(&self.id)
    }

    /// Name of the property holding the page title.
    ///
    /// `Name` (databases) and `title` (standalone pages) win; otherwise the first
    /// property whose `type` is `title`.
    pub fn title_property(&self) -> Option<&str> {
        ["Name", "title"]
            .into_iter()
            .find(|key| self.properties.contains_key(*key))
            .or_else(|| {
                self.properties
                    .iter()
                    .find(|(_, value)| value.get("type").and_then(Value::as_str) == Some("title"))
                    .map(|(key, _)| key.as_str())
            })
    }
}
