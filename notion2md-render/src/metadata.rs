//! Page properties projected to frontmatter.

use crate::error::ConvertError;
use crate::node::{Node, Page};
use crate::options::RenderOptions;
use crate::render::Converter;
use serde::ser::{Serialize, Serializer};

/// Rendered page properties, in property order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
    title_key: Option<String>,
}

impl Metadata {
    /// Renders every property of `page` with the metadata list delimiter.
    ///
    /// Properties that render empty are dropped, as are values left empty once
    /// the configured characters are stripped.
    pub fn from_page(page: &Page, options: &RenderOptions) -> Result<Self, ConvertError> {
        let mut entries = Vec::with_capacity(page.properties.len());
        for (key, value) in &page.properties {
            // Fresh converter per property: marks never leak between values.
            let mut converter = Converter::for_metadata(options);
            let rendered = converter.render_leaf(&Node::from(value))?;
            let cleaned = clean_value(&rendered, &options.strip_meta_chars);
            if cleaned.is_empty() {
                continue;
            }
            entries.push((key.clone(), cleaned));
        }

        let title_key = page
            .title_property()
            .filter(|key| entries.iter().any(|(name, _)| name == key))
            .map(str::to_string);

        Ok(Self { entries, title_key })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendered value of the title property, if the page has one
    pub fn title(&self) -> Option<&str> {
        self.title_key.as_deref().and_then(|key| self.get(key))
    }

    /// `---` delimited `key: value` lines; empty when there are no entries
    pub fn to_frontmatter(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let mut out = String::from("---\n");
        for (key, value) in &self.entries {
            out.push_str(&format!("{key}: {value}\n"));
        }
        out.push_str("---\n");
        out
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

// Frontmatter values are single-line.
fn clean_value(value: &str, strip: &str) -> String {
    value
        .lines()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| !strip.contains(*c))
        .collect()
}
