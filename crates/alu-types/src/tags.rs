use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tag keys attached to every generated profile.
pub mod keys {
    /// Catalog id of the source profile.
    pub const PROFILE_ID: &str = "profile_id";
    /// Display name of the profile type.
    pub const ALU_TYPE: &str = "alu_type";
    /// Standard code (`GB` / `EN`).
    pub const STANDARD: &str = "standard";
    /// Series tag.
    pub const SERIES: &str = "series";
    /// Segment length in millimeters.
    pub const LENGTH: &str = "length";
}

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Number(f64),
    Text(String),
}

impl TagValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TagValue::Number(n) => Some(*n),
            TagValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            TagValue::Number(_) => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Number(n) => write!(f, "{}", n),
            TagValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Number(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Text(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Text(value)
    }
}

/// Ordered key/value metadata for downstream bookkeeping (scene, BOM).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileTags(BTreeMap<String, TagValue>);

impl ProfileTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TagValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.0.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(TagValue::as_text)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(TagValue::as_number)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        let mut tags = ProfileTags::new();
        tags.insert(keys::PROFILE_ID, "GB-4040");
        tags.insert(keys::LENGTH, 1000.0);

        assert_eq!(tags.text(keys::PROFILE_ID), Some("GB-4040"));
        assert_eq!(tags.number(keys::LENGTH), Some(1000.0));
        assert_eq!(tags.number(keys::PROFILE_ID), None);
        assert!(!tags.contains_key(keys::SERIES));
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut tags = ProfileTags::new();
        tags.insert(keys::SERIES, "40");
        tags.insert(keys::LENGTH, 500.0);

        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"{"length":500.0,"series":"40"}"#);

        let back: ProfileTags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tags);
    }
}
