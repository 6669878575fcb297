//! Preview record attached to an editable file widget.
//!
//! The record comes from whatever assembled the form (usually the object being
//! edited) and is trusted only loosely: a field with a wrong JSON type is treated
//! as missing, and a record missing any field simply disables the preview. Parsing
//! a preview never fails.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of the object owning the uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ObjectId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Number(n) => write!(f, "{}", n),
            ObjectId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewData {
    /// Whether the owning object has not been saved yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    /// Sub-directory of the upload directory holding the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_dir: Option<String>,
    /// Stored file name, empty when nothing was uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    /// Route namespace handling the `removeImage` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
}

/// A preview record with all five fields present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletePreview<'a> {
    pub is_new: bool,
    pub img_dir: &'a str,
    pub value: &'a str,
    pub object_id: &'a ObjectId,
    pub module_name: &'a str,
}

impl CompletePreview<'_> {
    /// True when the record points at an already stored file of a saved object.
    pub fn shows_existing_file(&self) -> bool {
        !self.is_new && !self.value.is_empty()
    }
}

impl PreviewData {
    /// Reads a preview record out of an arbitrary JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value.as_object() {
            Some(map) => Self::from_map(map),
            None => Self::default(),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            is_new: map.get("isNew").and_then(flag),
            img_dir: map.get("imgDir").and_then(text),
            value: map.get("value").and_then(file_name),
            object_id: map.get("objectId").and_then(object_id),
            module_name: map.get("moduleName").and_then(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.is_new.is_none()
            && self.img_dir.is_none()
            && self.value.is_none()
            && self.object_id.is_none()
            && self.module_name.is_none()
    }

    /// Returns the record only when every field is present.
    pub fn complete(&self) -> Option<CompletePreview<'_>> {
        Some(CompletePreview {
            is_new: self.is_new?,
            img_dir: self.img_dir.as_deref()?,
            value: self.value.as_deref()?,
            object_id: self.object_id.as_ref()?,
            module_name: self.module_name.as_deref()?,
        })
    }
}

impl<'de> Deserialize<'de> for PreviewData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads the stored file name. `0` and `"0"` mean no file, like an empty name.
fn file_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s == "0" => Some(String::new()),
        Value::Number(n) if n.as_f64() == Some(0.0) => Some(String::new()),
        _ => text(value),
    }
}

fn object_id(value: &Value) -> Option<ObjectId> {
    match value {
        Value::Number(n) => {
            if let Some(id) = n.as_i64() {
                Some(ObjectId::Number(id))
            } else if let Some(id) = n.as_u64() {
                Some(ObjectId::Text(id.to_string()))
            } else {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| ObjectId::Number(f as i64))
            }
        }
        Value::String(s) => Some(ObjectId::Text(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_record_is_complete() {
        let preview = PreviewData::from_json(&json!({
            "isNew": false,
            "imgDir": "d",
            "value": "f.png",
            "objectId": 42,
            "moduleName": "gallery"
        }));

        let complete = preview.complete().expect("all fields present");
        assert_eq!(complete.img_dir, "d");
        assert_eq!(complete.object_id.to_string(), "42");
        assert!(complete.shows_existing_file());
    }

    #[test]
    fn wrong_types_and_nulls_count_as_missing() {
        let preview: PreviewData = serde_json::from_value(json!({
            "isNew": "no",
            "imgDir": null,
            "value": "f.png",
            "objectId": [1],
            "moduleName": "gallery"
        }))
        .unwrap();

        assert_eq!(preview.is_new, None);
        assert_eq!(preview.img_dir, None);
        assert_eq!(preview.object_id, None);
        assert!(preview.complete().is_none());
    }

    #[test]
    fn non_object_is_empty() {
        assert!(PreviewData::from_json(&json!("gallery")).is_empty());
        assert!(PreviewData::from_json(&json!([])).is_empty());
    }

    #[test]
    fn new_object_or_empty_value_shows_nothing() {
        let new_object = PreviewData::from_json(&json!({
            "isNew": true, "imgDir": "d", "value": "f.png", "objectId": "a1", "moduleName": "m"
        }));
        let no_file = PreviewData::from_json(&json!({
            "isNew": 0, "imgDir": "d", "value": "", "objectId": "a1", "moduleName": "m"
        }));

        assert!(!new_object.complete().unwrap().shows_existing_file());
        assert!(!no_file.complete().unwrap().shows_existing_file());
    }

    #[test]
    fn zero_file_name_shows_nothing() {
        for value in [json!(0), json!("0"), json!(0.0)] {
            let preview = PreviewData::from_json(&json!({
                "isNew": false, "imgDir": "d", "value": value, "objectId": 42, "moduleName": "g"
            }));

            let complete = preview.complete().expect("all fields present");
            assert_eq!(complete.value, "");
            assert!(!complete.shows_existing_file());
        }
    }

    #[test]
    fn numeric_file_names_are_kept() {
        let preview = PreviewData::from_json(&json!({
            "isNew": false, "imgDir": "d", "value": 10, "objectId": 42, "moduleName": "g"
        }));
        assert_eq!(preview.value.as_deref(), Some("10"));
        assert!(preview.complete().unwrap().shows_existing_file());
    }

    #[test]
    fn integral_float_and_large_ids_are_accepted() {
        let float_id = PreviewData::from_json(&json!({ "objectId": 42.0 }));
        let large_id = PreviewData::from_json(&json!({ "objectId": u64::MAX }));
        let fractional_id = PreviewData::from_json(&json!({ "objectId": 4.2 }));

        assert_eq!(float_id.object_id, Some(ObjectId::Number(42)));
        assert_eq!(
            large_id.object_id.map(|id| id.to_string()),
            Some(u64::MAX.to_string())
        );
        assert_eq!(fractional_id.object_id, None);
    }
}
