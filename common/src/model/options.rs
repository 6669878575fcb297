//! Options of the editable file-upload widget.
//!
//! `EditableFileOptions` is the merged view of the widget's defaults and the
//! caller's overrides. It can be built in code through [`EditableFileOptions::new`]
//! or deserialized from a JSON object, in which case every key that is not set
//! falls back to its default. Only `file_src` has no default.
//!
//! Placeholders understood by `template`:
//! - `%input%`: the upload input tag,
//! - `%delete%`: the delete checkbox,
//! - `%delete_label%`: the label of the delete checkbox,
//! - `%file%`: the current file (an `<img>` tag for images, the raw source otherwise).

use crate::model::preview::PreviewData;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DELETE_LABEL: &str = "remove the current file";
pub const DEFAULT_TEMPLATE: &str = "%file%<br />%input%<br />%delete% %delete_label%";
pub const DEFAULT_ID_FORMAT: &str = "%s";

/// Options that must be present in every option map.
pub const REQUIRED_OPTIONS: &[&str] = &["file_src"];

/// Every key an option map may carry.
pub const SUPPORTED_OPTIONS: &[&str] = &[
    "file_src",
    "edit_mode",
    "is_image",
    "with_delete",
    "with_preview",
    "preview",
    "delete_label",
    "template",
    "id_format",
];

/// Web source of the current file, or `false` when there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFileSrc", into = "RawFileSrc")]
pub enum FileSrc {
    Path(String),
    Disabled,
}

impl FileSrc {
    pub fn as_path(&self) -> Option<&str> {
        match self {
            FileSrc::Path(p) => Some(p),
            FileSrc::Disabled => None,
        }
    }
}

impl From<&str> for FileSrc {
    fn from(path: &str) -> Self {
        FileSrc::Path(path.to_string())
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawFileSrc {
    Path(String),
    Flag(bool),
}

impl TryFrom<RawFileSrc> for FileSrc {
    type Error = String;

    fn try_from(raw: RawFileSrc) -> Result<Self, Self::Error> {
        match raw {
            RawFileSrc::Path(p) => Ok(FileSrc::Path(p)),
            RawFileSrc::Flag(false) => Ok(FileSrc::Disabled),
            RawFileSrc::Flag(true) => Err("file_src must be a path or false".to_string()),
        }
    }
}

impl From<FileSrc> for RawFileSrc {
    fn from(src: FileSrc) -> Self {
        match src {
            FileSrc::Path(p) => RawFileSrc::Path(p),
            FileSrc::Disabled => RawFileSrc::Flag(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableFileOptions {
    /// The current file web source path.
    pub file_src: FileSrc,
    /// False renders the bare upload input.
    #[serde(default = "enabled")]
    pub edit_mode: bool,
    /// Whether the file is a displayable image.
    #[serde(default)]
    pub is_image: bool,
    #[serde(default = "enabled")]
    pub with_delete: bool,
    #[serde(default)]
    pub with_preview: bool,
    #[serde(default)]
    pub preview: PreviewData,
    /// Message key of the delete checkbox label.
    #[serde(default = "default_delete_label")]
    pub delete_label: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_id_format")]
    pub id_format: String,
}

impl EditableFileOptions {
    pub fn new(file_src: impl Into<FileSrc>) -> Self {
        Self {
            file_src: file_src.into(),
            edit_mode: true,
            is_image: false,
            with_delete: true,
            with_preview: false,
            preview: PreviewData::default(),
            delete_label: default_delete_label(),
            template: default_template(),
            id_format: default_id_format(),
        }
    }
}

fn enabled() -> bool {
    true
}

fn default_delete_label() -> String {
    DEFAULT_DELETE_LABEL.to_string()
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_id_format() -> String {
    DEFAULT_ID_FORMAT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_keys_take_defaults() {
        let options: EditableFileOptions =
            serde_json::from_value(json!({ "file_src": "/uploads/a.png" })).unwrap();

        assert_eq!(options, EditableFileOptions::new("/uploads/a.png"));
        assert!(options.edit_mode);
        assert!(options.with_delete);
        assert!(!options.is_image);
        assert!(!options.with_preview);
        assert!(options.preview.is_empty());
        assert_eq!(options.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn file_src_accepts_false_but_not_true() {
        let off: EditableFileOptions =
            serde_json::from_value(json!({ "file_src": false })).unwrap();
        assert_eq!(off.file_src, FileSrc::Disabled);

        let on = serde_json::from_value::<EditableFileOptions>(json!({ "file_src": true }));
        assert!(on.is_err());
    }

    #[test]
    fn label_is_not_an_option() {
        assert!(!SUPPORTED_OPTIONS.contains(&"label"));
        assert!(SUPPORTED_OPTIONS.contains(&"id_format"));
    }

    #[test]
    fn disabled_source_serializes_as_false() {
        let value = serde_json::to_value(EditableFileOptions::new(FileSrc::Disabled)).unwrap();
        assert_eq!(value["file_src"], json!(false));
    }
}
