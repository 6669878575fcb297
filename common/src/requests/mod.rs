use crate::model::attributes::Attributes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Request payload for the editable file widget render endpoint.
/// `options` is validated by the widget itself so that a missing `file_src` or an
/// unknown key is reported with the widget's own error message.
pub struct RenderWidgetRequest {
    /// Field name, e.g. `photo` or `article[photo]`.
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    /// Attributes merged into the tags of this render only.
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub errors: Vec<String>,
    pub options: Map<String, Value>,
    /// Default attributes of the widget itself.
    #[serde(default)]
    pub widget_attributes: Attributes,
}
