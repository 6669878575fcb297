//! HTML tag rendering shared by all widgets.
//!
//! Two layers live here:
//!
//! - The free functions [`tag`] and [`content_tag`] render exactly the attributes
//!   they are given. They are used for fixed markup such as the preview block.
//! - [`TagBuilder`] holds the per-widget settings (default attributes and the id
//!   format) and is what widgets use for the controls they render: default
//!   attributes are merged under the call attributes, and a control with a `name`
//!   but no `id` gets an id generated from its name.
//!
//! Attribute values are always HTML-escaped. An attribute whose value is empty is
//! left out, except `value`, whose emptiness is meaningful for inputs.

use common::model::attributes::{merge, Attributes};
use regex::Regex;
use std::sync::OnceLock;

/// Renders a self-closing tag: `<img src="..." />`.
pub fn tag(name: &str, attributes: &Attributes) -> String {
    if name.is_empty() {
        return String::new();
    }
    format!("<{}{} />", name, attributes_to_html(attributes))
}

/// Renders a tag wrapping `content`. The content is inserted as is.
pub fn content_tag(name: &str, content: &str, attributes: &Attributes) -> String {
    if name.is_empty() {
        return String::new();
    }
    format!(
        "<{}{}>{}</{}>",
        name,
        attributes_to_html(attributes),
        content,
        name
    )
}

fn attributes_to_html(attributes: &Attributes) -> String {
    attributes
        .iter()
        .filter(|(k, v)| !v.is_empty() || k.as_str() == "value")
        .map(|(k, v)| format!(" {}=\"{}\"", k, escape_html(v)))
        .collect()
}

/// Escapes special HTML characters in a string.
///
/// `&`, `<`, `>`, `"` and `'` are replaced by their respective HTML entities.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strips leading non-letters and replaces every character that is not legal in
/// an element id with `_`.
pub fn sanitize_id(raw: &str) -> String {
    static LEADING: OnceLock<Regex> = OnceLock::new();
    static ILLEGAL: OnceLock<Regex> = OnceLock::new();

    let leading = LEADING.get_or_init(|| Regex::new(r"^[^A-Za-z]+").unwrap());
    let illegal = ILLEGAL.get_or_init(|| Regex::new(r"[^A-Za-z0-9:_.\-]").unwrap());

    let trimmed = leading.replace(raw, "");
    illegal.replace_all(&trimmed, "_").into_owned()
}

/// Per-widget tag renderer.
#[derive(Debug, Clone)]
pub struct TagBuilder {
    /// Format applied to generated ids; `%s` stands for the field name.
    id_format: String,
    /// Attributes added to every control the widget renders.
    default_attributes: Attributes,
}

impl Default for TagBuilder {
    fn default() -> Self {
        Self::new("%s", Attributes::new())
    }
}

impl TagBuilder {
    pub fn new(id_format: impl Into<String>, default_attributes: Attributes) -> Self {
        Self {
            id_format: id_format.into(),
            default_attributes,
        }
    }

    pub fn render_tag(&self, name: &str, attributes: &Attributes) -> String {
        tag(name, &self.prepare(attributes))
    }

    pub fn render_content_tag(&self, name: &str, content: &str, attributes: &Attributes) -> String {
        content_tag(name, content, &self.prepare(attributes))
    }

    /// Generates the element id of a field.
    ///
    /// Array-style names are flattened first: `[]` becomes `_<value>` (or nothing
    /// when there is no value), `][` and `[` become `_` and `]` is dropped, so
    /// `article[photo]` gives `article_photo`.
    pub fn generate_id(&self, name: &str, value: Option<&str>) -> String {
        let mut id = name.to_string();
        if id.contains('[') {
            let list_suffix = value.map(|v| format!("_{}", v)).unwrap_or_default();
            id = id
                .replace("[]", &list_suffix)
                .replace("][", "_")
                .replace('[', "_")
                .replace(']', "");
        }
        if self.id_format.contains("%s") {
            id = self.id_format.replacen("%s", &id, 1);
        }
        sanitize_id(&id)
    }

    fn prepare(&self, attributes: &Attributes) -> Attributes {
        let mut merged = merge(&self.default_attributes, attributes);
        if !merged.contains_key("id") {
            if let Some(name) = merged.get("name") {
                let id = self.generate_id(name, merged.get("value").map(String::as_str));
                merged.insert("id".to_string(), id);
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::attributes::attrs;

    #[test]
    fn self_closing_tag_escapes_values() {
        let html = tag("img", &attrs([("src", "/a.png"), ("alt", "\"x\" & <y>")]));
        assert_eq!(
            html,
            "<img alt=\"&quot;x&quot; &amp; &lt;y&gt;\" src=\"/a.png\" />"
        );
    }

    #[test]
    fn empty_values_are_skipped_except_value() {
        let html = tag("input", &attrs([("class", ""), ("value", "")]));
        assert_eq!(html, "<input value=\"\" />");
    }

    #[test]
    fn empty_tag_name_renders_nothing() {
        assert_eq!(tag("", &attrs([("src", "/a.png")])), "");
        assert_eq!(content_tag("", "text", &Attributes::new()), "");
    }

    #[test]
    fn content_tag_keeps_content_raw() {
        let html = content_tag("label", "<b>remove</b>", &attrs([("for", "photo_delete")]));
        assert_eq!(html, "<label for=\"photo_delete\"><b>remove</b></label>");
    }

    #[test]
    fn ids_are_flattened_and_sanitized() {
        let tags = TagBuilder::default();

        assert_eq!(tags.generate_id("photo", None), "photo");
        assert_eq!(tags.generate_id("article[photo]", None), "article_photo");
        assert_eq!(tags.generate_id("photo[_delete]", None), "photo__delete");
        assert_eq!(tags.generate_id("a[b][c]", None), "a_b_c");
        assert_eq!(tags.generate_id("tags[]", Some("red")), "tags_red");
        assert_eq!(tags.generate_id("tags[]", None), "tags");
        assert_eq!(tags.generate_id("2nd photo!", None), "nd_photo_");
    }

    #[test]
    fn id_format_wraps_the_name() {
        let tags = TagBuilder::new("form_%s", Attributes::new());
        assert_eq!(tags.generate_id("article[photo]", None), "form_article_photo");
    }

    #[test]
    fn builder_merges_defaults_and_generates_id() {
        let tags = TagBuilder::new("%s", attrs([("class", "upload"), ("type", "text")]));
        let html = tags.render_tag("input", &attrs([("type", "file"), ("name", "photo")]));

        assert_eq!(
            html,
            "<input class=\"upload\" id=\"photo\" name=\"photo\" type=\"file\" />"
        );
    }

    #[test]
    fn explicit_id_is_kept() {
        let tags = TagBuilder::default();
        let html = tags.render_tag("input", &attrs([("name", "photo"), ("id", "custom")]));
        assert_eq!(html, "<input id=\"custom\" name=\"photo\" />");
    }
}
